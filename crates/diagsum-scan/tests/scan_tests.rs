use std::collections::BTreeSet;

use diagsum_core::{read_grid, write_markers};
use diagsum_scan::{
    compute_diagonal_sums, Cell, DiagonalScanner, Grid, MarkerGrid, ScanConfig, ScanError,
};
use tempfile::TempDir;

/// Small xorshift generator so test grids are reproducible.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn digit(&mut self) -> u8 {
        (self.next() % 10) as u8
    }
}

fn random_grid(n: usize, seed: u64) -> Grid {
    let mut rng = Rng(seed.max(1));
    let cells = (0..n * n).map(|_| rng.digit()).collect();
    Grid::from_cells(n, cells).unwrap()
}

/// Cells on matching runs, found by walking each edge start with a running
/// sum instead of the engine's per-length recount.
fn expected_cells(grid: &Grid, target: u64) -> BTreeSet<Cell> {
    let n = grid.size();
    let mut starts: Vec<(usize, usize, bool)> = Vec::new();
    for r in 0..n {
        starts.push((r, 0, true));
        starts.push((r, n - 1, false));
    }
    for c in 1..n {
        starts.push((0, c, true));
    }
    for c in 0..n.saturating_sub(1) {
        starts.push((0, c, false));
    }

    let mut marked = BTreeSet::new();
    for (row, col, forward) in starts {
        let mut path = Vec::new();
        let mut sum = 0u64;
        let (mut r, mut c) = (row as isize, col as isize);
        while r < n as isize && c >= 0 && c < n as isize {
            let cell = Cell::new(r as usize, c as usize);
            sum += u64::from(grid.get(cell.row, cell.col).unwrap());
            path.push(cell);
            if path.len() >= 2 && sum == target {
                marked.extend(path.iter().copied());
            }
            r += 1;
            c += if forward { 1 } else { -1 };
        }
    }
    marked
}

fn marked_cells(markers: &MarkerGrid) -> BTreeSet<Cell> {
    markers.marked_cells().collect()
}

#[test]
fn test_matches_reference_for_random_grids() {
    for n in 1..=9 {
        for seed in 1..=6u64 {
            let grid = random_grid(n, seed * 7919 + n as u64);
            for target in [0u64, 3, 9, 10, 15, 27] {
                let expected = expected_cells(&grid, target);
                for threads in 1..=3 {
                    let markers = compute_diagonal_sums(&grid, target, threads).unwrap();
                    assert_eq!(
                        marked_cells(&markers),
                        expected,
                        "n={n} seed={seed} target={target} threads={threads}\n{grid}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_thread_count_independence() {
    let grid = random_grid(17, 42);
    for target in 0..=40 {
        let single = compute_diagonal_sums(&grid, target, 1).unwrap();
        let double = compute_diagonal_sums(&grid, target, 2).unwrap();
        let triple = compute_diagonal_sums(&grid, target, 3).unwrap();
        assert_eq!(single, double, "target={target}");
        assert_eq!(single, triple, "target={target}");
    }
}

#[test]
fn test_idempotent() {
    let grid = random_grid(11, 5);
    let scanner = DiagonalScanner::with_config(ScanConfig::new(12).with_threads(3));
    let first = scanner.scan(&grid).unwrap();
    let second = scanner.scan(&grid).unwrap();

    assert_eq!(first.markers, second.markers);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_stats_independent_of_threads() {
    let grid = random_grid(10, 99);
    let reports: Vec<_> = (1..=3)
        .map(|threads| {
            DiagonalScanner::with_config(ScanConfig::new(14).with_threads(threads))
                .scan(&grid)
                .unwrap()
        })
        .collect();

    // Each diagonal of length L yields L - 1 candidates.
    let n = 10u64;
    let per_direction: u64 = (1..n).map(|len| len - 1).sum::<u64>() * 2 + (n - 1);
    for report in &reports {
        assert_eq!(report.stats.runs_checked, per_direction * 2);
        assert_eq!(report.stats.runs_matched, reports[0].stats.runs_matched);
        assert_eq!(report.stats.cells_marked, reports[0].stats.cells_marked);
    }
}

#[test]
fn test_large_target_never_matches() {
    let grid = random_grid(8, 3);
    let markers = compute_diagonal_sums(&grid, 8 * 9 + 1, 2).unwrap();
    assert_eq!(markers.marked_count(), 0);
}

#[test]
fn test_all_nines_full_diagonals() {
    let grid: Grid = "999\n999\n999\n".parse().unwrap();
    let markers = compute_diagonal_sums(&grid, 27, 3).unwrap();

    // Only the two main diagonals are long enough to reach 27.
    assert_eq!(markers.to_string(), "101\n010\n101\n");
}

#[test]
fn test_scan_rejects_invalid_threads() {
    let grid = random_grid(3, 1);
    let err = DiagonalScanner::with_config(ScanConfig::new(1).with_threads(0))
        .scan(&grid)
        .unwrap_err();
    assert!(matches!(err, ScanError::InvalidConfig { .. }));
}

#[test]
fn test_file_pipeline() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.txt");
    let output = temp.path().join("out.txt");
    std::fs::write(&input, "1111\n1111\n1111\n1111\n").unwrap();

    let grid = read_grid(&input).unwrap();
    let markers = compute_diagonal_sums(&grid, 3, 2).unwrap();
    write_markers(&output, &markers).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    let expected: String = {
        let cells = expected_cells(&grid, 3);
        (0..4)
            .map(|r| {
                let row: String = (0..4)
                    .map(|c| if cells.contains(&Cell::new(r, c)) { '1' } else { '0' })
                    .collect();
                row + "\n"
            })
            .collect()
    };
    assert_eq!(written, expected);
}
