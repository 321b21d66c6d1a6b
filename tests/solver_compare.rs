use relax::grid::*;
use relax::solver::*;
use relax::util::*;

use float_cmp::assert_approx_eq;
use rand::prelude::*;

const STRATEGIES: [Strategy; 3] =
    [Strategy::Persistent, Strategy::ForkJoin, Strategy::Sequential];

fn parameters(
    threads: usize,
    epsilon: f64,
    strategy: Strategy,
) -> SolverParameters {
    SolverParameters {
        threads,
        epsilon,
        strategy,
    }
}

/// Generated boundary with random interior values.
fn random_grid(size: usize, seed: u64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::generate(size).unwrap();
    let coords: Vec<Coord> = grid.interior_coords().collect();
    for c in coords {
        grid.set(&c, rng.gen_range(0.0..1.0));
    }
    grid
}

#[test]
fn four_by_four_fixed_point() {
    let grid = Grid::generate(4).unwrap();
    let epsilon = 0.001;
    for strategy in STRATEGIES {
        for threads in 1..=3 {
            let (result, report) =
                solve(&grid, parameters(threads, epsilon, strategy)).unwrap();
            assert_eq!(report.phase, Phase::Converged);

            // The kept grid lags the last candidates by one step,
            // Jacobi on this grid contracts by 1/2 per step.
            let tolerance = 2.0 * epsilon;
            assert_approx_eq!(
                f64,
                result.view(&vector![1, 1]),
                0.75,
                epsilon = tolerance
            );
            assert_approx_eq!(
                f64,
                result.view(&vector![1, 2]),
                0.50,
                epsilon = tolerance
            );
            assert_approx_eq!(
                f64,
                result.view(&vector![2, 1]),
                0.50,
                epsilon = tolerance
            );
            assert_approx_eq!(
                f64,
                result.view(&vector![2, 2]),
                0.25,
                epsilon = tolerance
            );
        }
    }
}

#[test]
fn boundary_is_never_written() {
    for size in [3, 4, 7, 12] {
        let grid = random_grid(size, size as u64);
        for strategy in STRATEGIES {
            let threads = 2.min(interior_count(size));
            let (result, _) =
                solve(&grid, parameters(threads, 0.0001, strategy)).unwrap();
            for i in 0..buffer_size(size) {
                let c = linear_to_coord(i, size);
                if is_boundary(&c, size) {
                    assert_eq!(result.view(&c), grid.view(&c), "{:?}", c);
                }
            }
        }
    }
}

#[test]
fn thread_count_independence() {
    let size = 16;
    let grid = random_grid(size, 7);
    let (reference, reference_report) =
        solve(&grid, parameters(1, 0.00001, Strategy::Sequential)).unwrap();

    // 40 and 196 threads need the shorter equal blocks.
    for threads in [1, 2, 3, 5, 8, 13, 40, 196] {
        for strategy in STRATEGIES {
            let (result, report) =
                solve(&grid, parameters(threads, 0.00001, strategy)).unwrap();
            assert_eq!(report.progress, reference_report.progress);
            for i in 0..buffer_size(size) {
                assert_approx_eq!(
                    f64,
                    result.buffer()[i],
                    reference.buffer()[i],
                    ulps = 0
                );
            }
        }
    }
}

#[test]
fn terminates_in_the_first_quiet_iteration() {
    let size = 10;
    let epsilon = 0.0001;
    let grid = Grid::generate(size).unwrap();
    let (result, report) =
        solve(&grid, parameters(4, epsilon, Strategy::Persistent)).unwrap();
    assert_eq!(report.progress.merges + 1, report.progress.iterations);

    // One more step from the result moves nothing by more than epsilon.
    let mut max_diff: f64 = 0.0;
    for c in result.interior_coords() {
        let i = coord_to_linear(&c, size);
        let diff = (result.neighbor_mean(i) - result.view(&c)).abs();
        max_diff = max_diff.max(diff);
    }
    assert!(max_diff <= epsilon, "max_diff {max_diff}");

    // A looser epsilon never needs more iterations.
    let loose = parameters(4, 10.0 * epsilon, Strategy::Sequential);
    let (_, loose_report) = solve(&grid, loose).unwrap();
    assert!(loose_report.progress.iterations <= report.progress.iterations);
}

#[test]
fn solution_is_smooth() {
    // Every interior cell of the converged grid is close to its neighbor mean,
    // and values stay between the boundary extremes.
    let size = 12;
    let (result, _) = solve(
        &Grid::generate(size).unwrap(),
        parameters(6, 0.00001, Strategy::ForkJoin),
    )
    .unwrap();
    for c in result.interior_coords() {
        let v = result.view(&c);
        assert!((LOW_BOUNDARY..=HIGH_BOUNDARY).contains(&v));
        let i = coord_to_linear(&c, size);
        assert_approx_eq!(f64, v, result.neighbor_mean(i), epsilon = 0.00001);
    }
    // Symmetric boundary, symmetric result.
    for c in result.interior_coords() {
        let t = vector![c[1], c[0]];
        assert_approx_eq!(
            f64,
            result.view(&c),
            result.view(&t),
            epsilon = 1e-12
        );
    }
}
