//! Property tests: the engine against exhaustive enumeration.

use proptest::prelude::*;
use proptest::sample::Index;
use u_heldkarp::brute_force;
use u_heldkarp::held_karp::{HeldKarpConfig, HeldKarpRunner, Strategy, TourOutcome, VisitedSet};
use u_heldkarp::matrix::generate::random_sparse;
use u_heldkarp::matrix::CostMatrix;

fn instance(n: usize, seed: u64, density: f64) -> CostMatrix {
    random_sparse(n, 30, density, seed).unwrap()
}

fn strategy_config(recursive: bool) -> HeldKarpConfig {
    let strategy = if recursive {
        Strategy::Recursive
    } else {
        Strategy::BottomUp
    };
    HeldKarpConfig::default().with_strategy(strategy)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn every_state_matches_brute_force(
        n in 1usize..=7,
        seed in any::<u64>(),
        density in 0.4f64..=1.0,
        start in any::<Index>(),
        recursive in any::<bool>(),
    ) {
        let m = instance(n, seed, density);
        let start = start.index(n);
        let table = HeldKarpRunner::build_table(&m, start, &strategy_config(recursive)).unwrap();

        for bits in 0..(1u32 << n) {
            let visited = VisitedSet::from_bits(bits);
            for pos in 0..n {
                let Some(state) = table.state(visited, pos) else { continue };
                let expected = brute_force::completion_cost(&m, start, visited, pos).unwrap();
                prop_assert_eq!(state.cost, expected, "state ({:#b}, {})", bits, pos);
                // Finite non-terminal states always carry a decision.
                if state.cost.is_some() && visited != VisitedSet::full(n) {
                    prop_assert!(state.best_next.is_some());
                }
            }
        }
    }

    #[test]
    fn tour_is_complete_and_recosts_exactly(
        n in 1usize..=8,
        seed in any::<u64>(),
        density in 0.5f64..=1.0,
        start in any::<Index>(),
    ) {
        let m = instance(n, seed, density);
        let start = start.index(n);
        let result = HeldKarpRunner::run(&m, start, &HeldKarpConfig::default()).unwrap();

        match &result.outcome {
            TourOutcome::Tour(tour) => {
                let locs = tour.locations();
                if n == 1 {
                    prop_assert_eq!(locs, &[start][..]);
                } else {
                    prop_assert_eq!(locs.len(), n + 1);
                    prop_assert_eq!(locs[0], start);
                    prop_assert_eq!(locs[n], start);
                    let mut seen = locs[..n].to_vec();
                    seen.sort_unstable();
                    prop_assert_eq!(seen, (0..n).collect::<Vec<_>>());
                }
                prop_assert_eq!(m.path_cost(locs), result.total_cost);
                let forward: f64 = tour.edges().map(|(a, b)| m.edge(a, b).unwrap()).sum();
                prop_assert_eq!(Some(forward), result.total_cost);
            }
            TourOutcome::Unreachable => prop_assert_eq!(result.total_cost, None),
        }
    }

    #[test]
    fn optimum_and_tie_break_match_enumeration(
        n in 2usize..=8,
        seed in any::<u64>(),
        density in 0.3f64..=1.0,
    ) {
        // Costs in 1..=30 on few edges produce plenty of ties.
        let m = instance(n, seed, density);
        let result = HeldKarpRunner::run(&m, 0, &HeldKarpConfig::default()).unwrap();
        let oracle = brute_force::optimal_tour(&m, 0).unwrap();
        match (&result.outcome, oracle) {
            (TourOutcome::Tour(tour), Some(expected)) => {
                prop_assert_eq!(tour.cost(), expected.cost());
                prop_assert_eq!(tour.locations(), expected.locations());
            }
            (TourOutcome::Unreachable, None) => {}
            (outcome, oracle) => {
                prop_assert!(false, "engine {:?} vs oracle {:?}", outcome, oracle);
            }
        }
    }

    #[test]
    fn solve_is_deterministic_across_strategies(
        n in 1usize..=9,
        seed in any::<u64>(),
        density in 0.5f64..=1.0,
    ) {
        let m = instance(n, seed, density);
        let a = HeldKarpRunner::run(&m, 0, &strategy_config(true)).unwrap();
        let b = HeldKarpRunner::run(&m, 0, &strategy_config(true)).unwrap();
        let c = HeldKarpRunner::run(&m, 0, &strategy_config(false)).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&a.outcome, &c.outcome);
        prop_assert_eq!(a.total_cost, c.total_cost);
    }
}
