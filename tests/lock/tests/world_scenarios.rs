//! End-to-end scenarios over every built-in world.
//!
//! Proves:
//! 1. Each world's answer matches its hand-derived optimal cost
//! 2. Every policy agrees with the zero-heuristic (uniform-cost) optimum
//! 3. Every answer survives independent replay
//! 4. Unsolvable worlds report `Ok(None)` from `solve`

use trikey_harness::replay::verify_solution;
use trikey_harness::runner::run_solve;
use trikey_harness::worlds::{self, WorldFixture};
use trikey_search::graph::TerminationReasonV1;
use trikey_search::policy::{DuplicatePolicyV1, HeuristicV1, SearchPolicyV1};
use trikey_search::{solve, solve_with_policy};

fn all_policies() -> Vec<SearchPolicyV1> {
    let mut out = Vec::new();
    for heuristic in [HeuristicV1::NearestKey, HeuristicV1::FarthestKey, HeuristicV1::Zero] {
        for duplicate_policy in [
            DuplicatePolicyV1::BestCostOnInsert,
            DuplicatePolicyV1::ClosedSetOnly,
        ] {
            out.push(SearchPolicyV1 {
                max_expansions: None,
                heuristic,
                duplicate_policy,
            });
        }
    }
    out
}

fn path_cost(world: &WorldFixture, policy: &SearchPolicyV1) -> Option<u64> {
    let maze = world.maze().unwrap();
    let actions = solve_with_policy(&maze, policy).unwrap()?;
    Some(verify_solution(&maze, &actions).unwrap().total_cost)
}

#[test]
fn default_policy_finds_known_optimum() {
    for world in worlds::ALL {
        let maze = world.maze().unwrap();
        let report = run_solve(&maze, &SearchPolicyV1::default()).unwrap();
        assert_eq!(report.path_cost, world.optimal_cost, "{}", world.world_id);
        assert_eq!(
            report.replay.as_ref().map(|r| r.total_cost),
            world.optimal_cost,
            "{}: replayed cost differs",
            world.world_id
        );
    }
}

#[test]
fn every_policy_matches_uniform_cost_search() {
    let zero = SearchPolicyV1 {
        heuristic: HeuristicV1::Zero,
        ..SearchPolicyV1::default()
    };
    for world in worlds::ALL {
        let baseline = path_cost(world, &zero);
        assert_eq!(baseline, world.optimal_cost, "{}", world.world_id);
        for policy in all_policies() {
            assert_eq!(
                path_cost(world, &policy),
                baseline,
                "{} under {policy:?}",
                world.world_id
            );
        }
    }
}

#[test]
fn informed_heuristic_expands_no_more_than_uniform_cost() {
    let zero = SearchPolicyV1 {
        heuristic: HeuristicV1::Zero,
        ..SearchPolicyV1::default()
    };
    for world in worlds::ALL {
        let maze = world.maze().unwrap();
        let informed = run_solve(&maze, &SearchPolicyV1::default()).unwrap();
        let blind = run_solve(&maze, &zero).unwrap();
        assert!(
            informed.total_expansions <= blind.total_expansions,
            "{}: nearest_key expanded {} vs zero {}",
            world.world_id,
            informed.total_expansions,
            blind.total_expansions
        );
    }
}

#[test]
fn corridor_answer_is_three_rights() {
    let maze = worlds::CORRIDOR.maze().unwrap();
    let actions = solve(&maze).unwrap().unwrap();
    let labels: Vec<String> = actions.iter().map(ToString::to_string).collect();
    assert_eq!(labels, ["R", "R", "R"]);
}

#[test]
fn unreachable_key_is_not_found() {
    let maze = worlds::UNREACHABLE_KEY.maze().unwrap();
    assert_eq!(solve(&maze).unwrap(), None);
    let report = run_solve(&maze, &SearchPolicyV1::default()).unwrap();
    assert_eq!(report.termination_reason, TerminationReasonV1::FrontierExhausted);
    assert!(report.actions.is_none());
}
