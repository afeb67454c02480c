//! In-process determinism: repeated runs produce byte-identical artifacts.
//!
//! Proves:
//! 1. N=10 runs per world produce the same graph bytes and report digest
//! 2. Policy digests are stable and distinguish policies
//! 3. The expansion log is well-formed (orders dense, no state expanded twice)

use std::collections::BTreeSet;

use trikey_harness::runner::run_solve;
use trikey_harness::worlds;
use trikey_search::policy::{DuplicatePolicyV1, HeuristicV1, SearchPolicyV1};

const RUNS: usize = 10;

#[test]
fn repeated_runs_are_byte_identical() {
    for world in worlds::ALL {
        let maze = world.maze().unwrap();
        let first = run_solve(&maze, &SearchPolicyV1::default()).unwrap();
        let first_graph = first.graph.to_canonical_json_bytes().unwrap();
        let first_digest = first.digest().unwrap();

        for run in 1..RUNS {
            let again = run_solve(&maze, &SearchPolicyV1::default()).unwrap();
            assert_eq!(
                again.graph.to_canonical_json_bytes().unwrap(),
                first_graph,
                "{}: graph bytes differ on run {run}",
                world.world_id
            );
            assert_eq!(again.digest().unwrap(), first_digest);
            assert_eq!(again.actions, first.actions);
        }
    }
}

#[test]
fn policy_digest_is_stable_and_discriminating() {
    let a = SearchPolicyV1::default();
    assert_eq!(a.digest().unwrap(), SearchPolicyV1::default().digest().unwrap());

    let variants = [
        SearchPolicyV1 {
            max_expansions: Some(100),
            ..SearchPolicyV1::default()
        },
        SearchPolicyV1 {
            heuristic: HeuristicV1::FarthestKey,
            ..SearchPolicyV1::default()
        },
        SearchPolicyV1 {
            duplicate_policy: DuplicatePolicyV1::ClosedSetOnly,
            ..SearchPolicyV1::default()
        },
    ];
    let mut seen = BTreeSet::new();
    seen.insert(a.digest().unwrap());
    for policy in &variants {
        assert!(
            seen.insert(policy.digest().unwrap()),
            "digest collision for {policy:?}"
        );
    }
}

#[test]
fn expansion_log_is_well_formed() {
    for world in worlds::ALL {
        let maze = world.maze().unwrap();
        let report = run_solve(&maze, &SearchPolicyV1::default()).unwrap();
        let graph = &report.graph;

        assert_eq!(
            graph.expansions.len() as u64,
            graph.metadata.total_expansions
        );
        let mut fingerprints = BTreeSet::new();
        for (i, event) in graph.expansions.iter().enumerate() {
            assert_eq!(event.expansion_order, i as u64);
            assert!(
                fingerprints.insert(event.state_fingerprint.clone()),
                "{}: state expanded twice",
                world.world_id
            );
        }

        let mut last_f = 0;
        for event in &graph.expansions {
            assert!(
                event.frontier_pop_key.f_cost >= last_f,
                "{}: f decreased along the expansion order",
                world.world_id
            );
            last_f = event.frontier_pop_key.f_cost;
        }
    }
}
