//! Report directory persistence across every built-in world.

use trikey_harness::report_dir::{verify_report_dir, write_report_dir, ReportDirVerifyError};
use trikey_harness::runner::run_solve;
use trikey_harness::worlds;
use trikey_search::policy::SearchPolicyV1;

#[test]
fn every_world_report_verifies_after_write() {
    for world in worlds::ALL {
        let maze = world.maze().unwrap();
        let report = run_solve(&maze, &SearchPolicyV1::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        write_report_dir(&report, dir.path()).unwrap();
        let digest = verify_report_dir(dir.path()).unwrap();
        assert_eq!(digest, report.digest().unwrap(), "{}", world.world_id);
    }
}

#[test]
fn swapping_graphs_between_worlds_is_detected() {
    let policy = SearchPolicyV1::default();
    let a = run_solve(&worlds::CORRIDOR.maze().unwrap(), &policy).unwrap();
    let b = run_solve(&worlds::OPEN_ROOM.maze().unwrap(), &policy).unwrap();

    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    write_report_dir(&a, dir_a.path()).unwrap();
    write_report_dir(&b, dir_b.path()).unwrap();

    std::fs::copy(
        dir_b.path().join("search_graph.json"),
        dir_a.path().join("search_graph.json"),
    )
    .unwrap();
    let err = verify_report_dir(dir_a.path()).unwrap_err();
    assert!(matches!(err, ReportDirVerifyError::GraphDigestMismatch { .. }));
}

#[test]
fn stored_report_json_carries_the_answer() {
    let report = run_solve(&worlds::CORRIDOR.maze().unwrap(), &SearchPolicyV1::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&report, dir.path()).unwrap();

    let bytes = std::fs::read(dir.path().join("solve_report.json")).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["actions"], serde_json::json!(["R", "R", "R"]));
    assert_eq!(json["path_cost"], 3);
    assert_eq!(json["termination_reason"]["type"], "goal_reached");
    assert_eq!(json["replay"]["keys_visited"], 3);
}
