//! Binary that solves one built-in world and prints deterministic output
//! lines for cross-process verification.
//!
//! Usage: `solve_fixture <world_id>`
//!
//! Output: key=value lines (see source for format).

use trikey_harness::runner::run_solve;
use trikey_harness::worlds;
use trikey_search::policy::SearchPolicyV1;

fn main() {
    let world_id = std::env::args().nth(1).expect("usage: solve_fixture <world_id>");
    let world = worlds::by_id(&world_id).unwrap_or_else(|| panic!("unknown world: {world_id}"));
    let maze = world.maze().expect("world layout parses");
    let report = run_solve(&maze, &SearchPolicyV1::default()).expect("solve run failed");

    let termination = report.termination_reason.to_json_value();
    let term_type = termination["type"]
        .as_str()
        .expect("termination_reason has a type");

    println!("world_id={}", report.world_id);
    println!("problem_digest={}", report.problem_digest);
    println!("search_policy_digest={}", report.search_policy_digest);
    println!("graph_digest={}", report.graph_digest);
    println!("report_digest={}", report.digest().expect("report digest"));
    println!("termination_reason={term_type}");
    println!("total_expansions={}", report.total_expansions);
    match (&report.actions, report.path_cost) {
        (Some(actions), Some(cost)) => {
            println!("actions={}", actions.join(""));
            println!("path_cost={cost}");
        }
        _ => {
            println!("actions=none");
            println!("path_cost=none");
        }
    }
}
