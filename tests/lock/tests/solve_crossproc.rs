//! Cross-process determinism test.
//!
//! Spawns the `solve_fixture` binary for every built-in world under several
//! environment variants and asserts identical output. Search results must
//! not depend on cwd, locale, env vars, or per-process hash seeds.

use std::path::Path;
use std::process::Command;

use trikey_harness::worlds;

/// The `solve_fixture` binary sits one level above the test binary's `deps/`.
fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("solve_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .to_string_lossy()
        .to_string()
}

fn run_variant(world_id: &str, work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();
    let mut command = Command::new(&bin);
    command
        .arg(world_id)
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "solve_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_env_variants() {
    let root = workspace_root();
    let alt_cwd = std::env::temp_dir().to_string_lossy().to_string();

    for world in worlds::ALL {
        let baseline = run_variant(world.world_id, &root, &[]);
        assert!(
            baseline.contains("graph_digest=sha256:"),
            "{}: output missing graph_digest",
            world.world_id
        );

        let variants = [
            run_variant(world.world_id, &alt_cwd, &[]),
            run_variant(world.world_id, &root, &[("LC_ALL", "C"), ("LANG", "C")]),
            run_variant(
                world.world_id,
                &root,
                &[
                    ("TRIKEY_NOISE", "should_not_matter"),
                    ("TZ", "America/New_York"),
                    ("RUST_LOG", "trace"),
                ],
            ),
        ];
        for (i, variant) in variants.iter().enumerate() {
            assert_eq!(
                &baseline, variant,
                "{}: output differs under variant {i}",
                world.world_id
            );
        }
    }
}

#[test]
fn crossproc_output_matches_in_process_run() {
    use trikey_harness::runner::run_solve;
    use trikey_search::policy::SearchPolicyV1;

    let maze = worlds::MUD_DETOUR.maze().unwrap();
    let report = run_solve(&maze, &SearchPolicyV1::default()).unwrap();
    let output = run_variant("mud_detour", &workspace_root(), &[]);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 9, "unexpected output: {output}");
    assert_eq!(lines[0], "world_id=mud_detour");
    assert_eq!(lines[3], format!("graph_digest={}", report.graph_digest));
    assert_eq!(
        lines[4],
        format!("report_digest={}", report.digest().unwrap())
    );
    assert_eq!(lines[5], "termination_reason=goal_reached");
    assert_eq!(lines[8], "path_cost=9");
}
