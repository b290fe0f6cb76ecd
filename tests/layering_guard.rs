//! Layering guardrail keeping `yacu_core` free of runtime dependencies.
//!
//! Test bodies link against the vocabulary crate; process handling, reporting, and the CLI stack stay in
//! `yacu`. This test scans `crates/yacu_core/Cargo.toml` and fails if its `[dependencies]` table lists
//! anything.

#[test]
fn core_crate_has_no_runtime_dependencies() {
    let manifest = include_str!("../crates/yacu_core/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }
        let entry = line.split('#').next().unwrap_or("").trim();
        panic!("yacu_core must stay dependency-free, found `{entry}` in [dependencies]");
    }
}

#[test]
fn harness_depends_on_core_by_path() {
    let manifest = include_str!("../Cargo.toml");
    assert!(
        manifest
            .lines()
            .any(|line| line.trim().starts_with("yacu_core") && line.contains("path = \"crates/yacu_core\"")),
        "yacu must depend on the in-tree yacu_core crate"
    );
}
