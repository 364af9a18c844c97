//! Layering guardrails between the workspace crates.
//!
//! `verdict_core` is the pure value/vocabulary layer: it may only depend on `serde_json` and `thiserror`.
//! `verdict_syntax` sits on top of it and must never depend on the root `verdict` crate (engine, bridges, CLI).

/// Dependency names listed in the `[dependencies]` table of a manifest.
fn main_dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut deps = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            deps.push(name.trim().to_string());
        }
    }
    deps
}

#[test]
fn core_depends_only_on_serde_json_and_thiserror() {
    let deps = main_dependencies(include_str!("../crates/verdict_core/Cargo.toml"));
    assert_eq!(deps, vec!["serde_json", "thiserror"], "verdict_core must stay free of I/O and CLI crates");
}

#[test]
fn syntax_does_not_depend_on_the_engine() {
    let deps = main_dependencies(include_str!("../crates/verdict_syntax/Cargo.toml"));
    assert!(deps.iter().any(|d| d == "verdict_core"));
    assert!(!deps.iter().any(|d| d == "verdict"), "verdict_syntax must not depend on the root crate");
}

#[test]
fn root_keeps_test_tooling_out_of_main_dependencies() {
    let deps = main_dependencies(include_str!("../Cargo.toml"));
    for dev_only in ["proptest", "insta"] {
        assert!(!deps.iter().any(|d| d == dev_only), "`{dev_only}` belongs in [dev-dependencies]");
    }
}
