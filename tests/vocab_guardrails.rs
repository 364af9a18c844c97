use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use verdict::bridge::runtime::RUNTIMES;
use verdict_core::lang::builtins::BUILTIN_FUNCTIONS;
use verdict_core::lang::operators::ASSERT_OPERATORS;

/// Guardrail against reintroducing stringly-typed vocabulary checks.
///
/// This is a **coarse** safety net. It looks for patterns like `== "add"` or `"startsWith" => ...` in Rust sources
/// where callers should go through the `verdict_core::lang` registries or the runtime table instead.
///
/// Notes:
/// - Registries themselves (`crates/verdict_core/src/lang/**`, `src/bridge/runtime.rs`) and tests are allowed.
#[test]
fn no_new_stringly_vocab_checks_in_rust_sources() {
    let root = repo_root();
    let spellings = spellings();
    let mut offenders: Vec<(PathBuf, usize, String)> = Vec::new();

    let targets = [
        root.join("src"),
        root.join("crates/verdict_core/src"),
        root.join("crates/verdict_syntax/src"),
    ];
    for dir in targets {
        if dir.exists() {
            scan_dir(&root, &dir, &spellings, &mut offenders);
        }
    }

    if !offenders.is_empty() {
        let mut msg = String::new();
        msg.push_str("Found potential stringly-typed vocabulary checks. Prefer the registries.\n\n");
        for (path, line_no, line) in offenders.into_iter().take(80) {
            msg.push_str(&format!(
                "- {}:{}: {}\n",
                path.strip_prefix(&root).unwrap_or(&path).display(),
                line_no,
                line.trim()
            ));
        }
        panic!("{msg}");
    }
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn spellings() -> Vec<&'static str> {
    let mut set: BTreeSet<&'static str> = BTreeSet::new();
    for b in BUILTIN_FUNCTIONS {
        set.insert(b.canonical());
    }
    for op in ASSERT_OPERATORS {
        set.insert(op.item.canonical);
    }
    for r in RUNTIMES {
        set.insert(r.canonical);
        set.extend(r.file_tags.iter().copied());
    }
    set.into_iter().collect()
}

fn is_allowed_file(root: &Path, path: &Path) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path).to_string_lossy().replace('\\', "/");
    if !rel.ends_with(".rs") {
        return true;
    }
    if rel.starts_with("crates/verdict_core/src/lang/") || rel == "src/bridge/runtime.rs" {
        return true;
    }
    rel.contains("/tests/")
}

fn scan_dir(root: &Path, dir: &Path, spellings: &[&'static str], offenders: &mut Vec<(PathBuf, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan_dir(root, &path, spellings, offenders);
            continue;
        }
        if is_allowed_file(root, &path) {
            continue;
        }
        let Ok(contents) = fs::read_to_string(&path) else {
            continue;
        };
        // Colocated unit tests may spell vocabulary directly.
        let production = contents.split("#[cfg(test)]").next().unwrap_or("");
        for (idx, line) in production.lines().enumerate() {
            if is_suspicious_line(line, spellings) {
                offenders.push((path.clone(), idx + 1, line.to_string()));
            }
        }
    }
}

fn is_suspicious_line(line: &str, spellings: &[&'static str]) -> bool {
    let trimmed = line.trim_start();
    if trimmed.starts_with("//") {
        return false;
    }
    spellings.iter().any(|s| {
        let eq = format!("== \"{s}\"");
        let arm = format!("\"{s}\" =>");
        line.contains(&eq) || line.contains(&arm)
    })
}
