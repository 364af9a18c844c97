//! Runtime vocabulary for external bridges.
//!
//! Each supported runtime has one registry entry: its config spelling, the executables tried in order, the
//! adapter script extension and the test-file tags that select it.

use std::fmt;
use std::path::{Path, PathBuf};

/// Placeholder line in each adapter asset, replaced by the module list literal.
const MODULES_PLACEHOLDER: &str = "__VERDICT_MODULES__";

const NODE_ADAPTER: &str = include_str!("adapters/node.js");
const PYTHON_ADAPTER: &str = include_str!("adapters/python.py");
const LUA_ADAPTER: &str = include_str!("adapters/lua.lua");

/// A runtime that external functions can be implemented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Runtime {
    #[default]
    Node,
    Python,
    Lua,
}

#[derive(Debug)]
pub struct RuntimeInfo {
    pub id: Runtime,
    /// Spelling used in `verdict.yaml`.
    pub canonical: &'static str,
    /// Executables in resolution order; the first one that spawns wins.
    pub executables: &'static [&'static str],
    /// Adapter script suffix (including the dot).
    pub script_extension: &'static str,
    /// Test-file tags (`name.<tag>.verdict`) that select this runtime.
    pub file_tags: &'static [&'static str],
}

pub const RUNTIMES: &[RuntimeInfo] = &[
    RuntimeInfo {
        id: Runtime::Node,
        canonical: "node",
        executables: &["node", "nodejs"],
        script_extension: ".js",
        file_tags: &["js", "ts"],
    },
    RuntimeInfo {
        id: Runtime::Python,
        canonical: "python",
        executables: &["python3", "python"],
        script_extension: ".py",
        file_tags: &["py"],
    },
    RuntimeInfo {
        id: Runtime::Lua,
        canonical: "lua",
        executables: &["lua", "lua54", "lua5.4", "lua5.3", "lua5.2", "luajit"],
        script_extension: ".lua",
        file_tags: &["lua"],
    },
];

impl Runtime {
    pub fn info(self) -> &'static RuntimeInfo {
        RUNTIMES
            .iter()
            .find(|r| r.id == self)
            .expect("INVARIANT: every runtime has a registry entry")
    }

    pub fn as_str(self) -> &'static str {
        self.info().canonical
    }

    pub fn executables(self) -> &'static [&'static str] {
        self.info().executables
    }

    pub fn script_extension(self) -> &'static str {
        self.info().script_extension
    }

    /// Look up a runtime by its config spelling (exact match).
    pub fn from_name(name: &str) -> Option<Runtime> {
        RUNTIMES.iter().find(|r| r.canonical == name).map(|r| r.id)
    }

    /// Pick the runtime a test file is tagged with, e.g. `math.py.verdict` → Python.
    ///
    /// Untagged files (`math.verdict`) return `None` so the config runtime applies.
    pub fn from_file_name(path: &Path) -> Option<Runtime> {
        let stem = path.file_stem()?;
        let tag = Path::new(stem).extension()?.to_str()?;
        RUNTIMES.iter().find(|r| r.file_tags.contains(&tag)).map(|r| r.id)
    }

    /// Every test-file tag across all runtimes.
    pub fn all_file_tags() -> impl Iterator<Item = &'static str> {
        RUNTIMES.iter().flat_map(|r| r.file_tags.iter().copied())
    }

    /// Render the adapter script for this runtime, loading `modules` in order.
    pub fn render_adapter(self, modules: &[PathBuf]) -> String {
        let paths: Vec<String> = modules.iter().map(|m| m.to_string_lossy().replace('\\', "/")).collect();
        let (template, literal) = match self {
            Runtime::Node => (NODE_ADAPTER, json_string_list(&paths)),
            Runtime::Python => (PYTHON_ADAPTER, json_string_list(&paths)),
            Runtime::Lua => (LUA_ADAPTER, lua_string_list(&paths)),
        };
        template.replacen(MODULES_PLACEHOLDER, &literal, 1)
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON array of strings is a valid JavaScript and Python list literal.
fn json_string_list(paths: &[String]) -> String {
    serde_json::Value::from(paths.to_vec()).to_string()
}

/// Lua long-bracket strings take their content verbatim; pick a level the path cannot close early.
fn lua_string_list(paths: &[String]) -> String {
    let items: Vec<String> = paths
        .iter()
        .map(|p| {
            let mut level = 0;
            while p.contains(&format!("]{}]", "=".repeat(level))) {
                level += 1;
            }
            let eq = "=".repeat(level);
            format!("[{eq}[{p}]{eq}]")
        })
        .collect();
    format!("{{ {} }}", items.join(", "))
}
