//! Round-trips through real interpreters. Each test skips itself when its runtime is not installed.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use verdict::bridge::{Bridge, BridgeError, BridgeSettings, Runtime, SubprocessBridge};
use verdict::cli::test_interfaces::{DefaultBridgeFactory, DefaultTestDiscovery};
use verdict::cli::test_runner::{RunOptions, run_once};
use verdict::config;
use verdict::report::JsonReporter;
use verdict_core::Value;

fn available(runtime: Runtime) -> bool {
    runtime
        .executables()
        .iter()
        .any(|exe| Command::new(exe).arg("--version").output().is_ok_and(|o| o.status.success()))
}

fn bridge(runtime: Runtime, module: PathBuf) -> SubprocessBridge {
    SubprocessBridge::new(&BridgeSettings {
        runtime,
        modules: vec![module],
        timeout: Duration::from_secs(20),
    })
}

const PYTHON_MODULE: &str = "\
def echo(*args):
    return list(args)

def area(w, h):
    return w * h

def boom():
    raise ValueError('kaput')

async def later(x):
    return x + 1

def slow():
    import time
    time.sleep(10)

def not_a_number():
    return float(\"nan\")

LIMIT = 3
";

const NODE_MODULE: &str = "\
exports.echo = (...args) => args;
exports.area = (w, h) => w * h;
exports.boom = () => { throw new Error('kaput'); };
exports.later = async (x) => x + 1;
";

fn write_module(dir: &Path, name: &str, source: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, source).unwrap();
    path
}

fn exercise(bridge: &dyn Bridge) {
    let args = [Value::Number(1.0), Value::from("a"), Value::Bool(true)];
    assert_eq!(bridge.call("echo", &args).unwrap(), Value::List(args.to_vec()));
    assert_eq!(
        bridge.call("area", &[Value::Number(3.0), Value::Number(4.0)]).unwrap(),
        Value::Number(12.0)
    );
    assert_eq!(bridge.call("later", &[Value::Number(1.0)]).unwrap(), Value::Number(2.0));

    let err = bridge.call("boom", &[]).unwrap_err();
    assert!(err.to_string().contains("kaput"), "{err}");

    let err = bridge.call("missing", &[]).unwrap_err();
    assert!(matches!(err, BridgeError::FunctionNotFound { .. }), "{err:?}");
}

#[test]
fn python_round_trip() {
    if !available(Runtime::Python) {
        eprintln!("skipping: python not installed");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let module = write_module(dir.path(), "calc.py", PYTHON_MODULE);
    exercise(&bridge(Runtime::Python, module));
}

#[test]
fn python_call_past_the_timeout_is_killed() {
    if !available(Runtime::Python) {
        eprintln!("skipping: python not installed");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let module = write_module(dir.path(), "calc.py", PYTHON_MODULE);
    let bridge = SubprocessBridge::new(&BridgeSettings {
        runtime: Runtime::Python,
        modules: vec![module],
        timeout: Duration::from_millis(200),
    });

    let started = Instant::now();
    let err = bridge.call("slow", &[]).unwrap_err();
    assert!(matches!(err, BridgeError::Timeout { ref function, .. } if function == "slow"), "{err:?}");
    assert_eq!(err.to_string(), "python call to slow() timed out after 200ms");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn python_non_callable_and_non_json_results() {
    if !available(Runtime::Python) {
        eprintln!("skipping: python not installed");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let module = write_module(dir.path(), "calc.py", PYTHON_MODULE);
    let bridge = bridge(Runtime::Python, module);

    let err = bridge.call("LIMIT", &[]).unwrap_err();
    assert!(matches!(err, BridgeError::NotCallable { ref function } if function == "LIMIT"), "{err:?}");

    let err = bridge.call("not_a_number", &[]).unwrap_err();
    assert!(matches!(err, BridgeError::ExternalFunction { .. }), "{err:?}");
}

#[test]
fn node_round_trip() {
    if !available(Runtime::Node) {
        eprintln!("skipping: node not installed");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let module = write_module(dir.path(), "calc.js", NODE_MODULE);
    exercise(&bridge(Runtime::Node, module));
}

#[test]
fn full_run_against_a_python_project() {
    if !available(Runtime::Python) {
        eprintln!("skipping: python not installed");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    write_module(dir.path(), "calc.py", PYTHON_MODULE);
    fs::write(
        dir.path().join(config::CONFIG_FILE_NAME),
        "runtime: python\nmodules:\n  - calc.py\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("calc.verdict"),
        "area:\n  given:\n    w: 3\n  when:\n    - a = area(w, 5)\n  then:\n    - \"expect: a == 15\"\n\
         builtin still wins:\n  when:\n    - s = add(1, 1)\n  then:\n    - \"expect: s == 2\"\n",
    )
    .unwrap();

    let config = config::load(dir.path()).unwrap();
    let options = RunOptions {
        path: dir.path().to_path_buf(),
        ..RunOptions::default()
    };
    let mut reporter = JsonReporter::new(Vec::new());
    let summary = run_once(&options, &config, &DefaultTestDiscovery, &DefaultBridgeFactory, &mut reporter).unwrap();
    assert_eq!((summary.total, summary.passed), (2, 2));
}
