//! Single-test execution.
//!
//! A test moves through `Setup → Executing → Verifying → Done`. The first failing statement or assertion ends
//! the test; later steps are not run.

use std::fmt;
use std::time::{Duration, Instant};

use verdict_core::Value;
use verdict_syntax::TestCase;

use super::context::Context;
use super::error::EvalError;
use super::expectation::check_str;
use super::statement::execute_str;
use crate::bridge::Bridge;

/// Step group a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    When,
    Then,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::When => "when",
            Phase::Then => "then",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a test ended.
#[derive(Debug)]
pub enum TestOutcome {
    Passed,
    /// An assertion evaluated cleanly but did not hold.
    AssertionFailed {
        assertion: String,
        actual: Value,
        expected: Value,
    },
    /// A statement or assertion raised an error.
    Errored {
        phase: Phase,
        step: String,
        error: EvalError,
    },
}

/// Result of running one test.
#[derive(Debug)]
pub struct TestResult {
    pub name: String,
    pub confidence: f64,
    pub duration: Duration,
    pub outcome: TestOutcome,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, TestOutcome::Passed)
    }

    /// Failure description, prefixed by the phase it happened in. `None` for passing tests.
    pub fn error_message(&self) -> Option<String> {
        match &self.outcome {
            TestOutcome::Passed => None,
            TestOutcome::AssertionFailed { assertion, .. } => Some(format!("Expectation failed: {assertion}")),
            TestOutcome::Errored {
                phase: Phase::Then,
                step,
                error,
            } => Some(format!("Failed to check expectation '{step}': {error}")),
            TestOutcome::Errored { step, error, .. } => Some(format!("Failed to execute statement '{step}': {error}")),
        }
    }

    /// Evaluated left operand of the failing assertion.
    pub fn actual(&self) -> Option<&Value> {
        match &self.outcome {
            TestOutcome::AssertionFailed { actual, .. } => Some(actual),
            _ => None,
        }
    }

    /// Evaluated right operand (or `"<op> <right>"` for textual operators) of the failing assertion.
    pub fn expected(&self) -> Option<&Value> {
        match &self.outcome {
            TestOutcome::AssertionFailed { expected, .. } => Some(expected),
            _ => None,
        }
    }

    /// Step group the failure happened in.
    pub fn failed_phase(&self) -> Option<Phase> {
        match &self.outcome {
            TestOutcome::Passed => None,
            TestOutcome::AssertionFailed { .. } => Some(Phase::Then),
            TestOutcome::Errored { phase, .. } => Some(*phase),
        }
    }
}

enum State<'t, 'b> {
    Setup,
    Executing(Context<'b>, std::slice::Iter<'t, String>),
    Verifying(Context<'b>, std::slice::Iter<'t, String>),
    Done(TestOutcome),
}

/// Run one test to completion.
///
/// ## Parameters
/// - `test`: the test to run; never mutated.
/// - `bridge`: external-function capability for calls no built-in handles.
///
/// ## Returns
/// - A [`TestResult`]; confidence is always copied from the test, and the duration covers setup through the
///   final state.
#[tracing::instrument(skip_all, fields(test = %test.name))]
pub fn run_test(test: &TestCase, bridge: Option<&dyn Bridge>) -> TestResult {
    let start = Instant::now();
    let mut state = State::Setup;

    let outcome = loop {
        state = match state {
            State::Setup => {
                let mut ctx = Context::with_bridge(bridge);
                for (name, value) in &test.given {
                    ctx.bind(name.as_str(), verdict_core::json::from_json(value));
                }
                State::Executing(ctx, test.when.iter())
            }
            State::Executing(mut ctx, mut steps) => match steps.next() {
                Some(step) => match execute_str(step, &mut ctx) {
                    Ok(()) => State::Executing(ctx, steps),
                    Err(error) => State::Done(TestOutcome::Errored {
                        phase: Phase::When,
                        step: step.clone(),
                        error,
                    }),
                },
                None => State::Verifying(ctx, test.then.iter()),
            },
            State::Verifying(ctx, mut steps) => match steps.next() {
                Some(step) => match check_str(step, &ctx) {
                    Ok(outcome) if outcome.passed => State::Verifying(ctx, steps),
                    Ok(outcome) => State::Done(TestOutcome::AssertionFailed {
                        assertion: step.clone(),
                        actual: outcome.actual,
                        expected: outcome.expected,
                    }),
                    Err(error) => State::Done(TestOutcome::Errored {
                        phase: Phase::Then,
                        step: step.clone(),
                        error,
                    }),
                },
                None => State::Done(TestOutcome::Passed),
            },
            State::Done(outcome) => break outcome,
        };
    };

    let result = TestResult {
        name: test.name.clone(),
        confidence: test.confidence,
        duration: start.elapsed(),
        outcome,
    };
    tracing::debug!(passed = result.passed(), elapsed_ms = result.duration.as_millis() as u64, "test finished");
    result
}
