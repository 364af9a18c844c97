#![no_main]

use libfuzzer_sys::fuzz_target;
use verdict_syntax::parser::{parse_expectation, parse_expression, parse_statement};

fuzz_target!(|data: &[u8]| {
    // The mini-grammars must never panic, whatever the step text
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_expression(s);
        let _ = parse_statement(s);
        let _ = parse_expectation(s);
    }
});
