#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = verdict_syntax::parse_test_source(Path::new("fuzz.verdict"), s);
    }
});
