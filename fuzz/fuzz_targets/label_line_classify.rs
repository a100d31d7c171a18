//! Fuzz target for single-line classification.
//!
//! This fuzzer feeds arbitrary UTF-8 lines to the line classifier,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use labelplus::format::classify::fuzz_classify_line;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_classify_line(line);
});
