//! Fuzz target for whole label file parsing.
//!
//! This fuzzer feeds arbitrary UTF-8 documents to the label file parser,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use labelplus::format::fuzz_parse_label_str;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_parse_label_str(text);
});
