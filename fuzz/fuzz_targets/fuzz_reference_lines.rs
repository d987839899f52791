//! Fuzz target for the declared-reference file parser.
//!
//! Goal: parsing **never panics**. A successful parse yields at most one edge per line.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_reference_lines
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(count) = refguard_repo::fuzz::parse_reference_lines(text) {
        assert!(count <= text.lines().count());
    }
});
