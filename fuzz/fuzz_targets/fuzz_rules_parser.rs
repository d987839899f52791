//! Fuzz target for the dependency rules document parser.
//!
//! Goal: parsing **never panics** on any input, including malformed comments,
//! unbalanced braces and non-UTF-8-looking escapes. Errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_rules_parser
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

    let _ = refguard_repo::fuzz::sanitize_jsonc(text);
    let _ = refguard_repo::fuzz::parse_rules_document(text);
});
