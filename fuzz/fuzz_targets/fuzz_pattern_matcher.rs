//! Fuzz target for wildcard pattern matching.
//!
//! Goal: matching **never panics**, and a few properties hold for every input:
//! - a `*`-free name always matches itself
//! - prefixing a pattern with `*` never turns a match into a miss
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_pattern_matcher
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct MatchInput {
    pattern: String,
    candidate: String,
}

fuzz_target!(|input: MatchInput| {
    if input.pattern.len() > 256 || input.candidate.len() > 512 {
        return;
    }

    let matched = refguard_domain::matches(&input.pattern, &input.candidate);

    if matched {
        let widened = format!("*{}", input.pattern);
        assert!(refguard_domain::matches(&widened, &input.candidate));
    }

    if !input.candidate.contains('*') {
        assert!(refguard_domain::matches(&input.candidate, &input.candidate));
    }
});
