use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a reference finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - source (edge source, or exception `From` as written)
/// - target (edge target, or exception `To` as written)
/// - rule description
pub fn fingerprint_for_reference(
    check_id: &str,
    code: &str,
    source: &str,
    target: &str,
    rule_description: &str,
) -> String {
    let canonical = [check_id, code, source, target, rule_description].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
