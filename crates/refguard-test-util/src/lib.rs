//! Shared test utilities for the refguard workspace.
//!
//! This crate exists because `xtask` needs `normalize_nondeterministic` at runtime (not
//! behind `#[cfg(test)]`), so a `#[cfg(test)]` module inside `refguard-types` would not
//! suffice.

use serde_json::Value;

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// 1. **Root-only**: `tool.version` becomes `"__VERSION__"` only when the root object looks
///    like a report envelope (`schema`, `tool`, `run`, `verdict`, `findings`). Finding `data`
///    payloads that happen to have the same shape are left alone.
/// 2. **Recursive**: `started_at`, `ended_at` and `duration_ms` are normalized at any depth;
///    their placeholders cannot collide with real data.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("run")
            && obj.contains_key("verdict")
            && obj.contains_key("findings");
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("name")
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

/// Replace every occurrence of `prefix` inside string values with `placeholder`.
///
/// Reports embed the rules and reference file paths, which differ per checkout and per
/// temp directory. Backslashes are folded to `/` first so Windows paths compare equal.
pub fn normalize_path_prefix(mut value: Value, prefix: &str, placeholder: &str) -> Value {
    let prefix = prefix.replace('\\', "/");
    replace_in_strings(&mut value, &prefix, placeholder);
    value
}

fn replace_in_strings(value: &mut Value, prefix: &str, placeholder: &str) {
    match value {
        Value::String(s) => {
            let folded = s.replace('\\', "/");
            if folded.contains(prefix) {
                *s = folded.replace(prefix, placeholder);
            }
        }
        Value::Object(map) => {
            for val in map.values_mut() {
                replace_in_strings(val, prefix, placeholder);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                replace_in_strings(val, prefix, placeholder);
            }
        }
        _ => {}
    }
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "ended_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            if map.contains_key("duration_ms") {
                map.insert("duration_ms".to_string(), Value::Number(0.into()));
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_only_touches_envelope_tool_version() {
        let input = json!({
            "schema": "refguard.report.v1",
            "tool": { "name": "refguard", "version": "0.1.0" },
            "run": { "started_at": "2026-01-01T00:00:00Z", "ended_at": "2026-01-01T00:00:01Z", "duration_ms": 12 },
            "verdict": { "status": "warn" },
            "findings": [
                { "data": { "tool": { "name": "msbuild", "version": "17.0" } } }
            ]
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], "__VERSION__");
        assert_eq!(result["tool"]["name"], "refguard");
        assert_eq!(result["run"]["started_at"], "__TIMESTAMP__");
        assert_eq!(result["run"]["ended_at"], "__TIMESTAMP__");
        assert_eq!(result["run"]["duration_ms"], 0);
        assert_eq!(result["findings"][0]["data"]["tool"]["version"], "17.0");
    }

    #[test]
    fn non_envelope_keeps_tool_version() {
        let input = json!({ "tool": { "name": "x", "version": "1" } });
        let result = normalize_nondeterministic(input);
        assert_eq!(result["tool"]["version"], "1");
    }

    #[test]
    fn path_prefix_is_replaced_everywhere() {
        let input = json!({
            "data": { "rules_file": "C:\\work\\repo\\DependencyRules.json" },
            "findings": [ { "location": { "path": "C:/work/repo/DependencyRules.json" } } ],
            "other": "unrelated"
        });

        let result = normalize_path_prefix(input, "C:\\work\\repo", "__ROOT__");

        assert_eq!(result["data"]["rules_file"], "__ROOT__/DependencyRules.json");
        assert_eq!(
            result["findings"][0]["location"]["path"],
            "__ROOT__/DependencyRules.json"
        );
        assert_eq!(result["other"], "unrelated");
    }
}
