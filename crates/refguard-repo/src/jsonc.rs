//! Relaxed JSON: `//` and `/* */` comments and trailing commas are removed before the text
//! reaches `serde_json`. Object keys are folded to lowercase afterwards so field lookup
//! ignores case.

use serde_json::{Map, Value};

/// Rewrite JSON-with-comments into strict JSON. String contents are never touched.
pub fn sanitize(text: &str) -> Result<String, String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let stripped = strip_comments(text)?;
    Ok(strip_trailing_commas(&stripped))
}

fn strip_comments(text: &str) -> Result<String, String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                let mut closed = false;
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        closed = true;
                        break;
                    }
                    // Keep line structure so serde_json error positions stay meaningful.
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
                if !closed {
                    return Err("unterminated block comment".to_string());
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(&escaped) = chars.get(i + 1) {
                    out.push(escaped);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                i += 1;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }

    out
}

/// Recursively lowercase every object key.
pub fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let folded: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), fold_keys(v)))
                .collect();
            Value::Object(folded)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}
