//! Declared-reference file: one edge per line, `Source<TAB>LinkKind<TAB>Target`.

use camino::{Utf8Path, Utf8PathBuf};
use refguard_domain::model::{LinkKind, ReferenceEdge};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReferencesError {
    #[error("declared reference file not found: {path}")]
    NotFound { path: Utf8PathBuf },

    #[error("failed to access declared reference file {path}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}

pub fn load_declared_references(path: &Utf8Path) -> Result<Vec<ReferenceEdge>, ReferencesError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ReferencesError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ReferencesError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_declared_references(&text)
}

/// Parse declared-reference text. Line numbers in errors are 1-based.
pub fn parse_declared_references(text: &str) -> Result<Vec<ReferenceEdge>, ReferencesError> {
    let mut edges = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            continue;
        }
        edges.push(parse_line(line).map_err(|reason| ReferencesError::MalformedLine {
            line: idx + 1,
            reason,
        })?);
    }

    Ok(edges)
}

fn parse_line(line: &str) -> Result<ReferenceEdge, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [source, token, target] = fields.as_slice() else {
        return Err(format!(
            "expected 3 tab-separated fields, found {}",
            fields.len()
        ));
    };

    let Some(kind) = LinkKind::from_token(token) else {
        return Err(format!("unknown link kind '{token}'"));
    };
    if source.is_empty() {
        return Err("empty source".to_string());
    }
    if target.is_empty() {
        return Err("empty target".to_string());
    }

    Ok(ReferenceEdge::new(*source, kind, *target))
}

/// Render edges in the declared-reference format, one line each.
pub fn render_declared_references(edges: &[ReferenceEdge]) -> String {
    let mut out = String::new();
    for edge in edges {
        out.push_str(&edge.to_string());
        out.push('\n');
    }
    out
}

pub fn write_declared_references(
    path: &Utf8Path,
    edges: &[ReferenceEdge],
) -> Result<(), ReferencesError> {
    std::fs::write(path, render_declared_references(edges)).map_err(|source| {
        ReferencesError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}
