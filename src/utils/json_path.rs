//! Dot-notation path lookup for JSON response bodies.
//!
//! Supports nested keys and array indexing (e.g. `choices[0].message.content`,
//! or the dot-index form `choices.0.message.content`). A leading `$.` is
//! accepted and ignored.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Missing '{segment}' at {path}")]
    Missing { path: String, segment: String },

    #[error("Expected {expected} at {path}, found {actual}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

impl Segment<'_> {
    fn label(&self) -> String {
        match self {
            Segment::Key(k) => k.to_string(),
            Segment::Index(i) => format!("[{}]", i),
        }
    }
}

fn parse(path: &str) -> Result<Vec<Segment<'_>>, PathError> {
    let normalized = path.trim();
    let normalized = normalized.strip_prefix("$.").unwrap_or(normalized);
    if normalized.is_empty() {
        return Err(PathError::InvalidPath("empty path".to_string()));
    }

    let mut segments = Vec::new();
    for part in normalized.split('.') {
        if part.is_empty() {
            return Err(PathError::InvalidPath(path.to_string()));
        }

        // "choices[0]" or "matrix[1][2]"
        let (key, mut rest) = match part.find('[') {
            Some(pos) => (&part[..pos], &part[pos..]),
            None => (part, ""),
        };

        if !key.is_empty() {
            match key.parse::<usize>() {
                Ok(idx) if rest.is_empty() => segments.push(Segment::Index(idx)),
                _ => segments.push(Segment::Key(key)),
            }
        }

        while !rest.is_empty() {
            let close = rest
                .find(']')
                .ok_or_else(|| PathError::InvalidPath(path.to_string()))?;
            let idx = rest[1..close]
                .parse::<usize>()
                .map_err(|_| PathError::InvalidPath(path.to_string()))?;
            segments.push(Segment::Index(idx));
            rest = &rest[close + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                return Err(PathError::InvalidPath(path.to_string()));
            }
        }
    }
    Ok(segments)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolve `path` inside `root`, reporting the first segment that is absent.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Result<&'a Value, PathError> {
    let mut current = root;
    let mut walked = String::from("$");

    for segment in parse(path)? {
        let next = match (&segment, current) {
            (Segment::Key(k), Value::Object(map)) => map.get(*k),
            (Segment::Index(i), Value::Array(arr)) => arr.get(*i),
            _ => None,
        };
        current = next.ok_or_else(|| PathError::Missing {
            path: walked.clone(),
            segment: segment.label(),
        })?;
        match segment {
            Segment::Key(k) => {
                walked.push('.');
                walked.push_str(k);
            }
            Segment::Index(i) => walked.push_str(&format!("[{}]", i)),
        }
    }

    Ok(current)
}

/// Resolve `path` and require a string value.
pub fn get_str<'a>(root: &'a Value, path: &str) -> Result<&'a str, PathError> {
    let value = get_path(root, path)?;
    value.as_str().ok_or_else(|| PathError::TypeMismatch {
        path: path.to_string(),
        expected: "string",
        actual: type_name(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "choices": [
                {"message": {"content": "hello"}},
                {"message": {"content": 7}}
            ],
            "grid": [[1, 2], [3, 4]]
        })
    }

    #[test]
    fn resolves_indexed_paths() {
        let v = sample();
        assert_eq!(get_str(&v, "choices[0].message.content").unwrap(), "hello");
        assert_eq!(get_str(&v, "$.choices.0.message.content").unwrap(), "hello");
        assert_eq!(get_path(&v, "grid[1][0]").unwrap(), &json!(3));
    }

    #[test]
    fn reports_first_missing_segment() {
        let v = json!({"choices": []});
        let err = get_path(&v, "choices[0].message.content").unwrap_err();
        assert_eq!(
            err,
            PathError::Missing {
                path: "$.choices".to_string(),
                segment: "[0]".to_string()
            }
        );
        assert_eq!(err.to_string(), "Missing '[0]' at $.choices");
    }

    #[test]
    fn key_on_non_object_is_missing() {
        let v = json!({"choices": "nope"});
        let err = get_path(&v, "choices.message").unwrap_err();
        assert!(matches!(err, PathError::Missing { .. }));
    }

    #[test]
    fn non_string_is_a_type_mismatch() {
        let err = get_str(&sample(), "choices[1].message.content").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected string at choices[1].message.content, found number"
        );
    }

    #[test]
    fn rejects_malformed_paths() {
        let v = sample();
        for bad in ["", "$.", "choices..message", "choices[x]", "choices[0", "choices[0]x"] {
            assert!(
                matches!(get_path(&v, bad), Err(PathError::InvalidPath(_))),
                "path {:?} should be rejected",
                bad
            );
        }
    }
}
