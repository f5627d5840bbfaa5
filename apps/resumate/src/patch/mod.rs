//! Field patch engine — generic get/set-by-path over the resume record.
//!
//! Paths are dot-separated (`contact.email`, `experience.1.description`):
//! numeric segments index into ordered sequences, everything else addresses a
//! named field. Reads through a missing node return `None`; writes fail
//! closed — an unresolvable path, out-of-bounds index, or traversal through a
//! scalar is rejected and nothing is applied. Setting past the end of a
//! sequence is not supported.

pub mod ledger;

use serde_json::Value;
use thiserror::Error;

use crate::models::ResumeRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("empty field path")]
    EmptyPath,

    #[error("field `{path}` does not resolve at `{segment}`")]
    Unresolved { path: String, segment: String },

    #[error("index {index} out of bounds at `{path}`")]
    IndexOutOfBounds { path: String, index: usize },

    #[error("cannot descend into a scalar at `{segment}` in `{path}`")]
    NotAContainer { path: String, segment: String },

    #[error("value is not compatible with field `{path}`: {reason}")]
    Incompatible { path: String, reason: String },

    #[error("no applied suggestion recorded for `{field}`")]
    NothingToUndo { field: String },
}

/// One step of a parsed field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// A parsed, validated field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, PatchError> {
        if raw.is_empty() {
            return Err(PatchError::EmptyPath);
        }
        let mut segments = Vec::new();
        for part in raw.split('.') {
            if part.is_empty() {
                return Err(PatchError::Unresolved {
                    path: raw.to_string(),
                    segment: "<empty segment>".to_string(),
                });
            }
            match part.parse::<usize>() {
                Ok(index) => segments.push(PathSegment::Index(index)),
                Err(_) => segments.push(PathSegment::Key(part.to_string())),
            }
        }
        Ok(FieldPath {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Resolves a path against a JSON value. Missing intermediates yield `None`
/// rather than an error.
pub fn get_field<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut current = root;
    for segment in &path.segments {
        current = match segment {
            PathSegment::Key(key) => current.as_object()?.get(key)?,
            PathSegment::Index(index) => current.as_array()?.get(*index)?,
        };
    }
    Some(current)
}

/// Returns a new value with exactly the node at `path` replaced. The input is
/// never mutated; every node the path does not touch carries over unchanged.
pub fn set_field(root: &Value, path: &FieldPath, value: Value) -> Result<Value, PatchError> {
    let mut next = root.clone();
    let mut current = &mut next;

    for (i, segment) in path.segments.iter().enumerate() {
        let last = i + 1 == path.segments.len();
        match segment {
            PathSegment::Key(key) => {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| PatchError::NotAContainer {
                        path: path.raw.clone(),
                        segment: key.clone(),
                    })?;
                let slot = obj.get_mut(key).ok_or_else(|| PatchError::Unresolved {
                    path: path.raw.clone(),
                    segment: key.clone(),
                })?;
                if last {
                    *slot = value;
                    return Ok(next);
                }
                current = slot;
            }
            PathSegment::Index(index) => {
                let arr = current
                    .as_array_mut()
                    .ok_or_else(|| PatchError::NotAContainer {
                        path: path.raw.clone(),
                        segment: index.to_string(),
                    })?;
                if *index >= arr.len() {
                    return Err(PatchError::IndexOutOfBounds {
                        path: path.raw.clone(),
                        index: *index,
                    });
                }
                let slot = &mut arr[*index];
                if last {
                    *slot = value;
                    return Ok(next);
                }
                current = slot;
            }
        }
    }
    unreachable!("FieldPath::parse guarantees at least one segment")
}

/// Typed read: resolves a path against the serialized form of the record.
pub fn get_record_field(record: &ResumeRecord, path: &FieldPath) -> Option<Value> {
    let root = serde_json::to_value(record).ok()?;
    get_field(&root, path).cloned()
}

/// Typed write: applies a patch and decodes back into a record. A value the
/// record's schema cannot hold (e.g. a string where a sequence lives) is
/// rejected as `Incompatible` with nothing applied.
pub fn set_record_field(
    record: &ResumeRecord,
    path: &FieldPath,
    value: Value,
) -> Result<ResumeRecord, PatchError> {
    let root = serde_json::to_value(record).map_err(|e| PatchError::Incompatible {
        path: path.raw.clone(),
        reason: e.to_string(),
    })?;
    let patched = set_field(&root, path, value)?;
    serde_json::from_value(patched).map_err(|e| PatchError::Incompatible {
        path: path.raw.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Experience, ResumeRecord};
    use serde_json::json;

    fn sample_record() -> ResumeRecord {
        ResumeRecord {
            full_name: "Ada Lovelace".to_string(),
            title: "Engineer".to_string(),
            experience: vec![
                Experience {
                    id: "e0".to_string(),
                    company: "Analytical Engines Ltd".to_string(),
                    role: "Programmer".to_string(),
                    date: "1842".to_string(),
                    description: "Wrote the first program".to_string(),
                },
                Experience {
                    id: "e1".to_string(),
                    company: "Babbage & Co".to_string(),
                    role: "Consultant".to_string(),
                    date: "1843".to_string(),
                    description: "Annotated the memoir".to_string(),
                },
            ],
            ..Default::default()
        }
    }

    // ── path parsing ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_mixed_segments() {
        let path = FieldPath::parse("experience.1.description").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("experience".to_string()),
                PathSegment::Index(1),
                PathSegment::Key("description".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(FieldPath::parse(""), Err(PatchError::EmptyPath));
        assert!(FieldPath::parse("a..b").is_err());
    }

    // ── get_field ───────────────────────────────────────────────────────────

    #[test]
    fn test_get_nested_contact_field() {
        let root = json!({"contact": {"email": "ada@example.com"}});
        let path = FieldPath::parse("contact.email").unwrap();
        assert_eq!(get_field(&root, &path), Some(&json!("ada@example.com")));
    }

    #[test]
    fn test_get_through_missing_node_is_none() {
        let root = json!({"contact": {}});
        let path = FieldPath::parse("contact.email.domain").unwrap();
        assert_eq!(get_field(&root, &path), None);

        let path = FieldPath::parse("experience.5.role").unwrap();
        assert_eq!(get_field(&root, &path), None);
    }

    // ── set_field ───────────────────────────────────────────────────────────

    #[test]
    fn test_set_does_not_mutate_input() {
        let root = json!({"title": "Engineer"});
        let path = FieldPath::parse("title").unwrap();
        let next = set_field(&root, &path, json!("Senior Engineer")).unwrap();
        assert_eq!(root["title"], "Engineer");
        assert_eq!(next["title"], "Senior Engineer");
    }

    #[test]
    fn test_set_indexed_entry() {
        let root = serde_json::to_value(sample_record()).unwrap();
        let path = FieldPath::parse("experience.1.description").unwrap();
        let next = set_field(&root, &path, json!("Led the annotation effort")).unwrap();
        assert_eq!(next["experience"][1]["description"], "Led the annotation effort");
        // Untouched siblings carry over unchanged.
        assert_eq!(next["experience"][0], root["experience"][0]);
    }

    #[test]
    fn test_set_missing_key_fails_closed() {
        let root = json!({"contact": {}});
        let path = FieldPath::parse("contact.fax").unwrap();
        let err = set_field(&root, &path, json!("x")).unwrap_err();
        assert!(matches!(err, PatchError::Unresolved { .. }));
    }

    #[test]
    fn test_set_past_end_of_sequence_rejected() {
        let root = json!({"experience": [{"role": "a"}]});
        let path = FieldPath::parse("experience.3.role").unwrap();
        let err = set_field(&root, &path, json!("x")).unwrap_err();
        assert_eq!(
            err,
            PatchError::IndexOutOfBounds {
                path: "experience.3.role".to_string(),
                index: 3
            }
        );
    }

    #[test]
    fn test_set_through_scalar_rejected() {
        let root = json!({"title": "Engineer"});
        let path = FieldPath::parse("title.length").unwrap();
        let err = set_field(&root, &path, json!("x")).unwrap_err();
        assert!(matches!(err, PatchError::NotAContainer { .. }));
    }

    // ── typed round trip ────────────────────────────────────────────────────

    #[test]
    fn test_record_patch_round_trip_invertible() {
        let record = sample_record();
        for raw in [
            "title",
            "contact.email",
            "experience.0.description",
            "experience.1.role",
        ] {
            let path = FieldPath::parse(raw).unwrap();
            let original = get_record_field(&record, &path).unwrap();

            let patched = set_record_field(&record, &path, json!("replacement")).unwrap();
            assert_eq!(
                get_record_field(&patched, &path).unwrap(),
                json!("replacement"),
                "read-after-write at {raw}"
            );

            let restored = set_record_field(&patched, &path, original).unwrap();
            assert_eq!(restored, record, "invertibility at {raw}");
        }
    }

    #[test]
    fn test_record_patch_incompatible_value_rejected() {
        let record = sample_record();
        let path = FieldPath::parse("experience").unwrap();
        let err = set_record_field(&record, &path, json!("not a sequence")).unwrap_err();
        assert!(matches!(err, PatchError::Incompatible { .. }));
    }
}
