//! Applied-suggestion ledger: transient apply/undo records for AI review.
//!
//! Each applied suggestion snapshots the prior value at its field path so
//! undo can restore it exactly. The ledger holds at most one record per path:
//! re-applying to the same path overwrites the undo target (last write wins).
//! Nothing here is persisted — the ledger lives and dies with the session.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ResumeRecord;
use crate::patch::{get_record_field, set_record_field, FieldPath, PatchError};

/// One suggestion from the review backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSuggestion {
    /// Patch-engine-compatible field path, e.g. `experience.0.description`.
    pub field: String,
    /// Plain replacement text, never a structured value.
    pub suggestion: String,
}

/// The undo record created when a suggestion is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedSuggestion {
    pub field: String,
    pub original_value: Value,
    pub suggestion_value: String,
}

#[derive(Debug, Default)]
pub struct SuggestionLedger {
    applied: Vec<AppliedSuggestion>,
}

impl SuggestionLedger {
    pub fn new() -> Self {
        SuggestionLedger::default()
    }

    /// Applies a suggestion to the record, recording the prior value for
    /// undo. A path that does not resolve in the record is a validation
    /// error and nothing is applied.
    pub fn apply(
        &mut self,
        record: &ResumeRecord,
        suggestion: &AiSuggestion,
    ) -> Result<ResumeRecord, PatchError> {
        let path = FieldPath::parse(&suggestion.field)?;
        let original_value =
            get_record_field(record, &path).ok_or_else(|| PatchError::Unresolved {
                path: suggestion.field.clone(),
                segment: suggestion.field.clone(),
            })?;
        let next = set_record_field(record, &path, Value::String(suggestion.suggestion.clone()))?;

        // One active record per path: a second apply replaces the first,
        // making the value just overwritten the new undo target.
        self.applied.retain(|a| a.field != suggestion.field);
        self.applied.push(AppliedSuggestion {
            field: suggestion.field.clone(),
            original_value,
            suggestion_value: suggestion.suggestion.clone(),
        });
        Ok(next)
    }

    /// Reverts the suggestion applied at `field`, restoring the snapshot and
    /// dropping the record from the active set.
    pub fn undo(&mut self, record: &ResumeRecord, field: &str) -> Result<ResumeRecord, PatchError> {
        let position = self
            .applied
            .iter()
            .position(|a| a.field == field)
            .ok_or_else(|| PatchError::NothingToUndo {
                field: field.to_string(),
            })?;
        let path = FieldPath::parse(field)?;
        let entry = self.applied[position].clone();
        let next = set_record_field(record, &path, entry.original_value)?;
        self.applied.remove(position);
        Ok(next)
    }

    pub fn entry(&self, field: &str) -> Option<&AppliedSuggestion> {
        self.applied.iter().find(|a| a.field == field)
    }

    pub fn is_applied(&self, field: &str) -> bool {
        self.entry(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// Drops all records. Used when a new review round begins.
    pub fn clear(&mut self) {
        self.applied.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_with_title(title: &str) -> ResumeRecord {
        ResumeRecord {
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn suggest(field: &str, text: &str) -> AiSuggestion {
        AiSuggestion {
            field: field.to_string(),
            suggestion: text.to_string(),
        }
    }

    #[test]
    fn test_apply_records_original_value() {
        let record = record_with_title("Engineer");
        let mut ledger = SuggestionLedger::new();

        let next = ledger
            .apply(&record, &suggest("title", "Senior Engineer"))
            .unwrap();
        assert_eq!(next.title, "Senior Engineer");

        let entry = ledger.entry("title").unwrap();
        assert_eq!(entry.original_value, json!("Engineer"));
        assert_eq!(entry.suggestion_value, "Senior Engineer");
    }

    #[test]
    fn test_undo_restores_exact_prior_value() {
        let record = record_with_title("Engineer");
        let mut ledger = SuggestionLedger::new();

        let applied = ledger
            .apply(&record, &suggest("title", "Senior Engineer"))
            .unwrap();
        let restored = ledger.undo(&applied, "title").unwrap();

        assert_eq!(restored, record);
        assert!(!ledger.is_applied("title"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_reapply_after_undo_matches_first_apply() {
        let record = record_with_title("Engineer");
        let mut ledger = SuggestionLedger::new();
        let suggestion = suggest("title", "Senior Engineer");

        let first = ledger.apply(&record, &suggestion).unwrap();
        let undone = ledger.undo(&first, "title").unwrap();
        let second = ledger.apply(&undone, &suggestion).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            ledger.entry("title").unwrap().original_value,
            json!("Engineer")
        );
    }

    #[test]
    fn test_second_apply_overwrites_undo_target() {
        let record = record_with_title("Engineer");
        let mut ledger = SuggestionLedger::new();

        let once = ledger
            .apply(&record, &suggest("title", "Senior Engineer"))
            .unwrap();
        let twice = ledger
            .apply(&once, &suggest("title", "Staff Engineer"))
            .unwrap();
        assert_eq!(twice.title, "Staff Engineer");
        assert_eq!(ledger.len(), 1);

        // Last write wins: undo returns to the value the second apply saw.
        let undone = ledger.undo(&twice, "title").unwrap();
        assert_eq!(undone.title, "Senior Engineer");
    }

    #[test]
    fn test_apply_to_nonexistent_path_is_error() {
        let record = record_with_title("Engineer");
        let mut ledger = SuggestionLedger::new();

        let err = ledger
            .apply(&record, &suggest("experience.0.description", "Better text"))
            .unwrap_err();
        assert!(matches!(err, PatchError::Unresolved { .. }));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_undo_without_apply_is_error() {
        let record = record_with_title("Engineer");
        let mut ledger = SuggestionLedger::new();
        let err = ledger.undo(&record, "title").unwrap_err();
        assert_eq!(
            err,
            PatchError::NothingToUndo {
                field: "title".to_string()
            }
        );
    }
}
