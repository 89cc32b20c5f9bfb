//! Record model and create-payload validation
//!
//! `RecordDraft` is the untyped payload as it arrives; `NewRecord` only
//! exists once all three required fields are present and non-empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Persisted record. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub external_code: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Candidate fields for a new record, exactly as submitted.
///
/// Every field is optional here so that an absent or `null` field reaches
/// validation instead of failing deserialization with a less useful error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub external_code: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl RecordDraft {
    pub fn new(
        name: impl Into<String>,
        external_code: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            external_code: Some(external_code.into()),
            category: Some(category.into()),
        }
    }
}

/// Validated fields for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    name: String,
    external_code: String,
    category: String,
}

impl NewRecord {
    /// Validate presence of all required fields.
    ///
    /// A field counts as missing when it is absent, `null`, or the empty
    /// string. Whitespace is a value. Values are kept exactly as submitted.
    ///
    /// # Example
    /// ```
    /// use roster_server::models::{NewRecord, RecordDraft};
    ///
    /// assert!(NewRecord::try_from(RecordDraft::new("Ana", "X1", "CS")).is_ok());
    /// assert!(NewRecord::try_from(RecordDraft::new("Ana", "", "CS")).is_err());
    /// ```
    pub fn validate(draft: RecordDraft) -> Result<Self, ValidationError> {
        match (
            present(draft.name),
            present(draft.external_code),
            present(draft.category),
        ) {
            (Some(name), Some(external_code), Some(category)) => Ok(Self {
                name,
                external_code,
                category,
            }),
            (name, external_code, category) => {
                let fields = [
                    ("name", name.is_none()),
                    ("externalCode", external_code.is_none()),
                    ("category", category.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, missing)| missing.then_some(field))
                .collect();

                Err(ValidationError::Missing { fields })
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn external_code(&self) -> &str {
        &self.external_code
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl TryFrom<RecordDraft> for NewRecord {
    type Error = ValidationError;

    fn try_from(draft: RecordDraft) -> Result<Self, Self::Error> {
        Self::validate(draft)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_draft() {
        let record = NewRecord::validate(RecordDraft::new("Ana", "X1", "CS")).unwrap();
        assert_eq!(record.name(), "Ana");
        assert_eq!(record.external_code(), "X1");
        assert_eq!(record.category(), "CS");
    }

    #[test]
    fn keeps_values_untrimmed() {
        let record = NewRecord::validate(RecordDraft::new(" Ana ", "X1", "CS")).unwrap();
        assert_eq!(record.name(), " Ana ");
    }

    #[test]
    fn rejects_empty_field() {
        let err = NewRecord::validate(RecordDraft::new("Ana", "", "CS")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Missing {
                fields: vec!["externalCode"]
            }
        );
    }

    #[test]
    fn whitespace_counts_as_present() {
        let new = NewRecord::validate(RecordDraft::new("   ", "X1", "\t")).unwrap();
        assert_eq!(new.name(), "   ");
        assert_eq!(new.category(), "\t");
    }

    #[test]
    fn reports_every_missing_field() {
        let err = NewRecord::validate(RecordDraft::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Missing {
                fields: vec!["name", "externalCode", "category"]
            }
        );
    }

    #[test]
    fn draft_deserializes_camel_case_and_nulls() {
        let draft: RecordDraft =
            serde_json::from_str(r#"{"name": "Ana", "externalCode": null}"#).unwrap();
        assert_eq!(draft.name.as_deref(), Some("Ana"));
        assert_eq!(draft.external_code, None);
        assert_eq!(draft.category, None);
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = Record {
            id: 7,
            name: "Ana".into(),
            external_code: "X1".into(),
            category: "CS".into(),
            created_at: DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["externalCode"], "X1");
        assert_eq!(value["createdAt"], "2024-05-01T10:00:00Z");
    }
}
