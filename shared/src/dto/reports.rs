//! # Report DTOs
//!
//! A report is the checklist response tied to an assignment. Its
//! `checklist_schema` is a versioned snapshot of sections and items, with the
//! reporter's answers stored inline on each item.
//!
//! Schema structs keep unknown fields in `extra` so a draft written back to the
//! server does not drop fields this crate does not model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{ListingTypeRef, Status, UserRef};

/// Nil UUID the backend uses for "no report yet".
pub const NIL_REPORT_ID: &str = "00000000-0000-0000-0000-000000000000";

/// True when `id` names a real report.
pub fn is_valid_report_id(id: &str) -> bool {
    !id.trim().is_empty() && id != NIL_REPORT_ID
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MediaRef {
    pub id: String,
    pub url: String,
    pub media_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub media: Vec<MediaRef>,
}

/// Answer type as embedded in a report schema (no numeric id)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaAnswerType {
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaItem {
    pub id: i64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    pub answer_types: SchemaAnswerType,
    #[serde(default)]
    pub media_requirement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_allowed_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_max_files: Option<u32>,
    #[serde(default)]
    pub answer: Answer,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaSection {
    pub id: i64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub items: Vec<SchemaItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChecklistSchema {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub sections: Vec<SchemaSection>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChecklistSchema {
    /// The backend sends `{}` until the schema has been generated.
    pub fn is_generated(&self) -> bool {
        !self.sections.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &SchemaItem> {
        self.sections.iter().flat_map(|s| s.items.iter())
    }
}

/// Full listing record as embedded in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportListing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_picture: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub listing_type: ListingTypeRef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub id: String,
    #[serde(default)]
    pub assignment_id: String,
    #[serde(default)]
    pub purpose: String,
    pub status: Status,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist_schema: Option<ChecklistSchema>,
    #[serde(default)]
    pub listing: ReportListing,
    #[serde(default)]
    pub reporter: UserRef,
    /// Present on action responses (`submit`, `refuse`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Report {
    pub fn state(&self) -> Option<ReportState> {
        ReportState::from_slug(&self.status.slug)
    }

    /// Schema, if the backend has finished generating it.
    pub fn generated_schema(&self) -> Option<&ChecklistSchema> {
        self.checklist_schema.as_ref().filter(|s| s.is_generated())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MyReportsResponse {
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Body of `POST /reports/my/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveDraftRequest {
    pub checklist_schema: ChecklistSchema,
}

/// Report lifecycle as catalogued by the backend (ids 1..=6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportState {
    Generating,
    Draft,
    Submitted,
    Approved,
    Rejected,
    FailedGeneration,
}

impl ReportState {
    pub const ALL: [ReportState; 6] = [
        ReportState::Generating,
        ReportState::Draft,
        ReportState::Submitted,
        ReportState::Approved,
        ReportState::Rejected,
        ReportState::FailedGeneration,
    ];

    pub fn id(self) -> i64 {
        match self {
            ReportState::Generating => 1,
            ReportState::Draft => 2,
            ReportState::Submitted => 3,
            ReportState::Approved => 4,
            ReportState::Rejected => 5,
            ReportState::FailedGeneration => 6,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ReportState::Generating => "generating",
            ReportState::Draft => "draft",
            ReportState::Submitted => "submitted",
            ReportState::Approved => "approved",
            ReportState::Rejected => "rejected",
            ReportState::FailedGeneration => "failed_generation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportState::Generating => "Генерация",
            ReportState::Draft => "Черновик",
            ReportState::Submitted => "Сдан на проверку",
            ReportState::Approved => "Одобрен",
            ReportState::Rejected => "Отклонен",
            ReportState::FailedGeneration => "Ошибка генерации",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Only drafts accept answers.
    pub fn is_editable(self) -> bool {
        self == ReportState::Draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nil_report_id_is_invalid() {
        assert!(!is_valid_report_id(NIL_REPORT_ID));
        assert!(!is_valid_report_id(""));
        assert!(is_valid_report_id("5b0c6a0e-1111-2222-3333-444455556666"));
    }

    #[test]
    fn test_empty_schema_object_is_not_generated() {
        let report: Report = serde_json::from_str(
            r#"{"id":"r1","status":{"id":1,"slug":"generating","name":"Генерация"},"checklist_schema":{}}"#,
        )
        .unwrap();
        assert!(report.generated_schema().is_none());
        assert_eq!(report.state(), Some(ReportState::Generating));
    }

    #[test]
    fn test_schema_keeps_unknown_fields() {
        let json = serde_json::json!({
            "version": "3",
            "sections": [{
                "id": 1, "slug": "room", "title": "Room", "sort_order": 1,
                "items": [{
                    "id": 10, "slug": "clean", "title": "Clean", "sort_order": 1,
                    "answer_types": {"slug": "boolean", "name": "Да/Нет"},
                    "media_requirement": "optional",
                    "answer": {"media": []},
                    "weight": 2
                }]
            }]
        });
        let schema: ChecklistSchema = serde_json::from_value(json).unwrap();
        assert_eq!(schema.sections[0].items[0].extra["weight"], 2);
        let back = serde_json::to_value(&schema).unwrap();
        assert_eq!(back["sections"][0]["items"][0]["weight"], 2);
    }
}
