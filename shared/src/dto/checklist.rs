//! # Checklist Catalogue DTOs
//!
//! Sections, items, answer types and media requirements managed by staff.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistSection {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub sort_order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_type_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnswerType {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaRequirement {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub slug: String,
    pub sort_order: i64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub listing_type_id: i64,
    #[serde(default)]
    pub listing_type_slug: String,
    #[serde(default)]
    pub media_max_files: u32,
    #[serde(default)]
    pub media_allowed_types: Vec<String>,
    pub answer_type: AnswerType,
    pub media_requirement: MediaRequirement,
    pub section: ChecklistSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistSectionsResponse {
    #[serde(default)]
    pub checklist_sections: Vec<ChecklistSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItemsResponse {
    #[serde(default)]
    pub checklist_items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateSectionRequest {
    pub title: String,
    pub slug: String,
    pub sort_order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_type_id: Option<i64>,
}

/// Partial section update; unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateSectionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_type_id: Option<i64>,
}

impl UpdateSectionRequest {
    pub fn sort_order(sort_order: i64) -> Self {
        Self {
            sort_order: Some(sort_order),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateItemRequest {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub sort_order: i64,
    pub is_active: bool,
    pub listing_type_id: i64,
    pub media_max_files: u32,
    pub media_allowed_types: Vec<String>,
    pub answer_type_id: i64,
    pub media_requirement_id: i64,
    pub section_id: i64,
}

/// Partial item update; unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_type_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_max_files: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_allowed_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_type_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_requirement_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<i64>,
}

impl UpdateItemRequest {
    pub fn sort_order(sort_order: i64) -> Self {
        Self {
            sort_order: Some(sort_order),
            ..Default::default()
        }
    }
}

/// Filters for `GET /staff/checklist_sections`; each list becomes a repeated query key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionFilters {
    pub id: Vec<i64>,
    pub slug: Vec<String>,
    pub listing_type_id: Vec<i64>,
    pub listing_type_slug: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnswerTypesResponse {
    #[serde(default)]
    pub answer_types: Vec<AnswerType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpsertAnswerTypeRequest {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaRequirementsResponse {
    #[serde(default)]
    pub media_requirements: Vec<MediaRequirement>,
}
