//! # Journal DTOs
//!
//! A reporter's history of completed stays.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::ListingTypeRef;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JournalListing {
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_picture: Option<String>,
    #[serde(default)]
    pub listing_type: ListingTypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    #[serde(default)]
    pub created_at: String,
    pub listing: JournalListing,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub checkin_date: String,
    #[serde(default)]
    pub checkout_date: String,
    #[serde(default)]
    pub checklist_schema: Value,
    #[serde(default)]
    pub status_slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JournalResponse {
    #[serde(default)]
    pub entries: Vec<JournalEntry>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
}
