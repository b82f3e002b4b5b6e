//! # Upload DTOs
//!
//! Media goes straight to object storage through a presigned URL obtained
//! from `POST /uploads/generate-url`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateUrlRequest {
    pub filename: String,
    pub content_type: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum UploadMethod {
    Put,
    Post,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateUrlResponse {
    pub upload_url: String,
    pub method: UploadMethod,
    /// Form fields for POST uploads, sent before the file part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<BTreeMap<String, String>>,
    /// Headers for PUT uploads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
}

/// Storage provider reply to a form upload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResult {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "filePath")]
    pub file_path: Option<String>,
}
