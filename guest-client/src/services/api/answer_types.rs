//! # Answer Types and Media Requirements
//!
//! Catalogues referenced by checklist items. Answer types carry optional
//! `meta` (for ratings, the `{min, max}` scale).

use shared::{AnswerType, AnswerTypesResponse, MediaRequirement, MediaRequirementsResponse, UpsertAnswerTypeRequest};

use super::client::ApiClient;
use crate::core::error::ApiError;

#[tracing::instrument(skip(client))]
pub async fn list(client: &ApiClient) -> Result<Vec<AnswerType>, ApiError> {
    let response: AnswerTypesResponse = client.get("/answer_types", true).await?;
    Ok(response.answer_types)
}

#[tracing::instrument(skip(client))]
pub async fn get(client: &ApiClient, id: i64) -> Result<AnswerType, ApiError> {
    client.get(&format!("/answer_types/{id}"), true).await
}

#[tracing::instrument(skip(client))]
pub async fn create(client: &ApiClient, request: &UpsertAnswerTypeRequest) -> Result<AnswerType, ApiError> {
    client.post("/answer_types", request, true).await
}

#[tracing::instrument(skip(client))]
pub async fn update(client: &ApiClient, id: i64, request: &UpsertAnswerTypeRequest) -> Result<AnswerType, ApiError> {
    client.patch(&format!("/answer_types/{id}"), request, true).await
}

#[tracing::instrument(skip(client))]
pub async fn remove(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client
        .delete::<Option<serde_json::Value>>(&format!("/answer_types/{id}"), true)
        .await
        .map(drop)
}

#[tracing::instrument(skip(client))]
pub async fn media_requirements(client: &ApiClient) -> Result<Vec<MediaRequirement>, ApiError> {
    let response: MediaRequirementsResponse = client.get("/staff/media_requirements", true).await?;
    Ok(response.media_requirements)
}
