//! # Report Endpoints
//!
//! Reporters edit their own drafts under `/reports/my`; staff review
//! submitted reports under `/staff/reports`.

use shared::{ActionMessage, ChecklistSchema, MyReportsResponse, Page, Report, ReportState, SaveDraftRequest};

use super::client::{segment, with_query, ApiClient};
use crate::core::error::ApiError;

fn page_params(page: Page) -> Vec<(&'static str, String)> {
    vec![("page", page.page.to_string()), ("limit", page.limit.to_string())]
}

#[tracing::instrument(skip(client))]
pub async fn my_reports(client: &ApiClient, page: Page) -> Result<MyReportsResponse, ApiError> {
    client.get(&with_query("/reports/my", &page_params(page)), true).await
}

#[tracing::instrument(skip(client))]
pub async fn staff_reports(
    client: &ApiClient,
    page: Page,
    status: Option<ReportState>,
) -> Result<MyReportsResponse, ApiError> {
    let mut params = page_params(page);
    if let Some(state) = status {
        params.push(("status_id", state.id().to_string()));
    }
    client.get(&with_query("/staff/reports", &params), true).await
}

#[tracing::instrument(skip(client))]
pub async fn my_report(client: &ApiClient, id: &str) -> Result<Report, ApiError> {
    client.get(&format!("/reports/my/{}", segment(id)), true).await
}

/// Overwrite the draft's checklist answers. Returns the stored report.
#[tracing::instrument(skip(client, schema), fields(sections = schema.sections.len()))]
pub async fn save_draft(client: &ApiClient, id: &str, schema: &ChecklistSchema) -> Result<Report, ApiError> {
    let body = SaveDraftRequest {
        checklist_schema: schema.clone(),
    };
    client.post(&format!("/reports/my/{}", segment(id)), &body, true).await
}

/// Hand the draft in for review.
#[tracing::instrument(skip(client))]
pub async fn submit(client: &ApiClient, id: &str) -> Result<Option<Report>, ApiError> {
    client
        .patch_empty(&format!("/reports/my/{}/submit", segment(id)), true)
        .await
}

/// Give the assignment back without reporting.
#[tracing::instrument(skip(client))]
pub async fn refuse(client: &ApiClient, id: &str) -> Result<Option<Report>, ApiError> {
    client
        .patch_empty(&format!("/reports/my/{}/refuse", segment(id)), true)
        .await
}

#[tracing::instrument(skip(client))]
pub async fn approve(client: &ApiClient, id: &str) -> Result<Option<ActionMessage>, ApiError> {
    client
        .patch_empty(&format!("/staff/reports/{}/approve", segment(id)), true)
        .await
}

#[tracing::instrument(skip(client))]
pub async fn reject(client: &ApiClient, id: &str) -> Result<Option<ActionMessage>, ApiError> {
    client
        .patch_empty(&format!("/staff/reports/{}/reject", segment(id)), true)
        .await
}

#[tracing::instrument(skip(client))]
pub async fn staff_report(client: &ApiClient, id: &str) -> Result<Report, ApiError> {
    client.get(&format!("/staff/reports/{}", segment(id)), true).await
}
