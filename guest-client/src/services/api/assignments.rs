//! # Assignment Endpoints
//!
//! Reporter side (`/assignments/my*`, the open pool at `/assignments`) and
//! staff side (`/assignments/{id}`, `/staff/assignments/*`).
//!
//! Accepting or taking an assignment races other reporters. A 409 is the
//! expected outcome of losing that race and comes back as
//! [`ActionOutcome::AlreadyHandled`] rather than an error.

use shared::{ActionMessage, Assignment, AssignmentState, AssignmentsResponse, Listing, Page};

use super::client::{segment, with_query, ApiClient};
use crate::core::error::ApiError;

/// Result of a state-changing action that another actor may have beaten us to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome<T> {
    Done(T),
    /// The backend answered 409: already accepted, declined or taken.
    AlreadyHandled,
}

impl<T> ActionOutcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, ActionOutcome::Done(_))
    }
}

fn tolerate_conflict<T>(result: Result<T, ApiError>) -> Result<ActionOutcome<T>, ApiError> {
    match result {
        Ok(value) => Ok(ActionOutcome::Done(value)),
        Err(err) if err.is_conflict() => {
            tracing::info!("Assignment already handled by someone else");
            Ok(ActionOutcome::AlreadyHandled)
        }
        Err(err) => Err(err),
    }
}

/// Staff filter for `GET /assignments`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffAssignmentsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub reporter_id: Option<String>,
    pub status_id: Vec<i64>,
}

impl StaffAssignmentsQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.unwrap_or(1).to_string()),
            ("limit", self.limit.unwrap_or(50).to_string()),
        ];
        if let Some(reporter) = &self.reporter_id {
            params.push(("reporter_id", reporter.clone()));
        }
        params.extend(self.status_id.iter().map(|id| ("status_id", id.to_string())));
        params
    }
}

/// Assignments offered to or accepted by the current reporter.
#[tracing::instrument(skip(client))]
pub async fn my_assignments(
    client: &ApiClient,
    page: Page,
    status: Option<AssignmentState>,
) -> Result<AssignmentsResponse, ApiError> {
    let mut params = vec![("page", page.page.to_string()), ("limit", page.limit.to_string())];
    if let Some(state) = status {
        params.push(("status", state.slug().to_string()));
    }
    client.get(&with_query("/assignments/my", &params), true).await
}

#[tracing::instrument(skip(client))]
pub async fn my_assignment(client: &ApiClient, id: &str) -> Result<Assignment, ApiError> {
    client.get(&format!("/assignments/my/{}", segment(id)), true).await
}

#[tracing::instrument(skip(client))]
pub async fn accept(client: &ApiClient, id: &str) -> Result<ActionOutcome<Option<ActionMessage>>, ApiError> {
    let result = client
        .patch_empty(&format!("/assignments/my/{}/accept", segment(id)), true)
        .await;
    tolerate_conflict(result)
}

#[tracing::instrument(skip(client))]
pub async fn decline(client: &ApiClient, id: &str) -> Result<Option<ActionMessage>, ApiError> {
    client
        .patch_empty(&format!("/assignments/my/{}/decline", segment(id)), true)
        .await
}

/// Open assignments any reporter may take.
#[tracing::instrument(skip(client))]
pub async fn available(
    client: &ApiClient,
    page: Page,
    listing_type_id: Option<i64>,
) -> Result<AssignmentsResponse, ApiError> {
    let mut params = vec![("page", page.page.to_string()), ("limit", page.limit.to_string())];
    if let Some(listing_type) = listing_type_id {
        params.push(("listing_type_id", listing_type.to_string()));
    }
    client.get(&with_query("/assignments", &params), true).await
}

#[tracing::instrument(skip(client))]
pub async fn take(client: &ApiClient, id: &str) -> Result<ActionOutcome<Option<ActionMessage>>, ApiError> {
    let result = client
        .patch_empty(&format!("/assignments/{}/take", segment(id)), true)
        .await;
    tolerate_conflict(result)
}

#[tracing::instrument(skip(client))]
pub async fn staff_list(client: &ApiClient, query: &StaffAssignmentsQuery) -> Result<AssignmentsResponse, ApiError> {
    client.get(&with_query("/assignments", &query.to_params()), true).await
}

#[tracing::instrument(skip(client))]
pub async fn staff_get(client: &ApiClient, id: &str) -> Result<Assignment, ApiError> {
    client.get(&format!("/assignments/{}", segment(id)), true).await
}

#[tracing::instrument(skip(client))]
pub async fn cancel(client: &ApiClient, id: &str) -> Result<Option<ActionMessage>, ApiError> {
    client
        .patch_empty(&format!("/staff/assignments/{}/cancel", segment(id)), true)
        .await
}

/// Full listing record for an assignment's hotel.
#[tracing::instrument(skip(client))]
pub async fn listing_details(client: &ApiClient, listing_id: &str) -> Result<Listing, ApiError> {
    client.get(&format!("/listings/{}", segment(listing_id)), true).await
}
