//! # Secret Guest Reservations
//!
//! Staff view over OTA reservations. Statuses are a fixed catalogue with no
//! endpoint of their own.

use shared::{reservation_statuses, ActionMessage, CreateReservationRequest, ReservationFilters, SgReservationsResponse, Status};

use super::client::{segment, with_query, ApiClient};
use crate::core::error::ApiError;

fn filter_params(filters: &ReservationFilters) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(status) = filters.status_id {
        params.push(("status_id", status.to_string()));
    }
    if let Some(page) = filters.page {
        params.push(("page", page.to_string()));
    }
    if let Some(limit) = filters.limit {
        params.push(("limit", limit.to_string()));
    }
    params
}

#[tracing::instrument(skip(client))]
pub async fn staff_list(client: &ApiClient, filters: &ReservationFilters) -> Result<SgReservationsResponse, ApiError> {
    client
        .get(&with_query("/staff/sg_reservations", &filter_params(filters)), true)
        .await
}

#[tracing::instrument(skip(client))]
pub async fn mark_no_show(client: &ApiClient, id: &str) -> Result<Option<ActionMessage>, ApiError> {
    client
        .patch(
            &format!("/staff/sg_reservations/{}/no-show", segment(id)),
            &serde_json::json!({}),
            true,
        )
        .await
}

#[tracing::instrument(skip(client, request), fields(booking = %request.reservation.booking_number))]
pub async fn create(client: &ApiClient, request: &CreateReservationRequest) -> Result<(), ApiError> {
    client
        .post::<Option<serde_json::Value>, _>("/staff/sg_reservations", request, true)
        .await
        .map(drop)
}

pub fn statuses() -> Vec<Status> {
    reservation_statuses()
}
