//! # Listing Endpoints
//!
//! Listings, their types, and the admin-only listing creation.

use shared::{
    CreateListingRequest, CreateListingTypeRequest, Listing, ListingType, ListingTypesResponse, ListingsResponse, Page,
    UpdateListingTypeRequest,
};

use super::client::{segment, with_query, ApiClient};
use crate::core::error::ApiError;

#[tracing::instrument(skip(client))]
pub async fn list(client: &ApiClient, page: Page) -> Result<ListingsResponse, ApiError> {
    let params = [("page", page.page.to_string()), ("limit", page.limit.to_string())];
    client.get(&with_query("/listings", &params), true).await
}

#[tracing::instrument(skip(client))]
pub async fn get(client: &ApiClient, id: &str) -> Result<Listing, ApiError> {
    client.get(&format!("/listings/{}", segment(id)), true).await
}

/// The backend answers with an unspecified body; it is not decoded.
#[tracing::instrument(skip(client, request), fields(title = %request.title))]
pub async fn create_listing(client: &ApiClient, request: &CreateListingRequest) -> Result<(), ApiError> {
    client
        .post::<Option<serde_json::Value>, _>("/admin/listings", request, true)
        .await
        .map(drop)
}

#[tracing::instrument(skip(client))]
pub async fn listing_types(client: &ApiClient) -> Result<Vec<ListingType>, ApiError> {
    let response: ListingTypesResponse = client.get("/listing_types", true).await?;
    Ok(response.listing_types)
}

#[tracing::instrument(skip(client))]
pub async fn create_listing_type(client: &ApiClient, request: &CreateListingTypeRequest) -> Result<ListingType, ApiError> {
    client.post("/listing_types", request, true).await
}

#[tracing::instrument(skip(client))]
pub async fn update_listing_type(
    client: &ApiClient,
    id: i64,
    request: &UpdateListingTypeRequest,
) -> Result<ListingType, ApiError> {
    client.patch(&format!("/listing_types/{id}"), request, true).await
}

#[tracing::instrument(skip(client))]
pub async fn delete_listing_type(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client
        .delete::<Option<serde_json::Value>>(&format!("/listing_types/{id}"), true)
        .await
        .map(drop)
}
