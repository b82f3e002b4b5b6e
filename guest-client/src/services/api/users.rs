//! # Users and Profiles

use shared::{Page, Profile, ProfilesResponse, UsersResponse};

use super::client::{segment, with_query, ApiClient};
use crate::core::error::ApiError;

fn page_params(page: Page) -> [(&'static str, String); 2] {
    [("page", page.page.to_string()), ("limit", page.limit.to_string())]
}

#[tracing::instrument(skip(client))]
pub async fn list(client: &ApiClient, page: Page) -> Result<UsersResponse, ApiError> {
    client.get(&with_query("/users", &page_params(page)), true).await
}

/// Profile of the signed-in user.
#[tracing::instrument(skip(client))]
pub async fn my_profile(client: &ApiClient) -> Result<Profile, ApiError> {
    client.get("/profiles/my", true).await
}

#[tracing::instrument(skip(client))]
pub async fn staff_profiles(client: &ApiClient, page: Page) -> Result<ProfilesResponse, ApiError> {
    client.get(&with_query("/staff/profiles", &page_params(page)), true).await
}

#[tracing::instrument(skip(client))]
pub async fn staff_profile(client: &ApiClient, user_id: &str) -> Result<Profile, ApiError> {
    client.get(&format!("/staff/profiles/{}", segment(user_id)), true).await
}
