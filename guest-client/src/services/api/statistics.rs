use shared::AdminStatisticsResponse;

use super::client::ApiClient;
use crate::core::error::ApiError;

/// Dashboard counters for admins.
#[tracing::instrument(skip(client))]
pub async fn admin_statistics(client: &ApiClient) -> Result<AdminStatisticsResponse, ApiError> {
    client.get("/admin/statistics", true).await
}
