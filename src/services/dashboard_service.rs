use reqwest::Method;
use tracing::instrument;

use crate::dto::api_dto::ApiResponse;
use crate::error::Result;
use crate::models::dashboard::DashboardStats;
use crate::services::gateway::Gateway;

#[derive(Clone)]
pub struct DashboardService {
    gateway: Gateway,
}

impl DashboardService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats> {
        let request = self.gateway.request(Method::GET, &["dashboard", "stats"]);
        let response: ApiResponse<DashboardStats> = self.gateway.execute(request).await?;
        response.into_data()
    }
}
