use async_trait::async_trait;
use reqwest::Method;
use tracing::{info, instrument};

use crate::dto::api_dto::{Ack, ApiResponse, ListParams, PageResult};
use crate::dto::candidate_dto::{CandidateFields, CandidatePatch};
use crate::error::Result;
use crate::models::candidate::Candidate;
use crate::services::gateway::Gateway;

/// Candidate endpoints of the external API.
#[async_trait]
pub trait CandidateApi: Send + Sync {
    async fn list_candidates(&self, params: &ListParams) -> Result<PageResult>;

    async fn get_candidate(&self, id: &str) -> Result<Candidate>;

    async fn create_candidate(&self, fields: &CandidateFields) -> Result<Candidate>;

    async fn update_candidate(&self, id: &str, patch: &CandidatePatch) -> Result<Candidate>;

    async fn delete_candidate(&self, id: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct CandidateService {
    gateway: Gateway,
}

impl CandidateService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl CandidateApi for CandidateService {
    #[instrument(skip(self))]
    async fn list_candidates(&self, params: &ListParams) -> Result<PageResult> {
        let request = self
            .gateway
            .request(Method::GET, &["candidates"])
            .query(params);
        let response: ApiResponse<Vec<Candidate>> = self.gateway.execute(request).await?;
        Ok(PageResult::from_response(response))
    }

    #[instrument(skip(self))]
    async fn get_candidate(&self, id: &str) -> Result<Candidate> {
        let request = self
            .gateway
            .request(Method::GET, &["candidates", id]);
        let response: ApiResponse<Candidate> = self.gateway.execute(request).await?;
        response.into_data()
    }

    #[instrument(skip(self, fields))]
    async fn create_candidate(&self, fields: &CandidateFields) -> Result<Candidate> {
        let request = self
            .gateway
            .request(Method::POST, &["candidates"])
            .json(fields);
        let response: ApiResponse<Candidate> = self.gateway.execute(request).await?;
        let candidate = response.into_data()?;
        info!(candidate_id = %candidate.id, "Candidate created");
        Ok(candidate)
    }

    #[instrument(skip(self, patch))]
    async fn update_candidate(&self, id: &str, patch: &CandidatePatch) -> Result<Candidate> {
        let request = self
            .gateway
            .request(Method::PUT, &["candidates", id])
            .json(patch);
        let response: ApiResponse<Candidate> = self.gateway.execute(request).await?;
        let candidate = response.into_data()?;
        info!(candidate_id = %candidate.id, "Candidate updated");
        Ok(candidate)
    }

    #[instrument(skip(self))]
    async fn delete_candidate(&self, id: &str) -> Result<()> {
        let request = self
            .gateway
            .request(Method::DELETE, &["candidates", id]);
        let _: Ack = self.gateway.execute(request).await?;
        info!(candidate_id = %id, "Candidate deleted");
        Ok(())
    }
}
