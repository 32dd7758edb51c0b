pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    candidate_service::{CandidateApi, CandidateService},
    dashboard_service::DashboardService,
    export_service::ExportService,
    gateway::{CredentialProvider, Gateway},
    list_controller::ListController,
    mutation_service::MutationCoordinator,
};

#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
    pub candidate_service: CandidateService,
    pub dashboard_service: DashboardService,
    pub export_service: ExportService,
    pub config: Config,
}

impl AppState {
    pub fn new(config: &Config, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let gateway = Gateway::new(
            &config.api_base_url,
            config.request_timeout(),
            credentials,
        )?;

        let candidate_service = CandidateService::new(gateway.clone());
        let dashboard_service = DashboardService::new(gateway.clone());
        let export_service = ExportService::new(gateway.clone());

        Ok(Self {
            gateway,
            candidate_service,
            dashboard_service,
            export_service,
            config: config.clone(),
        })
    }

    /// Fresh list and mutation state for one candidates view.
    pub fn candidates_view(&self) -> CandidatesView {
        let api: Arc<dyn CandidateApi> = Arc::new(self.candidate_service.clone());
        CandidatesView::new(
            api,
            self.config.search_debounce(),
            self.config.page_limit,
        )
    }
}

pub struct CandidatesView {
    pub list: ListController,
    pub mutations: MutationCoordinator,
}

impl CandidatesView {
    pub fn new(api: Arc<dyn CandidateApi>, debounce: std::time::Duration, limit: u32) -> Self {
        let list = ListController::new(Arc::clone(&api), debounce, limit);
        let mutations = MutationCoordinator::new(api, list.clone());
        Self { list, mutations }
    }
}
