pub mod candidate_service;
pub mod dashboard_service;
pub mod export_service;
pub mod gateway;
pub mod list_controller;
pub mod mutation_service;
pub mod query_state;
