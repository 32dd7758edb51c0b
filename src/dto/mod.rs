pub mod api_dto;
pub mod candidate_dto;
