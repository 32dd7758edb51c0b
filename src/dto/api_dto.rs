use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateStatus, PaginationMeta};
use crate::services::query_state::ListQuery;

/// Envelope every JSON endpoint of the API answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub pagination: Option<PaginationMeta>,
}

impl<T> ApiResponse<T> {
    pub fn into_data(self) -> Result<T> {
        self.data
            .ok_or_else(|| Error::Decode("response did not include a data field".to_string()))
    }
}

/// Body shape of a non-2xx answer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}

/// Query string of `GET /candidates`. Empty filters are never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CandidateStatus>,
}

impl ListParams {
    pub fn from_query(query: &ListQuery, limit: u32) -> Self {
        Self {
            page: query.page().max(1),
            limit,
            search: Some(query.search_text().to_string()).filter(|s| !s.is_empty()),
            status: query.status_filter(),
        }
    }
}

/// One page of the candidate list, replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub items: Vec<Candidate>,
    pub page: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

impl PageResult {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_count: 0,
            total_pages: 1,
        }
    }

    /// Without pagination metadata the items are treated as the only page.
    pub fn from_response(response: ApiResponse<Vec<Candidate>>) -> Self {
        let items = response.data.unwrap_or_default();
        match response.pagination {
            Some(meta) => Self {
                items,
                page: meta.page.max(1),
                total_count: meta.total,
                total_pages: meta.total_pages.max(1),
            },
            None => Self {
                total_count: items.len() as u64,
                items,
                page: 1,
                total_pages: 1,
            },
        }
    }
}
