use crate::models::candidate::CandidateStatus;

/// Search text, status filter and page of the candidate list.
///
/// Changing either filter drops the page back to 1. `set_page` is not clamped;
/// callers keep it inside `[1, total_pages]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    search_text: String,
    status_filter: Option<CandidateStatus>,
    page: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            status_filter: None,
            page: 1,
        }
    }
}

impl ListQuery {
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn status_filter(&self) -> Option<CandidateStatus> {
        self.status_filter
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_filters(&self) -> bool {
        !self.search_text.is_empty() || self.status_filter.is_some()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    pub fn set_status_filter(&mut self, status: Option<CandidateStatus>) {
        self.status_filter = status;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }
}
