//! Fetch coordination for the candidate list.
//!
//! Every query change or refetch bumps a generation counter stored next to
//! the query in a `watch` channel. Query changes start a debounce timer that
//! only dispatches if its generation is still current when it fires; a
//! gateway result is only committed if its generation is still current when
//! it resolves. The counter is read and written under the channel's lock, so
//! the last issued fetch always owns the visible state.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::dto::api_dto::{ListParams, PageResult};
use crate::models::candidate::CandidateStatus;
use crate::services::candidate_service::CandidateApi;
use crate::services::query_state::ListQuery;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Idle,
    Loading,
    Success(PageResult),
    Failure(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot {
    pub query: ListQuery,
    pub state: FetchState,
    /// Sequence number of the most recently issued fetch.
    pub generation: u64,
    /// Page count from the last successful fetch, used to clamp paging.
    pub total_pages: u32,
}

impl ListSnapshot {
    pub fn page_result(&self) -> Option<&PageResult> {
        match &self.state {
            FetchState::Success(page) => Some(page),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }
}

#[derive(Clone)]
pub struct ListController {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn CandidateApi>,
    debounce: Duration,
    limit: u32,
    snapshot: watch::Sender<ListSnapshot>,
}

impl ListController {
    pub fn new(api: Arc<dyn CandidateApi>, debounce: Duration, limit: u32) -> Self {
        let (snapshot, _) = watch::channel(ListSnapshot {
            query: ListQuery::default(),
            state: FetchState::Idle,
            generation: 0,
            total_pages: 1,
        });
        Self {
            inner: Arc::new(Inner {
                api,
                debounce,
                limit: limit.max(1),
                snapshot,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.inner.snapshot.subscribe()
    }

    pub fn snapshot(&self) -> ListSnapshot {
        self.inner.snapshot.borrow().clone()
    }

    pub fn query(&self) -> ListQuery {
        self.inner.snapshot.borrow().query.clone()
    }

    /// Schedules the initial debounced fetch for the current query.
    pub fn load(&self) {
        let generation = self.inner.begin(|_| {});
        self.schedule(generation);
    }

    pub fn set_search_text(&self, text: impl Into<String>) {
        let text = text.into();
        let generation = self.inner.begin(|query| query.set_search_text(text));
        self.schedule(generation);
    }

    pub fn set_status_filter(&self, status: Option<CandidateStatus>) {
        let generation = self.inner.begin(|query| query.set_status_filter(status));
        self.schedule(generation);
    }

    pub fn set_page(&self, page: u32) {
        let generation = self.inner.begin(|query| query.set_page(page));
        self.schedule(generation);
    }

    /// Moves one page forward; does nothing on the last known page.
    pub fn next_page(&self) -> bool {
        let snapshot = self.snapshot();
        if snapshot.query.page() >= snapshot.total_pages {
            return false;
        }
        self.set_page(snapshot.query.page() + 1);
        true
    }

    pub fn previous_page(&self) -> bool {
        let page = self.query().page();
        if page <= 1 {
            return false;
        }
        self.set_page(page - 1);
        true
    }

    /// Repeats the current query right away, skipping the debounce window.
    /// Any pending debounced fetch is cancelled. Returns once the result is
    /// committed or discarded.
    pub async fn refetch(&self) {
        let generation = self.inner.begin(|_| {});
        self.inner.dispatch(generation).await;
    }

    /// Replaces the whole query and fetches it right away, without starting
    /// a debounce timer.
    pub async fn refetch_with(&self, query: ListQuery) {
        let generation = self.inner.begin(|current| *current = query);
        self.inner.dispatch(generation).await;
    }

    fn schedule(&self, generation: u64) {
        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        let delay = self.inner.debounce;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = inner.upgrade() else {
                return;
            };
            if inner.current_generation() != generation {
                debug!(generation, "Debounced fetch superseded before dispatch");
                return;
            }
            inner.dispatch(generation).await;
        });
    }
}

impl Inner {
    fn begin(&self, change: impl FnOnce(&mut ListQuery)) -> u64 {
        let mut generation = 0;
        self.snapshot.send_modify(|snapshot| {
            change(&mut snapshot.query);
            snapshot.generation += 1;
            snapshot.state = FetchState::Loading;
            generation = snapshot.generation;
        });
        generation
    }

    fn current_generation(&self) -> u64 {
        self.snapshot.borrow().generation
    }

    async fn dispatch(&self, generation: u64) {
        let params = ListParams::from_query(&self.snapshot.borrow().query, self.limit);
        debug!(generation, ?params, "Dispatching candidate list fetch");

        let next = match self.api.list_candidates(&params).await {
            Ok(page) => FetchState::Success(page),
            Err(err) => {
                warn!(generation, error = %err, "Candidate list fetch failed");
                FetchState::Failure(err.display_message())
            }
        };

        let committed = self.snapshot.send_if_modified(|snapshot| {
            if snapshot.generation != generation {
                return false;
            }
            if let FetchState::Success(page) = &next {
                snapshot.total_pages = page.total_pages;
            }
            snapshot.state = next;
            true
        });
        if !committed {
            debug!(generation, "Discarding stale candidate list result");
        }
    }
}
