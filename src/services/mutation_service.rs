use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::dto::candidate_dto::{CandidateFields, CandidatePatch};
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::services::candidate_service::CandidateApi;
use crate::services::list_controller::ListController;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    #[default]
    Closed,
    Create,
    Edit(Candidate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub id: String,
    pub name: String,
}

impl From<&Candidate> for DeleteTarget {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
        }
    }
}

/// Two-phase delete: request, then confirm or cancel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteState {
    #[default]
    Idle,
    PendingConfirm(DeleteTarget),
    InFlight(DeleteTarget),
}

/// Runs create/update/delete calls for the candidates view.
///
/// A successful mutation closes the editor (or confirmation) and refetches
/// the list once. A failed one leaves it open and records the message.
pub struct MutationCoordinator {
    api: Arc<dyn CandidateApi>,
    list: ListController,
    editor: EditorState,
    delete: DeleteState,
    error: Option<String>,
}

impl MutationCoordinator {
    pub fn new(api: Arc<dyn CandidateApi>, list: ListController) -> Self {
        Self {
            api,
            list,
            editor: EditorState::Closed,
            delete: DeleteState::Idle,
            error: None,
        }
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn delete_state(&self) -> &DeleteState {
        &self.delete
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_editor_open(&self) -> bool {
        self.editor != EditorState::Closed
    }

    pub fn open_create(&mut self) {
        self.editor = EditorState::Create;
        self.error = None;
    }

    pub fn open_edit(&mut self, candidate: Candidate) {
        self.editor = EditorState::Edit(candidate);
        self.error = None;
    }

    pub fn close_editor(&mut self) {
        self.editor = EditorState::Closed;
        self.error = None;
    }

    /// Initial field values for the open editor.
    pub fn draft(&self) -> Option<CandidateFields> {
        match &self.editor {
            EditorState::Closed => None,
            EditorState::Create => Some(CandidateFields::default()),
            EditorState::Edit(candidate) => Some(CandidateFields::from(candidate)),
        }
    }

    /// Creates or updates depending on the editor mode.
    pub async fn submit(&mut self, fields: CandidateFields) -> Result<Candidate> {
        match &self.editor {
            EditorState::Closed => Err(Error::InvalidState(
                "There is no open editor to submit".to_string(),
            )),
            EditorState::Create => self.create_candidate(fields).await,
            EditorState::Edit(candidate) => {
                let id = candidate.id.clone();
                let fields = fields.normalized();
                fields.validate()?;
                self.update_candidate(&id, CandidatePatch::from(fields)).await
            }
        }
    }

    pub async fn create_candidate(&mut self, fields: CandidateFields) -> Result<Candidate> {
        let fields = fields.normalized();
        fields.validate()?;

        match self.api.create_candidate(&fields).await {
            Ok(candidate) => {
                info!(candidate_id = %candidate.id, "Create succeeded, refreshing list");
                self.complete_edit().await;
                Ok(candidate)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    pub async fn update_candidate(&mut self, id: &str, patch: CandidatePatch) -> Result<Candidate> {
        patch.validate()?;

        match self.api.update_candidate(id, &patch).await {
            Ok(candidate) => {
                info!(candidate_id = %candidate.id, "Update succeeded, refreshing list");
                self.complete_edit().await;
                Ok(candidate)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    pub fn request_delete(&mut self, target: DeleteTarget) {
        self.delete = DeleteState::PendingConfirm(target);
        self.error = None;
    }

    /// Discards the pending target without touching the network.
    pub fn cancel_delete(&mut self) -> Option<DeleteTarget> {
        match std::mem::take(&mut self.delete) {
            DeleteState::PendingConfirm(target) => {
                self.error = None;
                Some(target)
            }
            other => {
                self.delete = other;
                None
            }
        }
    }

    pub async fn confirm_delete(&mut self) -> Result<()> {
        let target = match std::mem::take(&mut self.delete) {
            DeleteState::PendingConfirm(target) => target,
            other => {
                self.delete = other;
                return Err(Error::InvalidState(
                    "No deletion is awaiting confirmation".to_string(),
                ));
            }
        };

        self.delete = DeleteState::InFlight(target.clone());
        match self.api.delete_candidate(&target.id).await {
            Ok(()) => {
                info!(candidate_id = %target.id, "Delete succeeded, refreshing list");
                self.delete = DeleteState::Idle;
                self.error = None;
                self.list.refetch().await;
                Ok(())
            }
            Err(err) => {
                self.delete = DeleteState::PendingConfirm(target);
                Err(self.fail(err))
            }
        }
    }

    async fn complete_edit(&mut self) {
        self.editor = EditorState::Closed;
        self.error = None;
        self.list.refetch().await;
    }

    fn fail(&mut self, err: Error) -> Error {
        let message = err.display_message();
        warn!(error = %err, "Candidate mutation failed");
        self.error = Some(message);
        err
    }
}
