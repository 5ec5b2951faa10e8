//! # Resource Form Controller
//!
//! Create/edit form state of one resource screen: the draft being edited,
//! the error map shown next to the fields and the session they belong to.
//!
//! Each open (create or edit) starts a new session generation. Responses for
//! detail fetches and submits carry the [`SessionTicket`] of the session that
//! launched them and are dropped if that session is gone by the time they
//! resolve.

use crate::dashboard::models::{Attachment, ErrorMap, FormDraft, RecordId, Resource, SubmitFailure};
use crate::dashboard::services::{ApiError, SaveTarget};
use std::marker::PhantomData;
use thiserror::Error;

/// Launch receipt tying an async response to the session that requested it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    Create,
    Edit(RecordId),
}

impl SessionMode {
    pub fn target(&self) -> SaveTarget {
        match self {
            SessionMode::Create => SaveTarget::Create,
            SessionMode::Edit(id) => SaveTarget::Update(id.clone()),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, SessionMode::Edit(_))
    }
}

/// Form operations refused in the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("no form is open")]
    NoSession,
    #[error("record details are still loading")]
    DraftNotReady,
    #[error("a submit is already in progress")]
    SubmitPending,
}

/// Everything a spawned task needs to submit the draft
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub ticket: SessionTicket,
    pub target: SaveTarget,
    pub draft: FormDraft,
}

/// Result of applying a submit response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Accepted; the session should be closed and the list reloaded
    Saved,
    /// Rejected; the error map was replaced and the session stays open
    Rejected,
    /// Success status other than 200/201, logged only
    Ignored,
    /// The session that submitted is gone; `saved` tells whether the backend changed
    Stale { saved: bool },
}

#[derive(Debug, Clone)]
struct Session {
    mode: SessionMode,
    generation: u64,
    draft_ready: bool,
    submitting: bool,
}

#[derive(Debug)]
pub struct ResourceFormController<R> {
    draft: FormDraft,
    errors: ErrorMap,
    session: Option<Session>,
    generation: u64,
    _resource: PhantomData<R>,
}

impl<R: Resource> Default for ResourceFormController<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ResourceFormController<R> {
    pub fn new() -> Self {
        Self {
            draft: FormDraft::new(),
            errors: ErrorMap::new(),
            session: None,
            generation: 0,
            _resource: PhantomData,
        }
    }

    fn start_session(&mut self, mode: SessionMode, draft_ready: bool) -> SessionTicket {
        self.generation += 1;
        self.errors.clear();
        self.draft = if draft_ready {
            R::empty_draft()
        } else {
            FormDraft::new()
        };
        tracing::debug!(
            "Opening {} form in {:?} (generation {})",
            R::KIND.noun(),
            mode,
            self.generation
        );
        self.session = Some(Session {
            mode,
            generation: self.generation,
            draft_ready,
            submitting: false,
        });
        SessionTicket {
            generation: self.generation,
        }
    }

    /// Start a create session with an empty draft
    pub fn open_for_create(&mut self) -> SessionTicket {
        self.start_session(SessionMode::Create, true)
    }

    /// Start an edit session; the draft stays unusable until
    /// [`Self::complete_detail`] applies the fetched record
    pub fn open_for_edit(&mut self, id: RecordId) -> SessionTicket {
        self.start_session(SessionMode::Edit(id), false)
    }

    fn current_session(
        session: &mut Option<Session>,
        ticket: SessionTicket,
    ) -> Option<&mut Session> {
        session
            .as_mut()
            .filter(|session| session.generation == ticket.generation)
    }

    /// Apply the detail fetch of an edit session. Returns false when stale.
    pub fn complete_detail(
        &mut self,
        ticket: SessionTicket,
        result: Result<FormDraft, ApiError>,
    ) -> bool {
        let Some(session) = Self::current_session(&mut self.session, ticket) else {
            tracing::debug!("Discarding stale {} detail response", R::KIND.noun());
            return false;
        };

        match result {
            Ok(draft) => {
                session.draft_ready = true;
                self.draft = draft;
            }
            Err(e) => {
                tracing::warn!("Error fetching {} details: {}", R::KIND.noun(), e);
                self.errors
                    .replace_with_generic(format!("Failed to load {} details.", R::KIND.noun()));
            }
        }
        true
    }

    fn editable_session(&mut self) -> Result<&mut Session, FormError> {
        let session = self.session.as_mut().ok_or(FormError::NoSession)?;
        if !session.draft_ready {
            return Err(FormError::DraftNotReady);
        }
        Ok(session)
    }

    /// Merge one field into the draft
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        self.editable_session()?;
        self.draft.set_field(name, value);
        Ok(())
    }

    /// Attach a local file as the media field
    pub fn set_attachment(&mut self, attachment: Attachment) -> Result<(), FormError> {
        self.editable_session()?;
        self.draft.set_attachment(R::MEDIA_FIELD, attachment);
        Ok(())
    }

    /// Reserve the session's single submit slot and snapshot the draft
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, FormError> {
        let session = self.editable_session()?;
        if session.submitting {
            return Err(FormError::SubmitPending);
        }
        session.submitting = true;

        let ticket = SessionTicket {
            generation: session.generation,
        };
        let target = session.mode.target();
        Ok(SubmitRequest {
            ticket,
            target,
            draft: self.draft.clone(),
        })
    }

    /// Apply a submit response.
    ///
    /// The controller leaves a saved session open; closing it is up to the
    /// modal that owns it.
    pub fn complete_submit(
        &mut self,
        ticket: SessionTicket,
        result: Result<(), ApiError>,
    ) -> SubmitOutcome {
        let Some(session) = Self::current_session(&mut self.session, ticket) else {
            tracing::debug!("Discarding stale {} submit response", R::KIND.noun());
            return SubmitOutcome::Stale {
                saved: result.is_ok(),
            };
        };
        session.submitting = false;

        let fallback = format!("Failed to save {}. Please try again later.", R::KIND.noun());
        match result {
            Ok(()) => SubmitOutcome::Saved,
            Err(ApiError::UnexpectedStatus(status)) => {
                tracing::warn!("Unexpected response status: {}", status);
                SubmitOutcome::Ignored
            }
            Err(e) if e.is_bad_request() => {
                let body = e.rejection().map(|(_, body)| body).unwrap_or_default();
                tracing::debug!("{} rejected: {}", R::KIND.title(), body);
                self.errors
                    .replace(SubmitFailure::from_bad_request(body, &fallback));
                SubmitOutcome::Rejected
            }
            Err(e) => {
                tracing::warn!("Error saving {}: {}", R::KIND.noun(), e);
                self.errors.replace_with_generic(fallback);
                SubmitOutcome::Rejected
            }
        }
    }

    /// End the session, dropping draft and errors
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("Closed {} form", R::KIND.noun());
        }
        self.generation += 1;
        self.draft.clear();
        self.errors.clear();
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn mode(&self) -> Option<&SessionMode> {
        self.session.as_ref().map(|session| &session.mode)
    }

    pub fn is_draft_ready(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.draft_ready)
    }

    pub fn is_submitting(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.submitting)
    }
}
