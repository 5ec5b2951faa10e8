//! # Modal Presentation
//!
//! Open/closed lifecycle of the create/edit dialog. Opening always starts a
//! fresh form session; closing always wipes draft and errors, whatever the
//! reason.

use crate::dashboard::models::{RecordId, Resource};
use crate::dashboard::services::ApiError;
use crate::dashboard::view_models::form_controller::{
    ResourceFormController, SessionMode, SessionTicket, SubmitOutcome,
};

/// Why the modal was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Cancelled,
    Saved,
    Dismissed,
}

#[derive(Debug)]
pub struct ModalPresentation<R> {
    form: ResourceFormController<R>,
    open: bool,
}

impl<R: Resource> Default for ModalPresentation<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ModalPresentation<R> {
    pub fn new() -> Self {
        Self {
            form: ResourceFormController::new(),
            open: false,
        }
    }

    pub fn open_create(&mut self) -> SessionTicket {
        self.open = true;
        self.form.open_for_create()
    }

    /// Open for editing; the caller fetches the detail with the returned ticket
    pub fn open_edit(&mut self, id: RecordId) -> SessionTicket {
        self.open = true;
        self.form.open_for_edit(id)
    }

    pub fn close(&mut self, reason: CloseReason) {
        if self.open {
            tracing::debug!("Closing {} modal: {:?}", R::KIND.noun(), reason);
        }
        self.open = false;
        self.form.close();
    }

    /// Apply a submit response, closing the modal when the save went through
    pub fn complete_submit(
        &mut self,
        ticket: SessionTicket,
        result: Result<(), ApiError>,
    ) -> SubmitOutcome {
        let outcome = self.form.complete_submit(ticket, result);
        if outcome == SubmitOutcome::Saved {
            self.close(CloseReason::Saved);
        }
        outcome
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> Option<&SessionMode> {
        self.form.mode()
    }

    pub fn title(&self) -> String {
        match self.mode() {
            Some(mode) if mode.is_edit() => format!("Edit {}", R::KIND.title()),
            _ => format!("Add New {}", R::KIND.title()),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode() {
            Some(mode) if mode.is_edit() => "Update",
            _ => "Create",
        }
    }

    pub fn form(&self) -> &ResourceFormController<R> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ResourceFormController<R> {
        &mut self.form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::models::{Expert, FormDraft};
    use reqwest::StatusCode;

    #[test]
    fn open_create_should_show_add_title() {
        let mut modal = ModalPresentation::<Expert>::new();
        modal.open_create();

        assert!(modal.is_open());
        assert_eq!(modal.title(), "Add New Expert");
        assert_eq!(modal.submit_label(), "Create");
    }

    #[test]
    fn open_edit_should_record_target_id() {
        let mut modal = ModalPresentation::<Expert>::new();
        modal.open_edit(RecordId::from(11_u64));

        assert_eq!(modal.mode(), Some(&SessionMode::Edit(RecordId::from(11_u64))));
        assert_eq!(modal.title(), "Edit Expert");
        assert_eq!(modal.submit_label(), "Update");
    }

    #[test]
    fn every_close_reason_should_reset_form() {
        for reason in [CloseReason::Cancelled, CloseReason::Dismissed, CloseReason::Saved] {
            let mut modal = ModalPresentation::<Expert>::new();
            modal.open_create();
            modal.form_mut().set_field("name", "Dr. Minh").unwrap();

            modal.close(reason);

            assert!(!modal.is_open());
            assert!(modal.form().draft().is_empty());
            assert!(modal.form().errors().is_empty());
            assert!(modal.mode().is_none());
        }
    }

    #[test]
    fn saved_submit_should_close_modal() {
        let mut modal = ModalPresentation::<Expert>::new();
        let ticket = modal.open_edit(RecordId::from(3_u64));
        modal
            .form_mut()
            .complete_detail(ticket, Ok(FormDraft::with_text_fields([("name", "A")])));
        let request = modal.form_mut().begin_submit().unwrap();

        assert_eq!(modal.complete_submit(request.ticket, Ok(())), SubmitOutcome::Saved);
        assert!(!modal.is_open());
    }

    #[test]
    fn rejected_submit_should_keep_modal_open() {
        let mut modal = ModalPresentation::<Expert>::new();
        modal.open_create();
        let request = modal.form_mut().begin_submit().unwrap();

        let outcome = modal.complete_submit(
            request.ticket,
            Err(ApiError::Status {
                status: StatusCode::BAD_REQUEST,
                body: r#"{"errors":{"name":"required"}}"#.to_string(),
            }),
        );

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(modal.is_open());
        assert_eq!(modal.form().errors().get("name"), Some("required"));
    }
}
