//! # Resource Screen
//!
//! One mounted resource tab: a list controller and a modal sharing the API
//! client. Requests run as spawned tasks that post their result to the
//! application channel; the screen keeps their handles and aborts whatever
//! is still running when it is dropped.

use crate::dashboard::events::{RoutedResource, ScreenMessage};
use crate::dashboard::models::{Attachment, RecordId};
use crate::dashboard::services::{ApiClient, PAGE_LIMIT};
use crate::dashboard::view_models::form_controller::{FormError, SubmitOutcome};
use crate::dashboard::view_models::list_controller::{LoadTicket, ResourceListController};
use crate::dashboard::view_models::modal::{CloseReason, ModalPresentation};
use crate::dashboard::view_models::pagination::PageButton;
use crate::dashboard::ApiMessage;
use anyhow::{Context, Result};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct ResourceScreen<R> {
    api: Arc<ApiClient>,
    sender: mpsc::Sender<ApiMessage>,
    list: ResourceListController<R>,
    modal: ModalPresentation<R>,
    tasks: Vec<JoinHandle<()>>,
}

impl<R: RoutedResource> ResourceScreen<R> {
    pub fn new(api: Arc<ApiClient>, sender: mpsc::Sender<ApiMessage>, clamp_window: bool) -> Self {
        Self {
            api,
            sender,
            list: ResourceListController::new(clamp_window),
            modal: ModalPresentation::new(),
            tasks: Vec::new(),
        }
    }

    /// Initial fetch of the first page
    pub fn mount(&mut self) {
        tracing::debug!("Mounting {} screen", R::COLLECTION);
        let ticket = self.list.load(self.list.page());
        self.spawn_load(ticket);
    }

    /// Go to `page`; returns false if the page is out of range
    pub fn change_page(&mut self, page: u32) -> bool {
        match self.list.change_page(page) {
            Some(ticket) => {
                self.spawn_load(ticket);
                true
            }
            None => false,
        }
    }

    pub fn press(&mut self, button: PageButton) -> bool {
        match self.list.press(button) {
            Some(ticket) => {
                self.spawn_load(ticket);
                true
            }
            None => false,
        }
    }

    pub fn open_create(&mut self) {
        self.modal.open_create();
    }

    pub fn open_edit(&mut self, id: RecordId) {
        let ticket = self.modal.open_edit(id.clone());
        let api = Arc::clone(&self.api);
        self.spawn(async move {
            let result = api.detail::<R>(&id).await;
            R::wrap(ScreenMessage::DetailLoaded { ticket, result })
        });
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        self.modal.form_mut().set_field(name, value)
    }

    /// Attach a local file to the media field of the open form
    pub fn attach(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let attachment = Attachment::from_path(path)
            .with_context(|| format!("cannot attach {}", path.display()))?;
        self.modal.form_mut().set_attachment(attachment)?;
        Ok(())
    }

    /// Send the draft; refused while another submit of the session is pending
    pub fn submit(&mut self) -> Result<(), FormError> {
        let request = self.modal.form_mut().begin_submit()?;
        let api = Arc::clone(&self.api);
        self.spawn(async move {
            let result = api.save::<R>(&request.target, &request.draft).await;
            R::wrap(ScreenMessage::Saved {
                ticket: request.ticket,
                result,
            })
        });
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.modal.close(CloseReason::Cancelled);
    }

    pub fn dismiss(&mut self) {
        self.modal.close(CloseReason::Dismissed);
    }

    /// Apply a completed request
    pub fn handle(&mut self, message: ScreenMessage<R>) {
        match message {
            ScreenMessage::PageLoaded { ticket, result } => {
                self.list.complete_load(ticket, result);
            }
            ScreenMessage::DetailLoaded { ticket, result } => {
                self.modal.form_mut().complete_detail(ticket, result);
            }
            ScreenMessage::Saved { ticket, result } => {
                match self.modal.complete_submit(ticket, result) {
                    SubmitOutcome::Saved | SubmitOutcome::Stale { saved: true } => {
                        let ticket = self.list.reload();
                        self.spawn_load(ticket);
                    }
                    SubmitOutcome::Rejected
                    | SubmitOutcome::Ignored
                    | SubmitOutcome::Stale { saved: false } => {}
                }
            }
        }
    }

    pub fn list(&self) -> &ResourceListController<R> {
        &self.list
    }

    pub fn modal(&self) -> &ModalPresentation<R> {
        &self.modal
    }

    /// Number of spawned requests that have not finished yet
    pub fn pending_requests(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }

    fn spawn_load(&mut self, ticket: LoadTicket) {
        let api = Arc::clone(&self.api);
        self.spawn(async move {
            let result = api.list::<R>(ticket.page(), PAGE_LIMIT).await;
            R::wrap(ScreenMessage::PageLoaded { ticket, result })
        });
    }

    fn spawn<F>(&mut self, request: F)
    where
        F: Future<Output = ApiMessage> + Send + 'static,
    {
        self.tasks.retain(|task| !task.is_finished());
        let sender = self.sender.clone();
        self.tasks.push(tokio::spawn(async move {
            let message = request.await;
            if sender.send(message).await.is_err() {
                tracing::debug!("Response channel closed, dropping {} result", R::COLLECTION);
            }
        }));
    }
}

impl<R> Drop for ResourceScreen<R> {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}
