//! # ViewModel Module
//!
//! Explicit state structs for every dashboard screen. Controllers hand out
//! tickets for the requests they need and apply the results they get back;
//! only [`screen::ResourceScreen`] actually spawns requests.

pub mod form_controller;
pub mod list_controller;
pub mod login;
pub mod modal;
pub mod pagination;
pub mod screen;
pub mod shell;

pub use form_controller::{
    FormError, ResourceFormController, SessionMode, SessionTicket, SubmitOutcome, SubmitRequest,
};
pub use list_controller::{LoadTicket, ResourceListController};
pub use login::{LoginController, LoginOutcome, LoginTicket};
pub use modal::{CloseReason, ModalPresentation};
pub use pagination::{PageButton, PageWindow};
pub use screen::ResourceScreen;
pub use shell::{DashboardShell, Tab};
