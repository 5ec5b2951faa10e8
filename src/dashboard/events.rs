//! # Async Result Messages
//!
//! Requests run in spawned tasks and report back over an mpsc channel.
//! Every message carries the ticket issued when the request was launched so
//! the receiving controller can discard responses that arrive for a session
//! or page load that is no longer current.

use crate::dashboard::models::{Exercise, Expert, FormDraft, Page, Resource};
use crate::dashboard::services::ApiError;
use crate::dashboard::view_models::form_controller::SessionTicket;
use crate::dashboard::view_models::list_controller::LoadTicket;
use crate::dashboard::view_models::login::LoginTicket;

/// Completion of a request launched by a resource screen
#[derive(Debug)]
pub enum ScreenMessage<R> {
    PageLoaded {
        ticket: LoadTicket,
        result: Result<Page<R>, ApiError>,
    },
    DetailLoaded {
        ticket: SessionTicket,
        result: Result<FormDraft, ApiError>,
    },
    Saved {
        ticket: SessionTicket,
        result: Result<(), ApiError>,
    },
}

/// Completion of the login flow
#[derive(Debug)]
pub enum LoginMessage {
    Completed {
        ticket: LoginTicket,
        result: Result<(), ApiError>,
    },
    /// Redirect delay after a successful login elapsed
    RedirectDue { ticket: LoginTicket },
}

/// Everything that can arrive on the application's response channel
#[derive(Debug)]
pub enum ApiMessage {
    Expert(ScreenMessage<Expert>),
    Exercise(ScreenMessage<Exercise>),
    Login(LoginMessage),
}

/// Resources whose screen messages can travel on the shared channel
pub trait RoutedResource: Resource {
    fn wrap(message: ScreenMessage<Self>) -> ApiMessage;

    /// Take the message back out, or return it untouched if it belongs elsewhere
    fn unwrap(message: ApiMessage) -> Result<ScreenMessage<Self>, ApiMessage>;
}

impl RoutedResource for Expert {
    fn wrap(message: ScreenMessage<Self>) -> ApiMessage {
        ApiMessage::Expert(message)
    }

    fn unwrap(message: ApiMessage) -> Result<ScreenMessage<Self>, ApiMessage> {
        match message {
            ApiMessage::Expert(inner) => Ok(inner),
            other => Err(other),
        }
    }
}

impl RoutedResource for Exercise {
    fn wrap(message: ScreenMessage<Self>) -> ApiMessage {
        ApiMessage::Exercise(message)
    }

    fn unwrap(message: ApiMessage) -> Result<ScreenMessage<Self>, ApiMessage> {
        match message {
            ApiMessage::Exercise(inner) => Ok(inner),
            other => Err(other),
        }
    }
}
