//! # Login Controller
//!
//! Collects credentials and reports the outcome of `POST /login`. Navigation
//! to the dashboard happens after a short cosmetic delay, driven by the
//! application controller.

use crate::dashboard::services::{ApiError, Credentials};
use serde_json::Value;

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";
pub const LOGIN_FALLBACK_ERROR: &str = "Something went wrong. Please try again later.";

/// Launch receipt of one login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Succeeded,
    Failed,
    Stale,
}

#[derive(Debug, Default)]
pub struct LoginController {
    email: String,
    error: Option<String>,
    message: Option<String>,
    pending: bool,
    generation: u64,
}

impl LoginController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a login attempt, clearing the previous error
    pub fn submit(&mut self, email: &str, password: &str) -> (LoginTicket, Credentials) {
        self.generation += 1;
        self.email = email.to_string();
        self.error = None;
        self.message = None;
        self.pending = true;
        tracing::debug!("Submitting login for {}", email);

        (
            LoginTicket {
                generation: self.generation,
            },
            Credentials {
                email: email.to_string(),
                password: password.to_string(),
            },
        )
    }

    pub fn complete(&mut self, ticket: LoginTicket, result: Result<(), ApiError>) -> LoginOutcome {
        if !self.is_current(ticket) {
            return LoginOutcome::Stale;
        }
        self.pending = false;

        match result {
            Ok(()) => {
                self.message = Some(LOGIN_SUCCESS_MESSAGE.to_string());
                LoginOutcome::Succeeded
            }
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                self.error = Some(Self::error_message(&e));
                LoginOutcome::Failed
            }
        }
    }

    /// Server-provided `{"error": "..."}` text, or the generic fallback
    fn error_message(error: &ApiError) -> String {
        error
            .rejection()
            .and_then(|(_, body)| serde_json::from_str::<Value>(body).ok())
            .and_then(|body| match body.get("error") {
                Some(Value::String(message)) => Some(message.clone()),
                _ => None,
            })
            .unwrap_or_else(|| LOGIN_FALLBACK_ERROR.to_string())
    }

    pub fn is_current(&self, ticket: LoginTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Forget the current attempt and any messages
    pub fn reset(&mut self) {
        self.generation += 1;
        self.error = None;
        self.message = None;
        self.pending = false;
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn rejected(status: StatusCode, body: &str) -> Result<(), ApiError> {
        Err(ApiError::Status {
            status,
            body: body.to_string(),
        })
    }

    #[test]
    fn successful_login_should_show_message() {
        let mut login = LoginController::new();
        let (ticket, credentials) = login.submit("admin@example.com", "secret");
        assert_eq!(credentials.email, "admin@example.com");
        assert!(login.is_pending());

        assert_eq!(login.complete(ticket, Ok(())), LoginOutcome::Succeeded);
        assert_eq!(login.message(), Some(LOGIN_SUCCESS_MESSAGE));
        assert_eq!(login.error(), None);
        assert!(!login.is_pending());
    }

    #[test]
    fn server_error_text_should_be_surfaced() {
        let mut login = LoginController::new();
        let (ticket, _) = login.submit("admin@example.com", "wrong");

        login.complete(
            ticket,
            rejected(StatusCode::UNAUTHORIZED, r#"{"error":"Invalid credentials"}"#),
        );

        assert_eq!(login.error(), Some("Invalid credentials"));
    }

    #[test]
    fn malformed_error_should_fall_back() {
        for body in ["", "oops", r#"{"error": 42}"#, r#"{"message":"x"}"#] {
            let mut login = LoginController::new();
            let (ticket, _) = login.submit("a@b.c", "p");
            login.complete(ticket, rejected(StatusCode::INTERNAL_SERVER_ERROR, body));
            assert_eq!(login.error(), Some(LOGIN_FALLBACK_ERROR), "body: {body}");
        }
    }

    #[test]
    fn resubmit_should_clear_previous_error() {
        let mut login = LoginController::new();
        let (first, _) = login.submit("a@b.c", "p");
        login.complete(first, rejected(StatusCode::UNAUTHORIZED, "{}"));

        let (second, _) = login.submit("a@b.c", "q");
        assert_eq!(login.error(), None);
        assert_eq!(login.complete(first, Ok(())), LoginOutcome::Stale);
        assert_eq!(login.complete(second, Ok(())), LoginOutcome::Succeeded);
    }
}
