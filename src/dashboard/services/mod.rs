//! # Services Layer
//!
//! External collaborators of the dashboard. Only the backend API lives here;
//! view models call it through spawned tasks and never hold a connection.

pub mod api;
pub mod errors;

pub use api::{ApiClient, ConnectionOptions, Credentials, SaveTarget, PAGE_LIMIT};
pub use errors::ApiError;
