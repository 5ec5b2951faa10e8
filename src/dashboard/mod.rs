//! # Dashboard Module - MVVM Architecture
//!
//! Administration dashboard for the expert and exercise collections:
//!
//! - **Models**: records, pages, form drafts and error maps
//! - **Services**: the backend API client
//! - **ViewModels**: list, form, modal, shell and login controllers
//! - **Views**: terminal rendering
//! - **Controller**: event loop routing commands and async results
//!
//! ```text
//! ┌─────────────┐  Command   ┌──────────────┐  spawn   ┌──────────────┐
//! │  Controller │───────────▶│  ViewModels  │─────────▶│  ApiClient   │
//! │             │            │              │          │  (tokio task)│
//! │ - stdin     │ ApiMessage │ - tickets    │ mpsc     │              │
//! │ - channel   │◀───────────│ - state      │◀─────────│              │
//! └─────────────┘            └──────────────┘          └──────────────┘
//! ```

pub mod commands;
pub mod controller;
pub mod events;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

// Re-export core types
pub use commands::Command;
pub use controller::{ActiveScreen, AppController, DashboardSettings, Route};
pub use events::{ApiMessage, LoginMessage, RoutedResource, ScreenMessage};
pub use models::{Exercise, Expert, FormDraft, Page, RecordId, Resource, ResourceKind};
pub use services::{ApiClient, ApiError, ConnectionOptions};
