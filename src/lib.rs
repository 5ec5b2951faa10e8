//! # Mindline - Terminal Administration Client
//!
//! Staff console for the mental-health backend: sign in, then list, create
//! and edit experts and exercises page by page.
//!
//! ## Architecture
//!
//! The dashboard follows the Model-View-ViewModel (MVVM) pattern:
//!
//! ```text
//! ┌─────────────┐    Render    ┌──────────────┐    Updates   ┌─────────┐
//! │    View     │◄─────────────│  ViewModel   │◄─────────────│ Models  │
//! │             │              │              │              │         │
//! │ - Terminal  │              │ - Pagination │              │ - Pages │
//! │ - Tables    │              │ - Sessions   │              │ - Drafts│
//! │ - Modal     │              │ - Tickets    │              │ - Errors│
//! └─────────────┘              └──────────────┘              └─────────┘
//!                                      ▲
//!                                      │ Commands / ApiMessages
//!                                      ▼
//!                               ┌──────────────┐
//!                               │  Controller  │
//!                               │              │
//!                               │ - Input      │
//!                               │ - Event Loop │
//!                               └──────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod dashboard;

// Re-export main types for easy access
pub use dashboard::*;
