//! # Models Module
//!
//! Plain data held by the dashboard: records, pages, drafts and error maps.
//! Models know nothing about HTTP or rendering.

pub mod draft;
pub mod error_map;
pub mod page;
pub mod record;

pub use draft::{Attachment, FieldValue, FormDraft};
pub use error_map::{ErrorMap, SubmitFailure, GENERIC_ERROR_KEY};
pub use page::Page;
pub use record::{
    category_label, CategoryOption, Exercise, Expert, RecordId, Resource, ResourceKind,
};
