//! # Page Model
//!
//! One server-computed page of records. The client never paginates locally.

use crate::dashboard::models::record::Resource;
use serde::de::Error as _;
use serde_json::Value;

/// Records of one page plus the total page count reported with them
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    pub records: Vec<R>,
    pub total_pages: u32,
}

impl<R: Resource> Page<R> {
    /// Parse a list payload of the form `{"<collection>": [...], "total_page": n}`
    pub fn from_payload(payload: Value) -> Result<Self, serde_json::Error> {
        let Value::Object(mut object) = payload else {
            return Err(serde_json::Error::custom("list payload is not an object"));
        };

        let records = object
            .remove(R::COLLECTION)
            .ok_or_else(|| serde_json::Error::missing_field(R::COLLECTION))?;
        let records: Vec<R> = match records {
            Value::Null => Vec::new(),
            other => serde_json::from_value(other)?,
        };

        let total_pages = match object.remove("total_page") {
            Some(value) => serde_json::from_value(value)?,
            None => return Err(serde_json::Error::missing_field("total_page")),
        };

        Ok(Self {
            records,
            total_pages,
        })
    }
}
