//! # Form Draft
//!
//! Client-owned, mutable mirror of a record's editable fields. A draft only
//! lives while a modal session is open.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Local file picked for upload but not yet sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    path: PathBuf,
    file_name: String,
}

impl Attachment {
    /// Create an attachment for an existing regular file
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Value of one draft field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(Attachment),
}

impl FieldValue {
    /// Text shown in the form for this value
    pub fn display(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::File(attachment) => attachment.file_name(),
        }
    }
}

/// Editable field set of a record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    fields: BTreeMap<String, FieldValue>,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a draft whose fields all hold text
    pub fn with_text_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), FieldValue::Text(value.to_string())))
                .collect(),
        }
    }

    /// Build a draft from a detail response.
    ///
    /// Scalars become text, `null` fields are dropped and nested values keep
    /// their JSON text.
    pub fn from_detail(detail: Value) -> Result<Self, serde_json::Error> {
        let object: Map<String, Value> = serde_json::from_value(detail)?;
        let fields = object
            .into_iter()
            .filter_map(|(name, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
                };
                Some((name, FieldValue::Text(text)))
            })
            .collect();

        Ok(Self { fields })
    }

    /// Merge one text field, leaving the others untouched
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .insert(name.into(), FieldValue::Text(value.into()));
    }

    /// Replace the media field with a local file
    pub fn set_attachment(&mut self, media_field: &str, attachment: Attachment) {
        self.fields
            .insert(media_field.to_string(), FieldValue::File(attachment));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text of a field, empty when absent
    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).map(FieldValue::display).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}
