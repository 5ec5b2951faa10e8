//! # Resource Records
//!
//! Server-owned entities listed and edited by the dashboard. The client only
//! ever holds a read-only copy of one page of them.

use crate::dashboard::models::draft::FormDraft;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a record as issued by the backend.
///
/// The backend is not consistent about numeric vs string ids, so both are
/// accepted and kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// The two resource types managed by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Expert,
    Exercise,
}

impl ResourceKind {
    /// Lowercase singular noun used in messages ("expert")
    pub fn noun(self) -> &'static str {
        match self {
            ResourceKind::Expert => "expert",
            ResourceKind::Exercise => "exercise",
        }
    }

    /// Capitalized singular noun used in titles ("Expert")
    pub fn title(self) -> &'static str {
        match self {
            ResourceKind::Expert => "Expert",
            ResourceKind::Exercise => "Exercise",
        }
    }
}

/// Category code offered as a select option in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryOption {
    pub code: u8,
    pub label: &'static str,
}

const SPECIALIZATIONS: &[CategoryOption] = &[
    CategoryOption { code: 1, label: "Clinical Psychology" },
    CategoryOption { code: 2, label: "Psychiatry" },
    CategoryOption { code: 3, label: "Counseling" },
    CategoryOption { code: 4, label: "Behavioral Therapy" },
    CategoryOption { code: 5, label: "Family & Marriage" },
    CategoryOption { code: 6, label: "Art & Music" },
];

const EXERCISE_TYPES: &[CategoryOption] = &[
    CategoryOption { code: 1, label: "Meditation" },
    CategoryOption { code: 2, label: "Deep Breathing" },
    CategoryOption { code: 3, label: "Yoga" },
];

/// Behavior shared by every record type reachable through the CRUD endpoints.
///
/// The endpoint layout is identical for all resources:
/// `GET /{collection}?page&limit`, `GET /{collection}/{id}/detail`,
/// `POST /{collection}/create` and `POST /{collection}/update/{id}`.
/// List responses carry the records under a key equal to the collection name.
pub trait Resource: for<'de> Deserialize<'de> + Clone + fmt::Debug + Send + Sync + 'static {
    const KIND: ResourceKind;

    /// Path segment of the endpoints and key of the list payload
    const COLLECTION: &'static str;

    /// Draft field holding the media reference (or a local attachment)
    const MEDIA_FIELD: &'static str;

    /// Draft field holding the category code
    const CATEGORY_FIELD: &'static str;

    /// Editable draft fields in display order, media field excluded
    const FORM_FIELDS: &'static [&'static str];

    /// Table header in display order
    const COLUMNS: &'static [&'static str];

    /// Cell texts in the order of [`Resource::COLUMNS`]
    fn cells(&self) -> Vec<String>;

    /// Draft used when the modal opens in create mode
    fn empty_draft() -> FormDraft;

    /// Select options for [`Resource::CATEGORY_FIELD`]
    fn categories() -> &'static [CategoryOption];
}

/// A mental-health professional listed in the directory
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Expert {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub specialization_string: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Resource for Expert {
    const KIND: ResourceKind = ResourceKind::Expert;
    const COLLECTION: &'static str = "experts";
    const MEDIA_FIELD: &'static str = "avatar";
    const CATEGORY_FIELD: &'static str = "specialization";
    const FORM_FIELDS: &'static [&'static str] =
        &["name", "specialization", "bio", "contact_info", "phone_number"];
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Avatar",
        "Name",
        "Specialization",
        "Bio",
        "Contact Info",
        "Phone Number",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.avatar.clone().unwrap_or_default(),
            self.name.clone(),
            self.specialization_string.clone(),
            self.bio.clone(),
            self.contact_info.clone(),
            self.phone_number.clone(),
        ]
    }

    fn empty_draft() -> FormDraft {
        FormDraft::with_text_fields([
            ("name", ""),
            ("specialization", "0"),
            ("bio", ""),
            ("contact_info", ""),
            ("phone_number", ""),
        ])
    }

    fn categories() -> &'static [CategoryOption] {
        SPECIALIZATIONS
    }
}

/// A guided exercise (meditation, breathing, yoga) with an optional video
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Exercise {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub type_string: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub media_url: Option<String>,
}

impl Resource for Exercise {
    const KIND: ResourceKind = ResourceKind::Exercise;
    const COLLECTION: &'static str = "exercises";
    const MEDIA_FIELD: &'static str = "media_url";
    const CATEGORY_FIELD: &'static str = "type";
    const FORM_FIELDS: &'static [&'static str] = &["title", "type", "description"];
    const COLUMNS: &'static [&'static str] = &["ID", "Media", "Title", "Type", "Description"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.media_url.clone().unwrap_or_default(),
            self.title.clone(),
            self.type_string.clone(),
            self.description.clone(),
        ]
    }

    fn empty_draft() -> FormDraft {
        FormDraft::with_text_fields([("title", ""), ("description", ""), ("type", "")])
    }

    fn categories() -> &'static [CategoryOption] {
        EXERCISE_TYPES
    }
}

/// Look up the label of a category code, if known
pub fn category_label<R: Resource>(code: &str) -> Option<&'static str> {
    let code: u8 = code.trim().parse().ok()?;
    R::categories()
        .iter()
        .find(|option| option.code == code)
        .map(|option| option.label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::models::draft::FieldValue;

    #[test]
    fn record_id_should_accept_numbers_and_strings() {
        let numeric: RecordId = serde_json::from_str("42").unwrap();
        let text: RecordId = serde_json::from_str("\"abc-1\"").unwrap();

        assert_eq!(numeric.as_str(), "42");
        assert_eq!(text.as_str(), "abc-1");
    }

    #[test]
    fn expert_should_deserialize_list_row_with_missing_fields() {
        let expert: Expert =
            serde_json::from_str(r#"{"id": 7, "name": "Dr. Lan", "avatar": null}"#).unwrap();

        assert_eq!(expert.id, RecordId::from(7_u64));
        assert_eq!(expert.name, "Dr. Lan");
        assert_eq!(expert.avatar, None);
        assert_eq!(expert.bio, "");
    }

    #[test]
    fn expert_cells_should_include_contact_columns() {
        let expert: Expert = serde_json::from_str(
            r#"{"id": 1, "name": "Dr. Kim", "specialization_string": "Counseling",
                "bio": "b", "contact_info": "kim@clinic.org", "phone_number": "555-0101"}"#,
        )
        .unwrap();

        let cells = expert.cells();
        assert_eq!(cells.len(), Expert::COLUMNS.len());
        assert_eq!(Expert::COLUMNS[5], "Contact Info");
        assert_eq!(Expert::COLUMNS[6], "Phone Number");
        assert_eq!(cells[5], "kim@clinic.org");
        assert_eq!(cells[6], "555-0101");
    }

    #[test]
    fn exercise_cells_should_follow_column_order() {
        let exercise = Exercise {
            id: RecordId::from(3_u64),
            title: "Box Breathing".to_string(),
            type_string: "Deep Breathing".to_string(),
            description: "Four counts each".to_string(),
            media_url: Some("https://cdn/box.mp4".to_string()),
        };

        let cells = exercise.cells();
        assert_eq!(cells.len(), Exercise::COLUMNS.len());
        assert_eq!(cells[0], "3");
        assert_eq!(cells[1], "https://cdn/box.mp4");
        assert_eq!(cells[2], "Box Breathing");
    }

    #[test]
    fn empty_expert_draft_should_default_specialization_to_zero() {
        let draft = Expert::empty_draft();

        assert_eq!(
            draft.get("specialization"),
            Some(&FieldValue::Text("0".to_string()))
        );
        assert!(draft.get("avatar").is_none());
    }

    #[test]
    fn category_label_should_resolve_known_codes_only() {
        assert_eq!(category_label::<Exercise>("2"), Some("Deep Breathing"));
        assert_eq!(category_label::<Expert>("6"), Some("Art & Music"));
        assert_eq!(category_label::<Expert>("0"), None);
        assert_eq!(category_label::<Exercise>("yoga"), None);
    }
}
