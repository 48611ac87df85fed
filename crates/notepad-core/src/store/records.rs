//! Flat transport records for the notes slot.
//!
//! The in-memory `Note` keeps typed lists; this is the only place where they
//! are encoded (images as base64 strings) and decoded again. Every list field
//! decodes leniently: a malformed list becomes an empty one instead of
//! failing the whole collection.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

use crate::models::{CategoryId, Note, NoteId, NoteImage, TagId};

/// One note as written to durable storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "categoryID", default)]
    pub category_id: Option<CategoryId>,
    #[serde(rename = "tagIDs", default, deserialize_with = "lenient_list")]
    pub tag_ids: Vec<TagId>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default, deserialize_with = "lenient_list")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub image_descriptions: Vec<String>,
    #[serde(default)]
    pub reminder: Option<i64>,
    #[serde(default)]
    pub is_reminder_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&Note> for NoteRecord {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            category_id: note.category_id.clone(),
            tag_ids: note.tag_ids.clone(),
            is_pinned: note.is_pinned,
            images: note.image_data().map(|data| BASE64.encode(data)).collect(),
            image_descriptions: note.image_descriptions().map(str::to_string).collect(),
            reminder: note.reminder,
            is_reminder_active: note.is_reminder_active(),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

impl NoteRecord {
    /// Rebuild the entity.
    ///
    /// Descriptions shorter than the image list are padded with empty
    /// captions, longer ones are cut. If any image blob fails to decode the
    /// note loads without images.
    pub fn into_note(self) -> Note {
        if self.is_reminder_active != self.reminder.is_some() {
            tracing::warn!(
                "Note {} stored isReminderActive={} with reminder={:?}; using the reminder value",
                self.id,
                self.is_reminder_active,
                self.reminder
            );
        }

        let images = decode_images(&self.id, self.images, self.image_descriptions);

        Note {
            id: self.id,
            title: self.title,
            content: self.content,
            category_id: self.category_id,
            tag_ids: self.tag_ids,
            is_pinned: self.is_pinned,
            images,
            reminder: self.reminder,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn decode_images(note_id: &NoteId, encoded: Vec<String>, descriptions: Vec<String>) -> Vec<NoteImage> {
    let decoded = encoded
        .iter()
        .map(|blob| BASE64.decode(blob))
        .collect::<Result<Vec<_>, _>>();

    let data = match decoded {
        Ok(data) => data,
        Err(error) => {
            tracing::warn!("Dropping undecodable images of note {note_id}: {error}");
            return Vec::new();
        }
    };

    let mut descriptions = descriptions.into_iter();
    data.into_iter()
        .map(|data| NoteImage {
            data,
            description: descriptions.next().unwrap_or_default(),
        })
        .collect()
}

/// Deserialize a list, yielding an empty list when the value is malformed.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|error| {
        tracing::warn!("Ignoring malformed list field: {error}");
        Vec::new()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_uses_decoded_lists() {
        let mut note = Note::new("Trip", "Pack bags");
        note.add_image(vec![1, 2, 3], "passport");
        note.add_tag_id(TagId::from("travel"));

        let record = NoteRecord::from(&note);
        assert_eq!(record.images, vec!["AQID".to_string()]);
        assert_eq!(record.image_descriptions, vec!["passport".to_string()]);
        assert_eq!(record.tag_ids, vec![TagId::from("travel")]);
        assert!(!record.is_reminder_active);
    }

    #[test]
    fn test_record_json_field_names() {
        let note = Note::new("t", "c");
        let json = serde_json::to_value(NoteRecord::from(&note)).unwrap();
        for field in [
            "id",
            "title",
            "content",
            "categoryID",
            "tagIDs",
            "isPinned",
            "images",
            "imageDescriptions",
            "reminder",
            "isReminderActive",
            "createdAt",
            "updatedAt",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn test_short_descriptions_are_padded() {
        let json = r#"{
            "id": "n1",
            "images": ["AQ==", "Ag=="],
            "imageDescriptions": ["first"],
            "createdAt": 1,
            "updatedAt": 2
        }"#;
        let note = serde_json::from_str::<NoteRecord>(json).unwrap().into_note();
        assert_eq!(note.image_descriptions().collect::<Vec<_>>(), vec!["first", ""]);
        assert_eq!(note.image_data().collect::<Vec<_>>(), vec![&[1u8][..], &[2u8][..]]);
    }

    #[test]
    fn test_long_descriptions_are_cut() {
        let json = r#"{
            "id": "n1",
            "images": ["AQ=="],
            "imageDescriptions": ["first", "orphan"],
            "createdAt": 1,
            "updatedAt": 2
        }"#;
        let note = serde_json::from_str::<NoteRecord>(json).unwrap().into_note();
        assert_eq!(note.images.len(), 1);
        assert_eq!(note.image_descriptions().collect::<Vec<_>>(), vec!["first"]);
    }

    #[test]
    fn test_malformed_lists_decode_empty() {
        let json = r#"{
            "id": "n1",
            "tagIDs": "not-a-list",
            "images": [1, 2],
            "imageDescriptions": {"a": 1},
            "createdAt": 1,
            "updatedAt": 2
        }"#;
        let note = serde_json::from_str::<NoteRecord>(json).unwrap().into_note();
        assert!(note.tag_ids.is_empty());
        assert!(note.images.is_empty());
    }

    #[test]
    fn test_bad_base64_drops_images() {
        let json = r#"{
            "id": "n1",
            "images": ["AQ==", "***"],
            "imageDescriptions": ["a", "b"],
            "createdAt": 1,
            "updatedAt": 2
        }"#;
        let note = serde_json::from_str::<NoteRecord>(json).unwrap().into_note();
        assert!(note.images.is_empty());
    }

    #[test]
    fn test_stale_active_flag_follows_reminder() {
        let json = r#"{
            "id": "n1",
            "reminder": null,
            "isReminderActive": true,
            "createdAt": 1,
            "updatedAt": 2
        }"#;
        let note = serde_json::from_str::<NoteRecord>(json).unwrap().into_note();
        assert!(!note.is_reminder_active());
    }
}
