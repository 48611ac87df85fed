//! Note model

use serde::{Deserialize, Serialize};

use crate::util::{now_ms, truncate_chars};

use super::category::CategoryId;
use super::id::string_id;
use super::tag::TagId;

string_id! {
    /// A unique identifier for a note, immutable after creation
    NoteId
}

/// An image attached to a note together with its caption.
///
/// Keeping the blob and its description in one value means the image list and
/// the description list can never drift apart in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteImage {
    /// Raw encoded image bytes as handed over by the picker
    pub data: Vec<u8>,
    /// Caption, empty when none was given
    pub description: String,
}

/// A note in the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Title, may be empty
    pub title: String,
    /// Plain text content
    pub content: String,
    /// Weak reference to the owning category
    pub category_id: Option<CategoryId>,
    /// Tag references in insertion order
    pub tag_ids: Vec<TagId>,
    /// Pinned notes sort ahead of the rest
    pub is_pinned: bool,
    /// Attached images in display order
    pub images: Vec<NoteImage>,
    /// Reminder timestamp (Unix ms); the reminder is active iff this is set
    pub reminder: Option<i64>,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

impl Default for Note {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl Note {
    /// Create a new note with the given title and content
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = now_ms();
        Self {
            id: NoteId::new(),
            title: title.into(),
            content: content.into(),
            category_id: None,
            tag_ids: Vec::new(),
            is_pinned: false,
            images: Vec::new(),
            reminder: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update any of title, content and category; `None` leaves a field as is
    pub fn update(
        &mut self,
        title: Option<String>,
        content: Option<String>,
        category_id: Option<CategoryId>,
    ) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(category_id) = category_id {
            self.category_id = Some(category_id);
        }
        self.touch();
    }

    /// Detach the note from its category
    pub fn clear_category(&mut self) {
        self.category_id = None;
        self.touch();
    }

    /// Append an image with an optional caption
    pub fn add_image(&mut self, data: Vec<u8>, description: impl Into<String>) {
        self.images.push(NoteImage {
            data,
            description: description.into(),
        });
        self.touch();
    }

    /// Remove the image at `index`. Out-of-range indices are ignored.
    pub fn remove_image(&mut self, index: usize) {
        if index >= self.images.len() {
            return;
        }
        self.images.remove(index);
        self.touch();
    }

    /// Raw image blobs in display order
    pub fn image_data(&self) -> impl Iterator<Item = &[u8]> {
        self.images.iter().map(|image| image.data.as_slice())
    }

    /// Image captions, parallel to [`Self::image_data`]
    pub fn image_descriptions(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(|image| image.description.as_str())
    }

    /// Set or clear the reminder
    pub fn set_reminder(&mut self, at: Option<i64>) {
        self.reminder = at;
        self.touch();
    }

    /// Whether a reminder is currently set
    #[must_use]
    pub const fn is_reminder_active(&self) -> bool {
        self.reminder.is_some()
    }

    /// Flip the pinned flag
    pub fn toggle_pin(&mut self) {
        self.is_pinned = !self.is_pinned;
        self.touch();
    }

    /// Attach a tag. Does not change `updated_at`.
    pub fn add_tag_id(&mut self, tag_id: TagId) {
        if !self.tag_ids.contains(&tag_id) {
            self.tag_ids.push(tag_id);
        }
    }

    /// Detach a tag. Does not change `updated_at`.
    pub fn remove_tag_id(&mut self, tag_id: &TagId) {
        self.tag_ids.retain(|id| id != tag_id);
    }

    /// Whether the note carries the given tag
    #[must_use]
    pub fn has_tag(&self, tag_id: &TagId) -> bool {
        self.tag_ids.contains(tag_id)
    }

    /// Title if present, else the first content line, truncated to `max_chars`
    #[must_use]
    pub fn title_preview(&self, max_chars: usize) -> String {
        let title = self.title.trim();
        let source = if title.is_empty() {
            self.content.lines().next().unwrap_or("").trim()
        } else {
            title
        };
        truncate_chars(source, max_chars)
    }

    /// Check if the note has no text and no images (whitespace-only counts as empty)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty() && self.images.is_empty()
    }

    fn touch(&mut self) {
        self.updated_at = now_ms();
    }
}
