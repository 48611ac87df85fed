//! In-memory note filtering and ordering.

use std::cmp::Ordering;

use crate::models::{CategoryId, Note, Tag, TagId};

/// Restrictions applied to the loaded note collection.
///
/// `None` and an empty search string mean "no restriction". The search text
/// is matched as given, whitespace included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    /// Keep only notes in this category
    pub category_id: Option<CategoryId>,
    /// Keep only notes carrying this tag
    pub tag_id: Option<TagId>,
    /// Case-insensitive text matched against title, content and tag names
    pub search: String,
}

impl NoteQuery {
    /// Query matching every note
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to a category
    #[must_use]
    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Restrict to a tag
    #[must_use]
    pub fn with_tag(mut self, tag_id: TagId) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    /// Restrict by free text
    #[must_use]
    pub fn matching(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }
}

/// Filter by category, then tag, then text; order pinned first, newest first.
///
/// `tags` is the full tag collection used to resolve tag names for the text
/// filter. The sort is stable, so notes with equal pin state and `updated_at`
/// keep their input order.
#[must_use]
pub fn filter_notes<'a>(notes: &'a [Note], tags: &[Tag], query: &NoteQuery) -> Vec<&'a Note> {
    let search = query.search.to_lowercase();

    let mut filtered = notes
        .iter()
        .filter(|note| {
            query
                .category_id
                .as_ref()
                .is_none_or(|category_id| note.category_id.as_ref() == Some(category_id))
        })
        .filter(|note| query.tag_id.as_ref().is_none_or(|tag_id| note.has_tag(tag_id)))
        .filter(|note| search.is_empty() || note_matches_text(note, tags, &search))
        .collect::<Vec<_>>();

    filtered.sort_by(|a, b| display_order(a, b));
    filtered
}

/// Pinned notes first, then by `updated_at` descending
#[must_use]
pub fn display_order(a: &Note, b: &Note) -> Ordering {
    b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| b.updated_at.cmp(&a.updated_at))
}

/// Tags of `note`, in the order of the tag collection
#[must_use]
pub fn resolve_tags<'a>(note: &Note, tags: &'a [Tag]) -> Vec<&'a Tag> {
    tags.iter().filter(|tag| note.has_tag(&tag.id)).collect()
}

/// Whether any note belongs to the category
#[must_use]
pub fn is_category_referenced(notes: &[Note], category_id: &CategoryId) -> bool {
    notes
        .iter()
        .any(|note| note.category_id.as_ref() == Some(category_id))
}

/// Whether any note carries the tag
#[must_use]
pub fn is_tag_referenced(notes: &[Note], tag_id: &TagId) -> bool {
    notes.iter().any(|note| note.has_tag(tag_id))
}

/// Number of notes in the category
#[must_use]
pub fn category_note_count(notes: &[Note], category_id: &CategoryId) -> usize {
    notes
        .iter()
        .filter(|note| note.category_id.as_ref() == Some(category_id))
        .count()
}

/// Number of notes carrying the tag
#[must_use]
pub fn tag_note_count(notes: &[Note], tag_id: &TagId) -> usize {
    notes.iter().filter(|note| note.has_tag(tag_id)).count()
}

fn note_matches_text(note: &Note, tags: &[Tag], search: &str) -> bool {
    note.title.to_lowercase().contains(search)
        || note.content.to_lowercase().contains(search)
        || resolve_tags(note, tags)
            .iter()
            .any(|tag| tag.name.to_lowercase().contains(search))
}
