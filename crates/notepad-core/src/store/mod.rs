//! Whole-collection persistence for notes, categories, tags and settings.
//!
//! Each collection lives in one slot and is rewritten as a unit on every
//! save. Loading is fail-soft: a missing or corrupt slot reads as an empty
//! collection, so callers treat "no notes" and "failed to load" the same way.

mod records;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::SlotRepository;
use crate::error::Result;
use crate::models::{Category, Note, SettingsMap, Tag};

pub use records::NoteRecord;

/// Slot holding the serialized note collection
pub const NOTES_SLOT: &str = "notes";
/// Slot holding the settings map
pub const SETTINGS_SLOT: &str = "settings";
/// Slot holding the category collection
pub const CATEGORIES_SLOT: &str = "categories";
/// Slot holding the tag collection
pub const TAGS_SLOT: &str = "tags";

/// Persistence store over a slot repository
#[derive(Clone)]
pub struct NoteStore<S> {
    slots: S,
}

impl<S: SlotRepository> NoteStore<S> {
    /// Create a store writing to the given slots
    pub const fn new(slots: S) -> Self {
        Self { slots }
    }

    /// Serialize and write the whole note collection
    pub async fn save_notes(&self, notes: &[Note]) -> Result<()> {
        let records = notes.iter().map(NoteRecord::from).collect::<Vec<_>>();
        self.write_json(NOTES_SLOT, &records).await?;
        tracing::debug!("Saved {} notes", records.len());
        Ok(())
    }

    /// Load the whole note collection; empty when absent or unreadable
    pub async fn load_notes(&self) -> Vec<Note> {
        self.read_json::<Vec<NoteRecord>>(NOTES_SLOT)
            .await
            .unwrap_or_default()
            .into_iter()
            .map(NoteRecord::into_note)
            .collect()
    }

    /// Write the settings map
    pub async fn save_settings(&self, settings: &SettingsMap) -> Result<()> {
        self.write_json(SETTINGS_SLOT, settings).await
    }

    /// Load the settings map; empty when absent or unreadable
    pub async fn load_settings(&self) -> SettingsMap {
        self.read_json(SETTINGS_SLOT).await.unwrap_or_default()
    }

    /// Write the category collection
    pub async fn save_categories(&self, categories: &[Category]) -> Result<()> {
        self.write_json(CATEGORIES_SLOT, categories).await
    }

    /// Load the category collection; empty when absent or unreadable
    pub async fn load_categories(&self) -> Vec<Category> {
        self.read_json(CATEGORIES_SLOT).await.unwrap_or_default()
    }

    /// Write the tag collection
    pub async fn save_tags(&self, tags: &[Tag]) -> Result<()> {
        self.write_json(TAGS_SLOT, tags).await
    }

    /// Load the tag collection; empty when absent or unreadable
    pub async fn load_tags(&self) -> Vec<Tag> {
        self.read_json(TAGS_SLOT).await.unwrap_or_default()
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value)?;
        self.slots.write(key, &encoded).await
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.slots.read(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!("Failed to read slot '{key}': {error}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!("Discarding unreadable slot '{key}': {error}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{LibSqlSlotRepository, MemorySlotRepository};
    use crate::models::{CategoryId, SettingValue, TagId};
    use pretty_assertions::assert_eq;

    fn sample_notes() -> Vec<Note> {
        let mut full = Note::new("Meeting", "Discuss budget");
        full.update(None, None, Some(CategoryId::from("work")));
        full.add_tag_id(TagId::from("urgent"));
        full.add_tag_id(TagId::from("q3"));
        full.add_image(vec![0x89, 0x50, 0x4e, 0x47], "whiteboard");
        full.add_image(vec![], "");
        full.set_reminder(Some(1_900_000_000_000));
        full.toggle_pin();

        let bare = Note::default();

        let mut legacy = Note::new("", "from an older install");
        legacy.id = "5C1F0E2A-LEGACY".into();
        legacy.created_at = 10;
        legacy.updated_at = 20;

        vec![full, bare, legacy]
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_notes_round_trip() {
        let store = NoteStore::new(MemorySlotRepository::new());
        let notes = sample_notes();

        store.save_notes(&notes).await.unwrap();
        assert_eq!(store.load_notes().await, notes);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_notes_round_trip_through_libsql() {
        let store = NoteStore::new(LibSqlSlotRepository::open_in_memory().await.unwrap());
        let notes = sample_notes();

        store.save_notes(&notes).await.unwrap();
        assert_eq!(store.load_notes().await, notes);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_empty_collection_round_trip() {
        let store = NoteStore::new(MemorySlotRepository::new());
        store.save_notes(&[]).await.unwrap();
        assert!(store.load_notes().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_save_replaces_previous_collection() {
        let store = NoteStore::new(MemorySlotRepository::new());
        let notes = sample_notes();
        store.save_notes(&notes).await.unwrap();
        store.save_notes(&notes[..1]).await.unwrap();

        assert_eq!(store.load_notes().await, notes[..1].to_vec());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_absent_and_corrupt_slots_load_empty() {
        let slots = MemorySlotRepository::new();
        let store = NoteStore::new(slots.clone());
        assert!(store.load_notes().await.is_empty());

        slots.write(NOTES_SLOT, "{not json").await.unwrap();
        assert!(store.load_notes().await.is_empty());

        slots.write(SETTINGS_SLOT, "[1, 2, 3]").await.unwrap();
        assert!(store.load_settings().await.is_empty());

        slots.write(TAGS_SLOT, "null").await.unwrap();
        assert!(store.load_tags().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_settings_round_trip() {
        let store = NoteStore::new(MemorySlotRepository::new());
        let mut settings = SettingsMap::new();
        settings.insert("font_size".to_string(), SettingValue::Integer(18));
        settings.insert("font_family".to_string(), SettingValue::Text("serif".into()));
        settings.insert("line_height".to_string(), SettingValue::Float(1.25));
        settings.insert("compact".to_string(), SettingValue::Bool(false));

        store.save_settings(&settings).await.unwrap();
        assert_eq!(store.load_settings().await, settings);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_categories_and_tags_round_trip() {
        let store = NoteStore::new(MemorySlotRepository::new());
        let categories = vec![Category::default_category(), Category::new("Work").unwrap()];
        let tags = vec![Tag::new("urgent").unwrap()];

        store.save_categories(&categories).await.unwrap();
        store.save_tags(&tags).await.unwrap();

        assert_eq!(store.load_categories().await, categories);
        assert_eq!(store.load_tags().await, tags);
    }
}
