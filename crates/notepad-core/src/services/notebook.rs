//! Notebook service: the loaded collections plus their persistence and
//! reminder side effects.

use crate::db::SlotRepository;
use crate::error::{Error, Result};
use crate::models::{Category, CategoryId, Note, NoteId, SettingValue, SettingsMap, Tag, TagId};
use crate::query::{self, NoteQuery};
use crate::reminder::{NotificationCenter, NotificationRequest, ReminderScheduler, ReminderState};
use crate::store::NoteStore;

/// In-memory notes, categories, tags and settings backed by a [`NoteStore`].
///
/// Every mutation persists the affected collection as a whole. Reminder
/// changes are forwarded to the [`ReminderScheduler`]; when scheduling fails
/// the reminder is cleared again so the note never claims a reminder the
/// platform does not hold.
pub struct Notebook<S, N> {
    store: NoteStore<S>,
    scheduler: ReminderScheduler<N>,
    notes: Vec<Note>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    settings: SettingsMap,
}

impl<S: SlotRepository, N: NotificationCenter> Notebook<S, N> {
    /// Load every collection and make sure the default category exists.
    pub async fn open(store: NoteStore<S>, scheduler: ReminderScheduler<N>) -> Result<Self> {
        let mut categories = store.load_categories().await;
        if !categories.iter().any(Category::is_default) {
            let default = Category::default_category();
            tracing::info!("Creating default category {}", default.id);
            categories.push(default);
            store.save_categories(&categories).await?;
        }

        let tags = store.load_tags().await;
        let notes = store.load_notes().await;
        let settings = store.load_settings().await;
        tracing::debug!(
            "Loaded {} notes, {} categories, {} tags",
            notes.len(),
            categories.len(),
            tags.len()
        );

        Ok(Self {
            store,
            scheduler,
            notes,
            categories,
            tags,
            settings,
        })
    }

    /// The reminder scheduler
    pub const fn scheduler(&self) -> &ReminderScheduler<N> {
        &self.scheduler
    }

    // ---------------------------------------------------------------------
    // Notes
    // ---------------------------------------------------------------------

    /// All notes in storage order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Look up a note by id
    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    /// Notes whose id starts with `prefix`
    pub fn notes_with_id_prefix(&self, prefix: &str) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| note.id.as_str().starts_with(prefix))
            .collect()
    }

    /// Filtered and ordered view of the notes
    pub fn find_notes(&self, query: &NoteQuery) -> Vec<&Note> {
        query::filter_notes(&self.notes, &self.tags, query)
    }

    /// Resolved tags of a note
    pub fn note_tags(&self, note: &Note) -> Vec<&Tag> {
        query::resolve_tags(note, &self.tags)
    }

    /// Create a note; it lands in the default category unless one is given.
    pub async fn create_note(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        category_id: Option<CategoryId>,
    ) -> Result<Note> {
        let category_id = match category_id {
            Some(id) => {
                self.require_category(&id)?;
                id
            }
            None => self.default_category().id.clone(),
        };

        let mut note = Note::new(title, content);
        note.category_id = Some(category_id);
        self.notes.push(note.clone());
        if let Err(error) = self.persist_notes().await {
            self.notes.pop();
            return Err(error);
        }

        tracing::debug!("Created note {}", note.id);
        Ok(note)
    }

    /// Apply `edit` to a note and persist.
    ///
    /// If the edit changes the reminder, the scheduler is updated as in
    /// [`Self::set_reminder`].
    pub async fn update_note(&mut self, id: &NoteId, edit: impl FnOnce(&mut Note)) -> Result<Note> {
        self.apply(id, edit, false).await
    }

    /// Set or clear a note's reminder and schedule or cancel its notification.
    ///
    /// On scheduling failure the reminder is reset to `None`, the notes are
    /// saved, and the error is returned.
    pub async fn set_reminder(&mut self, id: &NoteId, at: Option<i64>) -> Result<Note> {
        self.apply(id, |note| note.set_reminder(at), true).await
    }

    /// Toggle the pinned flag
    pub async fn toggle_pin(&mut self, id: &NoteId) -> Result<Note> {
        self.update_note(id, Note::toggle_pin).await
    }

    /// Attach an existing tag to a note
    pub async fn tag_note(&mut self, id: &NoteId, tag_id: &TagId) -> Result<Note> {
        self.require_tag(tag_id)?;
        let tag_id = tag_id.clone();
        self.update_note(id, |note| note.add_tag_id(tag_id)).await
    }

    /// Detach a tag from a note
    pub async fn untag_note(&mut self, id: &NoteId, tag_id: &TagId) -> Result<Note> {
        self.update_note(id, |note| note.remove_tag_id(tag_id)).await
    }

    /// Delete a note, cancelling its pending reminder first
    pub async fn delete_note(&mut self, id: &NoteId) -> Result<Note> {
        let index = self
            .notes
            .iter()
            .position(|note| &note.id == id)
            .ok_or_else(|| Error::NotFound(format!("note {id}")))?;

        if self.notes[index].is_reminder_active() {
            self.scheduler.cancel(&self.notes[index]).await;
        }
        let removed = self.notes.remove(index);
        self.persist_notes().await?;

        tracing::debug!("Deleted note {}", removed.id);
        Ok(removed)
    }

    // ---------------------------------------------------------------------
    // Reminders
    // ---------------------------------------------------------------------

    /// Whether the platform holds a trigger for the note
    pub async fn reminder_state(&self, id: &NoteId) -> Result<ReminderState> {
        let note = self
            .note(id)
            .ok_or_else(|| Error::NotFound(format!("note {id}")))?;
        Ok(self.scheduler.state_of(note).await)
    }

    /// All pending reminder notifications
    pub async fn pending_reminders(&self) -> Result<Vec<NotificationRequest>> {
        self.scheduler.pending().await
    }

    // ---------------------------------------------------------------------
    // Categories
    // ---------------------------------------------------------------------

    /// All categories in creation order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The privileged default category
    pub fn default_category(&self) -> &Category {
        // Never empty: open() seeds the default and the last category cannot be deleted.
        self.categories
            .iter()
            .find(|category| category.is_default())
            .unwrap_or(&self.categories[0])
    }

    /// Look up a category by id, or by exact name when no id matches
    pub fn find_category(&self, id_or_name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.id.as_str() == id_or_name)
            .or_else(|| {
                self.categories
                    .iter()
                    .find(|category| category.name == id_or_name)
            })
    }

    /// Create a category
    pub async fn create_category(&mut self, name: impl Into<String>) -> Result<Category> {
        let category = Category::new(name)?;
        self.categories.push(category.clone());
        self.store.save_categories(&self.categories).await?;
        Ok(category)
    }

    /// Delete a category; refused while any note references it
    pub async fn delete_category(&mut self, id: &CategoryId) -> Result<Category> {
        let index = self
            .categories
            .iter()
            .position(|category| &category.id == id)
            .ok_or_else(|| Error::NotFound(format!("category {id}")))?;

        let used_by = query::category_note_count(&self.notes, id);
        if used_by > 0 {
            return Err(Error::InUse(
                format!("Category '{}'", self.categories[index].name),
                used_by,
            ));
        }
        if self.categories.len() == 1 {
            return Err(Error::InvalidInput(
                "The last remaining category cannot be deleted".to_string(),
            ));
        }

        let removed = self.categories.remove(index);
        self.store.save_categories(&self.categories).await?;
        Ok(removed)
    }

    // ---------------------------------------------------------------------
    // Tags
    // ---------------------------------------------------------------------

    /// All tags in creation order
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Look up a tag by id, or by exact name when no id matches
    pub fn find_tag(&self, id_or_name: &str) -> Option<&Tag> {
        self.tags
            .iter()
            .find(|tag| tag.id.as_str() == id_or_name)
            .or_else(|| self.tags.iter().find(|tag| tag.name == id_or_name))
    }

    /// Create a tag
    pub async fn create_tag(&mut self, name: impl Into<String>) -> Result<Tag> {
        let tag = Tag::new(name)?;
        self.tags.push(tag.clone());
        self.store.save_tags(&self.tags).await?;
        Ok(tag)
    }

    /// Delete a tag; refused while any note carries it
    pub async fn delete_tag(&mut self, id: &TagId) -> Result<Tag> {
        let index = self
            .tags
            .iter()
            .position(|tag| &tag.id == id)
            .ok_or_else(|| Error::NotFound(format!("tag {id}")))?;

        let used_by = query::tag_note_count(&self.notes, id);
        if used_by > 0 {
            return Err(Error::InUse(
                format!("Tag '{}'", self.tags[index].name),
                used_by,
            ));
        }

        let removed = self.tags.remove(index);
        self.store.save_tags(&self.tags).await?;
        Ok(removed)
    }

    // ---------------------------------------------------------------------
    // Settings
    // ---------------------------------------------------------------------

    /// Current settings
    pub const fn settings(&self) -> &SettingsMap {
        &self.settings
    }

    /// Set a single setting and persist the map
    pub async fn set_setting(&mut self, key: impl Into<String>, value: SettingValue) -> Result<()> {
        self.settings.insert(key.into(), value);
        self.store.save_settings(&self.settings).await
    }

    /// Remove a setting and persist the map
    pub async fn remove_setting(&mut self, key: &str) -> Result<Option<SettingValue>> {
        let removed = self.settings.remove(key);
        if removed.is_some() {
            self.store.save_settings(&self.settings).await?;
        }
        Ok(removed)
    }

    // ---------------------------------------------------------------------
    // Private
    // ---------------------------------------------------------------------

    async fn apply(
        &mut self,
        id: &NoteId,
        edit: impl FnOnce(&mut Note),
        force_reminder_sync: bool,
    ) -> Result<Note> {
        let note = self.require_note_mut(id)?;
        let original = note.clone();
        edit(note);
        let reminder_changed = note.reminder != original.reminder;
        let snapshot = note.clone();

        if let Err(error) = self.persist_notes().await {
            *self.require_note_mut(id)? = original;
            return Err(error);
        }

        if reminder_changed || force_reminder_sync {
            return self.sync_reminder(snapshot).await;
        }
        Ok(snapshot)
    }

    async fn sync_reminder(&mut self, note: Note) -> Result<Note> {
        if !note.is_reminder_active() {
            self.scheduler.cancel(&note).await;
            return Ok(note);
        }

        match self.scheduler.schedule(&note).await {
            Ok(_) => Ok(note),
            Err(error) => {
                tracing::warn!(
                    "Rolling back reminder of note {} after failed scheduling: {error}",
                    note.id
                );
                let rolled_back = {
                    let stored = self.require_note_mut(&note.id)?;
                    stored.set_reminder(None);
                    stored.clone()
                };
                self.persist_notes().await?;
                self.scheduler.cancel(&rolled_back).await;
                Err(error.into())
            }
        }
    }

    async fn persist_notes(&self) -> Result<()> {
        self.store.save_notes(&self.notes).await
    }

    fn require_note_mut(&mut self, id: &NoteId) -> Result<&mut Note> {
        self.notes
            .iter_mut()
            .find(|note| &note.id == id)
            .ok_or_else(|| Error::NotFound(format!("note {id}")))
    }

    fn require_category(&self, id: &CategoryId) -> Result<&Category> {
        self.categories
            .iter()
            .find(|category| &category.id == id)
            .ok_or_else(|| Error::NotFound(format!("category {id}")))
    }

    fn require_tag(&self, id: &TagId) -> Result<&Tag> {
        self.tags
            .iter()
            .find(|tag| &tag.id == id)
            .ok_or_else(|| Error::NotFound(format!("tag {id}")))
    }
}
