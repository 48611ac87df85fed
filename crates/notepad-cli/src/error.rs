use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] notepad_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Note needs a title or content")]
    EmptyNote,
    #[error("Nothing to change; pass --title, --content, --category or --no-category")]
    NothingToEdit,
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Note not found for id/prefix: {0}")]
    NoteNotFound(String),
    #[error("{0}")]
    AmbiguousNoteId(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Tag not found: {0}")]
    TagNotFound(String),
    #[error("Setting key cannot be empty")]
    EmptySettingKey,
    #[error("Setting not found: {0}")]
    SettingNotFound(String),
    #[error("Invalid reminder time '{0}'; use \"YYYY-MM-DD HH:MM\" or RFC 3339")]
    InvalidReminderTime(String),
    #[error("Note has no image at index {0}")]
    ImageIndexOutOfRange(usize),
}
