//! Data models for Notepad

mod category;
mod id;
mod note;
mod settings;
mod tag;

pub use category::{Category, CategoryId, DEFAULT_CATEGORY_NAME};
pub use note::{Note, NoteId, NoteImage};
pub use settings::{SettingValue, SettingsMap};
pub use tag::{Tag, TagId};
