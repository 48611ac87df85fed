//! Service layer shared across front ends

mod notebook;

pub use notebook::Notebook;

use crate::config::AppConfig;
use crate::db::LibSqlSlotRepository;
use crate::reminder::{ReminderScheduler, SlotNotificationCenter};
use crate::store::NoteStore;
use crate::Result;

/// Notebook persisted in a local libSQL file, with reminders queued in the same file
pub type LocalNotebook =
    Notebook<LibSqlSlotRepository, SlotNotificationCenter<LibSqlSlotRepository>>;

/// Open the local notebook described by `config`.
pub async fn open_local(config: &AppConfig) -> Result<LocalNotebook> {
    tracing::debug!("Opening notebook at {}", config.db_path.display());
    let slots = LibSqlSlotRepository::open(&config.db_path).await?;
    let center = SlotNotificationCenter::new(slots.clone(), config.notifications);
    Notebook::open(NoteStore::new(slots), ReminderScheduler::new(center)).await
}
