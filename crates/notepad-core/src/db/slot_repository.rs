//! Slot repository: named durable cells holding one serialized value each

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::Result;
use crate::util::now_ms;

use super::Database;

/// Trait for slot storage operations (async)
///
/// A write replaces the whole value of a slot in one atomic step, so a reader
/// never observes a half-written value.
#[allow(async_fn_in_trait)]
pub trait SlotRepository {
    /// Read a slot, `None` when it was never written
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value of a slot
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot; removing a missing slot is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}

/// libSQL implementation of `SlotRepository`
///
/// Cheap to clone; clones share one connection.
#[derive(Clone)]
pub struct LibSqlSlotRepository {
    db: Arc<Mutex<Database>>,
}

impl LibSqlSlotRepository {
    /// Wrap an open database
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Open (or create) the database file at `path`
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Database::open(path).await?))
    }

    /// Open an in-memory database (primarily for tests)
    pub async fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Database::open_in_memory().await?))
    }
}

impl SlotRepository for LibSqlSlotRepository {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let db = self.db.lock().await;
        let mut rows = db
            .connection()
            .query("SELECT value FROM storage_slots WHERE key = ?", [key])
            .await?;

        if let Some(row) = rows.next().await? {
            let value: String = row.get(0)?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let db = self.db.lock().await;
        db.connection()
            .execute(
                "INSERT OR REPLACE INTO storage_slots (key, value, updated_at) VALUES (?, ?, ?)",
                libsql::params![key, value, now_ms()],
            )
            .await?;
        tracing::debug!("Wrote slot '{key}' ({} bytes)", value.len());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let db = self.db.lock().await;
        db.connection()
            .execute("DELETE FROM storage_slots WHERE key = ?", [key])
            .await?;
        Ok(())
    }
}

/// In-process implementation of `SlotRepository`
///
/// Cheap to clone; clones share the same slots.
#[derive(Clone, Default)]
pub struct MemorySlotRepository {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlotRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotRepository for MemorySlotRepository {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.lock().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.slots.lock().await.remove(key);
        Ok(())
    }
}

/// Slot repository whose reads or writes can be switched to fail
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct FailingSlotRepository {
    inner: MemorySlotRepository,
    fail_reads: Arc<std::sync::atomic::AtomicBool>,
    fail_writes: Arc<std::sync::atomic::AtomicBool>,
}

#[cfg(test)]
impl FailingSlotRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_reads(&self, fail: bool) {
        self.fail_reads
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_writes
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    fn failure(op: &str, key: &str) -> crate::error::Error {
        crate::error::Error::Database(format!("{op} of slot '{key}' failed"))
    }
}

#[cfg(test)]
impl SlotRepository for FailingSlotRepository {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(Self::failure("read", key));
        }
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(Self::failure("write", key));
        }
        self.inner.write(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(Self::failure("remove", key));
        }
        self.inner.remove(key).await
    }
}
