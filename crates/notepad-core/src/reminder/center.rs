//! Notification center implementations

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::db::SlotRepository;
use crate::error::{Error, Result};

use super::{AuthorizationStatus, NotificationCenter, NotificationRequest};

/// Slot holding the local queue of pending reminders
pub const PENDING_REMINDERS_SLOT: &str = "pending_reminders";

#[derive(Debug, Default)]
struct FakeCenterState {
    status: AuthorizationStatus,
    deny_requests: bool,
    reject_adds: bool,
    authorization_requests: usize,
    pending: Vec<NotificationRequest>,
}

/// Scriptable in-process notification center.
///
/// Cheap to clone; clones share state, so a test can keep one handle while
/// the scheduler owns another.
#[derive(Clone, Default)]
pub struct InMemoryNotificationCenter {
    state: Arc<Mutex<FakeCenterState>>,
}

impl InMemoryNotificationCenter {
    /// Permission not yet determined; a request is granted
    pub fn new() -> Self {
        Self::default()
    }

    /// Permission already granted
    pub fn authorized() -> Self {
        Self::with_state(FakeCenterState {
            status: AuthorizationStatus::Authorized,
            ..FakeCenterState::default()
        })
    }

    /// Permission not yet determined; a request is refused
    pub fn denying() -> Self {
        Self::with_state(FakeCenterState {
            deny_requests: true,
            ..FakeCenterState::default()
        })
    }

    /// Permission granted, but every add is rejected
    pub fn rejecting() -> Self {
        Self::with_state(FakeCenterState {
            status: AuthorizationStatus::Authorized,
            reject_adds: true,
            ..FakeCenterState::default()
        })
    }

    fn with_state(state: FakeCenterState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// How many times permission was requested
    pub async fn authorization_requests(&self) -> usize {
        self.state.lock().await.authorization_requests
    }
}

impl NotificationCenter for InMemoryNotificationCenter {
    async fn authorization_status(&self) -> AuthorizationStatus {
        self.state.lock().await.status
    }

    async fn request_authorization(&self) -> Result<bool> {
        let mut state = self.state.lock().await;
        state.authorization_requests += 1;
        state.status = if state.deny_requests {
            AuthorizationStatus::Denied
        } else {
            AuthorizationStatus::Authorized
        };
        Ok(state.status == AuthorizationStatus::Authorized)
    }

    async fn add(&self, request: NotificationRequest) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.reject_adds {
            return Err(Error::InvalidInput(format!(
                "notification center rejected {}",
                request.identifier
            )));
        }
        state.pending.retain(|p| p.identifier != request.identifier);
        state.pending.push(request);
        Ok(())
    }

    async fn remove_pending(&self, identifiers: &[String]) -> Result<()> {
        self.state
            .lock()
            .await
            .pending
            .retain(|p| !identifiers.contains(&p.identifier));
        Ok(())
    }

    async fn pending_requests(&self) -> Result<Vec<NotificationRequest>> {
        Ok(self.state.lock().await.pending.clone())
    }
}

/// Durable local reminder queue kept in a slot.
///
/// Used where no platform notification service exists (the CLI): pending
/// requests survive restarts and are handed out by [`Self::deliver_due`].
#[derive(Clone)]
pub struct SlotNotificationCenter<S> {
    slots: S,
    status: Arc<Mutex<AuthorizationStatus>>,
}

impl<S: SlotRepository> SlotNotificationCenter<S> {
    /// Create a queue in `slots` with the given starting permission
    pub fn new(slots: S, status: AuthorizationStatus) -> Self {
        Self {
            slots,
            status: Arc::new(Mutex::new(status)),
        }
    }

    /// Remove and return every request due at or before `now`
    pub async fn deliver_due(&self, now: DateTime<Utc>) -> Result<Vec<NotificationRequest>> {
        let (due, waiting): (Vec<_>, Vec<_>) = self
            .load()
            .await?
            .into_iter()
            .partition(|request| request.fire_at <= now);

        if !due.is_empty() {
            self.store(&waiting).await?;
            tracing::info!("Delivered {} due reminder(s)", due.len());
        }
        Ok(due)
    }

    /// Read the queue. A failed read is an error; an undecodable value is
    /// treated as an empty queue.
    async fn load(&self) -> Result<Vec<NotificationRequest>> {
        let Some(raw) = self.slots.read(PENDING_REMINDERS_SLOT).await? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|error| {
            tracing::warn!("Discarding unreadable pending reminders: {error}");
            Vec::new()
        }))
    }

    async fn store(&self, pending: &[NotificationRequest]) -> Result<()> {
        let encoded = serde_json::to_string(pending)?;
        self.slots.write(PENDING_REMINDERS_SLOT, &encoded).await
    }
}

impl<S: SlotRepository> NotificationCenter for SlotNotificationCenter<S> {
    async fn authorization_status(&self) -> AuthorizationStatus {
        *self.status.lock().await
    }

    async fn request_authorization(&self) -> Result<bool> {
        let mut status = self.status.lock().await;
        if *status == AuthorizationStatus::NotDetermined {
            *status = AuthorizationStatus::Authorized;
        }
        Ok(*status == AuthorizationStatus::Authorized)
    }

    async fn add(&self, request: NotificationRequest) -> Result<()> {
        let mut pending = self.load().await?;
        pending.retain(|p| p.identifier != request.identifier);
        pending.push(request);
        pending.sort_by_key(|p| p.fire_at);
        self.store(&pending).await
    }

    async fn remove_pending(&self, identifiers: &[String]) -> Result<()> {
        let mut pending = self.load().await?;
        let before = pending.len();
        pending.retain(|p| !identifiers.contains(&p.identifier));
        if pending.len() != before {
            self.store(&pending).await?;
        }
        Ok(())
    }

    async fn pending_requests(&self) -> Result<Vec<NotificationRequest>> {
        self.load().await
    }
}
