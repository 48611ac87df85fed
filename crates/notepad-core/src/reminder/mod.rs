//! Reminder scheduling on top of a platform notification center.
//!
//! The core only depends on the narrow [`NotificationCenter`] capability set:
//! permission status, permission request, add, remove and list pending. Each
//! note owns at most one pending request, keyed by [`reminder_identifier`].

mod center;
mod scheduler;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Result;
use crate::models::NoteId;

pub use center::{InMemoryNotificationCenter, SlotNotificationCenter, PENDING_REMINDERS_SLOT};
pub use scheduler::{fire_time, ReminderScheduler, FALLBACK_BODY, REMINDER_TITLE};

/// Errors surfaced when a reminder cannot be scheduled
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReminderError {
    /// The note has no reminder set
    #[error("Note {0} has no active reminder")]
    NotActive(NoteId),

    /// The user refused notification permission
    #[error("Notification permission was denied")]
    PermissionDenied,

    /// The reminder timestamp cannot be represented as a calendar time
    #[error("Reminder timestamp {0} is out of range")]
    InvalidTime(i64),

    /// The notification center rejected the request
    #[error("Notification could not be scheduled: {0}")]
    Platform(String),
}

/// Notification permission as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet
    #[default]
    NotDetermined,
    /// The user refused
    Denied,
    /// Notifications may be delivered
    Authorized,
}

/// A one-shot, non-repeating notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Deterministic per-note key
    pub identifier: String,
    /// Headline shown to the user
    pub title: String,
    /// Body text shown to the user
    pub body: String,
    /// Trigger time, minute resolution
    pub fire_at: DateTime<Utc>,
}

/// Per-note reminder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    /// No trigger registered for the note
    NoActive,
    /// A future trigger is registered with the platform
    Scheduled,
}

/// Platform notification capabilities the scheduler depends on
#[allow(async_fn_in_trait)]
pub trait NotificationCenter {
    /// Current permission status
    async fn authorization_status(&self) -> AuthorizationStatus;

    /// Ask the user for permission; `Ok(true)` when granted
    async fn request_authorization(&self) -> Result<bool>;

    /// Register a request, replacing any request with the same identifier
    async fn add(&self, request: NotificationRequest) -> Result<()>;

    /// Remove pending requests by identifier; unknown identifiers are ignored
    async fn remove_pending(&self, identifiers: &[String]) -> Result<()>;

    /// All requests that have not fired yet
    async fn pending_requests(&self) -> Result<Vec<NotificationRequest>>;
}

/// Pending-request key for a note
#[must_use]
pub fn reminder_identifier(note_id: &NoteId) -> String {
    format!("note-reminder-{note_id}")
}
