//! Reminder scheduler

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Note;

use super::{
    reminder_identifier, AuthorizationStatus, NotificationCenter, NotificationRequest,
    ReminderError, ReminderState,
};

/// Headline of every reminder notification
pub const REMINDER_TITLE: &str = "Note reminder";
/// Body used when the note has no title
pub const FALLBACK_BODY: &str = "Open your note";

const MINUTE_MS: i64 = 60_000;

/// Trigger time for a reminder timestamp, with seconds discarded
pub fn fire_time(reminder_ms: i64) -> Option<DateTime<Utc>> {
    reminder_ms
        .checked_sub(reminder_ms.rem_euclid(MINUTE_MS))
        .and_then(DateTime::from_timestamp_millis)
}

/// Maps note reminders onto one-shot notifications
pub struct ReminderScheduler<N> {
    center: N,
}

impl<N: NotificationCenter> ReminderScheduler<N> {
    /// Create a scheduler using the given notification center
    pub const fn new(center: N) -> Self {
        Self { center }
    }

    /// Access the notification center
    pub const fn center(&self) -> &N {
        &self.center
    }

    /// Register the note's reminder with the notification center.
    ///
    /// Requests permission first when it has not been granted. Any stale
    /// request for the same note is removed before the new one is added.
    pub async fn schedule(
        &self,
        note: &Note,
    ) -> std::result::Result<NotificationRequest, ReminderError> {
        let Some(reminder) = note.reminder else {
            tracing::warn!("Cannot schedule note {}: no reminder set", note.id);
            return Err(ReminderError::NotActive(note.id.clone()));
        };
        let fire_at = fire_time(reminder).ok_or(ReminderError::InvalidTime(reminder))?;

        self.ensure_permission().await?;

        let identifier = reminder_identifier(&note.id);
        self.center
            .remove_pending(std::slice::from_ref(&identifier))
            .await
            .map_err(|error| ReminderError::Platform(error.to_string()))?;

        let title = note.title.trim();
        let request = NotificationRequest {
            identifier,
            title: REMINDER_TITLE.to_string(),
            body: if title.is_empty() {
                FALLBACK_BODY.to_string()
            } else {
                title.to_string()
            },
            fire_at,
        };

        self.center.add(request.clone()).await.map_err(|error| {
            tracing::warn!("Scheduling reminder for note {} failed: {error}", note.id);
            ReminderError::Platform(error.to_string())
        })?;

        let verified = self
            .center
            .pending_requests()
            .await
            .map(|pending| pending.iter().any(|p| p.identifier == request.identifier))
            .unwrap_or(false);
        tracing::info!(
            "Scheduled reminder for note {} at {} (verified: {verified})",
            note.id,
            request.fire_at
        );

        Ok(request)
    }

    /// Remove any pending reminder for the note. Safe to call repeatedly.
    pub async fn cancel(&self, note: &Note) {
        let identifier = reminder_identifier(&note.id);
        match self.center.remove_pending(&[identifier]).await {
            Ok(()) => tracing::debug!("Cancelled reminder for note {}", note.id),
            Err(error) => {
                tracing::warn!("Failed to cancel reminder for note {}: {error}", note.id);
            }
        }
    }

    /// All pending reminder notifications
    pub async fn pending(&self) -> Result<Vec<NotificationRequest>> {
        self.center.pending_requests().await
    }

    /// Whether the platform currently holds a trigger for the note
    pub async fn state_of(&self, note: &Note) -> ReminderState {
        let identifier = reminder_identifier(&note.id);
        let scheduled = self
            .center
            .pending_requests()
            .await
            .map(|pending| pending.iter().any(|p| p.identifier == identifier))
            .unwrap_or(false);

        if scheduled {
            ReminderState::Scheduled
        } else {
            ReminderState::NoActive
        }
    }

    async fn ensure_permission(&self) -> std::result::Result<(), ReminderError> {
        if self.center.authorization_status().await == AuthorizationStatus::Authorized {
            return Ok(());
        }

        tracing::debug!("Requesting notification permission");
        match self.center.request_authorization().await {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::warn!("Notification permission denied");
                Err(ReminderError::PermissionDenied)
            }
            Err(error) => {
                tracing::warn!("Notification permission request failed: {error}");
                Err(ReminderError::PermissionDenied)
            }
        }
    }
}
