//! Admin review panel over the message store.
//!
//! Entry is gated by [`AdminGate`], a plain-text password comparison done on
//! the visitor's own machine. Anyone with access to the data directory or the
//! config file can read the messages directly; the gate only keeps the panel
//! out of casual view and must not be treated as authentication.

use crate::core::export::Exporter;
use crate::core::message_store::MessageStore;
use crate::types::{AdminConfig, ContactMessage, Notification};
use chrono::{DateTime, Utc};
use error::AdminError;
use tracing::{error, info};

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum AdminError {
        #[error("Incorrect password")]
        AccessDenied,
    }
}

/// UI-level gate in front of the admin panel. Not a security boundary.
#[derive(Clone)]
pub struct AdminGate {
    password: String,
}

impl AdminGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.password.clone())
    }

    pub fn permits(&self, attempt: &str) -> bool {
        attempt == self.password
    }
}

pub const LOAD_FAILED: &str = "Failed to load messages";

/// What the panel shows for the current snapshot.
#[derive(Debug, PartialEq, Eq)]
pub enum Listing<'a> {
    /// Nothing has been received yet.
    Empty,
    /// The store could not be read; distinct from an empty inbox.
    Unavailable,
    Messages(&'a [ContactMessage]),
}

pub struct AdminPanel<'s> {
    store: &'s mut MessageStore,
    exporter: Exporter,
    messages: Vec<ContactMessage>,
    load_failed: bool,
}

impl<'s> AdminPanel<'s> {
    /// Opens the panel if `attempt` passes the gate. Asked again on every entry.
    pub fn open(
        gate: &AdminGate,
        attempt: &str,
        store: &'s mut MessageStore,
        exporter: Exporter,
    ) -> Result<Self, AdminError> {
        if !gate.permits(attempt) {
            return Err(AdminError::AccessDenied);
        }

        let (messages, load_failed) = load(store);
        Ok(Self {
            store,
            exporter,
            messages,
            load_failed,
        })
    }

    pub fn list(&self) -> Listing<'_> {
        if self.load_failed {
            Listing::Unavailable
        } else if self.messages.is_empty() {
            Listing::Empty
        } else {
            Listing::Messages(&self.messages)
        }
    }

    pub fn count(&self) -> usize {
        self.messages.len()
    }

    /// Download and clear are only offered while there is something to act on.
    pub fn can_bulk_act(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Error to show while the last load failed.
    pub fn load_notification(&self) -> Option<Notification> {
        self.load_failed.then(|| Notification::error(LOAD_FAILED))
    }

    /// Re-reads the store to pick up messages saved since the panel opened.
    pub fn refresh(&mut self) {
        (self.messages, self.load_failed) = load(self.store);
    }

    /// Exports the current snapshot as one JSON file.
    pub fn export_all(&self, now: DateTime<Utc>) -> Notification {
        if self.messages.is_empty() {
            return Notification::error("No messages to download");
        }

        match self.exporter.export_admin(&self.messages, now) {
            Ok(_) => Notification::success(format!("Downloaded {} messages", self.messages.len())),
            Err(e) => {
                error!(error = %e, "failed to download messages");
                Notification::error("Failed to download messages")
            }
        }
    }

    /// Deletes every message after `confirm` accepts the prompt. Irreversible.
    ///
    /// Returns `None` when the confirmation is declined.
    pub fn clear_all(&mut self, confirm: impl FnOnce(&str) -> bool) -> Option<Notification> {
        if self.messages.is_empty() {
            return Some(Notification::error("No messages to clear"));
        }

        let prompt = format!(
            "Are you sure you want to delete all {} messages? This cannot be undone.",
            self.messages.len()
        );
        if !confirm(&prompt) {
            return None;
        }

        match self.store.clear_all() {
            Ok(()) => {
                info!(count = self.messages.len(), "admin cleared messages");
                self.messages.clear();
                Some(Notification::success("All messages cleared successfully"))
            }
            Err(e) => {
                error!(error = %e, "failed to clear messages");
                Some(Notification::error("Failed to clear messages"))
            }
        }
    }
}

/// Snapshot of the store plus whether reading it failed.
fn load(store: &MessageStore) -> (Vec<ContactMessage>, bool) {
    match store.try_list_all() {
        Ok(messages) => (messages, false),
        Err(e) => {
            error!(error = %e, "failed to load messages");
            (Vec::new(), true)
        }
    }
}

/// Formats a received timestamp like `Jan 5, 2024, 03:07 PM` (UTC).
pub fn format_received(instant: DateTime<Utc>) -> String {
    instant.format("%b %-d, %Y, %I:%M %p").to_string()
}
