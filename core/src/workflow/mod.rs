//! Contact form submission: validate, notify, persist, export, report.
//!
//! Only a failure to persist or export surfaces as an error notification.
//! Validation problems stay attached to their fields and a failed email
//! notification is logged and otherwise ignored.

use crate::core::export::Exporter;
use crate::core::export::error::ExportError;
use crate::core::local_store::error::StoreError;
use crate::core::message_store::MessageStore;
use crate::notify::{Delivery, Notifier, TemplateParams};
use crate::types::{ContactForm, ContactMessage, Field, Notification};
use crate::validate::{self, FieldErrors};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, warn};

pub const SENDING: &str = "Sending message...";
pub const SENT: &str = "Message sent successfully! You will receive a response soon.";
pub const NO_MESSAGES: &str = "No messages to download.";

/// Where a submission attempt currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Validating,
    Sending,
}

/// Result of one submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; the draft is kept and errors are attached to fields.
    Rejected(FieldErrors),
    /// Storage was unavailable when the form was opened; nothing was attempted.
    Disabled(Notification),
    Sent {
        message: ContactMessage,
        delivery: Delivery,
        export: Option<PathBuf>,
        notification: Notification,
    },
    /// Persisting or exporting failed after the message was built.
    Failed(Notification),
}

impl SubmitOutcome {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            SubmitOutcome::Rejected(_) => None,
            SubmitOutcome::Disabled(n) | SubmitOutcome::Failed(n) => Some(n),
            SubmitOutcome::Sent { notification, .. } => Some(notification),
        }
    }
}

/// Contact form bound to a message store for the duration of a page visit.
pub struct ContactWorkflow<'s> {
    store: &'s mut MessageStore,
    notifier: Box<dyn Notifier>,
    exporter: Exporter,
    owner_email: String,
    to_name: String,
    storage_available: bool,
    state: WorkflowState,
    draft: ContactForm,
    errors: FieldErrors,
}

impl<'s> ContactWorkflow<'s> {
    /// Opens the form, probing storage once. Unavailable storage disables the form.
    pub fn new(
        store: &'s mut MessageStore,
        notifier: Box<dyn Notifier>,
        exporter: Exporter,
        owner_email: impl Into<String>,
        to_name: impl Into<String>,
    ) -> Self {
        let storage_available = store.is_available();
        if !storage_available {
            warn!("contact form disabled: message storage is unavailable");
        }

        Self {
            store,
            notifier,
            exporter,
            owner_email: owner_email.into(),
            to_name: to_name.into(),
            storage_available,
            state: WorkflowState::Idle,
            draft: ContactForm::default(),
            errors: FieldErrors::new(),
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// False when the form inputs are disabled.
    pub fn storage_available(&self) -> bool {
        self.storage_available
    }

    /// Persistent banner shown while storage is unavailable.
    pub fn banner(&self) -> Option<Notification> {
        (!self.storage_available).then(|| self.unavailable_notification())
    }

    pub fn draft(&self) -> &ContactForm {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn store(&self) -> &MessageStore {
        &*self.store
    }

    /// Replaces a draft field and clears its pending error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.draft.field_mut(field) = value.into();
        self.errors.remove(&field);
    }

    /// Replaces the whole draft.
    pub fn fill(&mut self, form: ContactForm) {
        self.draft = form;
        self.errors.clear();
    }

    /// Runs one submission of the current draft.
    pub fn submit(&mut self, now: DateTime<Utc>) -> SubmitOutcome {
        self.submit_with_progress(now, |_| {})
    }

    /// Like [`submit`](Self::submit), calling `on_sending` with the in-progress
    /// notification once validation has passed and before the notifier runs.
    pub fn submit_with_progress(
        &mut self,
        now: DateTime<Utc>,
        on_sending: impl FnOnce(&Notification),
    ) -> SubmitOutcome {
        if !self.storage_available {
            return SubmitOutcome::Disabled(self.unavailable_notification());
        }

        self.state = WorkflowState::Validating;
        let errors = validate::validate(&self.draft);
        if !errors.is_empty() {
            self.state = WorkflowState::Idle;
            self.errors = errors.clone();
            return SubmitOutcome::Rejected(errors);
        }

        self.state = WorkflowState::Sending;
        info!("{SENDING}");
        on_sending(&Notification::info(SENDING));
        let message = ContactMessage::capture(&self.draft, now);

        let delivery = self
            .notifier
            .send(&TemplateParams::for_message(&message, &self.to_name));
        if let Delivery::Failed(e) = &delivery {
            warn!(error = %e, "continuing without email notification");
        }

        let outcome = match self.persist(&message) {
            Ok(export) => {
                self.draft = ContactForm::default();
                self.errors.clear();
                SubmitOutcome::Sent {
                    message,
                    delivery,
                    export,
                    notification: Notification::success(SENT),
                }
            }
            Err(e) => {
                error!(error = %e, "failed to save message");
                SubmitOutcome::Failed(Notification::error(format!(
                    "Failed to send message. Please try again or {}",
                    self.email_hint()
                )))
            }
        };

        self.state = WorkflowState::Idle;
        outcome
    }

    /// Appends and exports the message when storage is usable.
    ///
    /// Storage is probed again before writing. A failed probe disables the
    /// form for later submissions and skips persistence for this one.
    fn persist(&mut self, message: &ContactMessage) -> Result<Option<PathBuf>, PersistError> {
        if !self.store.is_available() {
            warn!("message storage became unavailable, message not saved");
            self.storage_available = false;
            return Ok(None);
        }

        self.store.append(message.clone())?;
        let path = self.exporter.export_message(message)?;
        Ok(Some(path))
    }

    /// Downloads every stored message as one JSON file.
    pub fn download_all(&mut self, now: DateTime<Utc>) -> Notification {
        if !self.storage_available {
            return Notification::error("Message storage is not available.");
        }

        let messages = self.store.list_all();
        if messages.is_empty() {
            return Notification::error(NO_MESSAGES);
        }

        match self.exporter.export_all(&messages, now) {
            Ok(path) => {
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Notification::success(format!(
                    "Downloaded {} messages as {filename}",
                    messages.len()
                ))
            }
            Err(e) => {
                error!(error = %e, "failed to download messages");
                Notification::error("Failed to download messages.")
            }
        }
    }

    fn unavailable_notification(&self) -> Notification {
        Notification::error(format!(
            "Message storage is not available. Please {}",
            self.email_hint()
        ))
    }

    fn email_hint(&self) -> String {
        if self.owner_email.is_empty() {
            "email the site owner directly".to_string()
        } else {
            format!("email directly at {}", self.owner_email)
        }
    }
}

#[derive(Debug, Error)]
enum PersistError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),
}
