//! Storage, export and the components built on them, opened from one data directory.

use crate::admin::error::AdminError;
use crate::admin::{AdminGate, AdminPanel};
use crate::core::export::Exporter;
use crate::core::local_store::{LocalStore, MemoryBackend};
use crate::core::message_store::MessageStore;
use crate::notify::Notifier;
use crate::profile::Profile;
use crate::types::{AppConfig, Config};
use crate::workflow::ContactWorkflow;
use std::path::{Path, PathBuf};
use tracing::warn;

pub(crate) mod db;
pub mod export;
pub mod local_store;
pub mod message_store;

pub struct FolioCore {
    base_path: PathBuf,
    store: MessageStore,
    exporter: Exporter,
    owner_email: String,
    to_name: String,
}

impl FolioCore {
    /// Opens the message store in the data directory.
    ///
    /// A database that cannot be opened (for example because another process
    /// holds its lock) leaves the store unavailable instead of failing, so the
    /// contact form can report it.
    pub fn open(config: Config, app: &AppConfig) -> Self {
        let local = match LocalStore::open(&config, app.storage.quota_bytes) {
            Ok(local) => local,
            Err(e) => {
                warn!(
                    error = %e,
                    path = %config.db_path().display(),
                    "failed to open message database"
                );
                LocalStore::new(MemoryBackend::unavailable(), app.storage.quota_bytes)
            }
        };

        let store = MessageStore::new(local, app.storage_key());
        Self::with_store(config, app, store)
    }

    /// Builds the core around an already constructed store.
    pub fn with_store(config: Config, app: &AppConfig, store: MessageStore) -> Self {
        let exporter = Exporter::new(
            app.storage
                .exports_dir
                .clone()
                .unwrap_or_else(|| config.exports_path()),
        );

        Self {
            base_path: config.base_path,
            store,
            exporter,
            owner_email: app.owner.email.clone(),
            to_name: app.notifier.to_name.clone(),
        }
    }

    /// Returns the base data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.base_path
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut MessageStore {
        &mut self.store
    }

    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    /// Address offered when the form cannot deliver; empty when unknown.
    pub fn owner_email(&self) -> &str {
        &self.owner_email
    }

    /// Name greeted in notification emails.
    pub fn to_name(&self) -> &str {
        &self.to_name
    }

    /// True while config leaves the owner's email or name blank.
    pub fn needs_profile(&self) -> bool {
        self.owner_email.is_empty() || self.to_name.is_empty()
    }

    /// Fills contact details left blank in config from the profile document.
    /// Configured values win.
    pub fn adopt_profile(&mut self, profile: &Profile) {
        if self.owner_email.is_empty() {
            self.owner_email = profile.email.trim().to_string();
        }
        if self.to_name.is_empty() {
            self.to_name = profile.first_name().to_string();
        }
    }
}

/// Component constructors.
impl FolioCore {
    /// Opens the contact form for one visit.
    pub fn contact_form(&mut self, notifier: Box<dyn Notifier>) -> ContactWorkflow<'_> {
        ContactWorkflow::new(
            &mut self.store,
            notifier,
            self.exporter.clone(),
            self.owner_email.clone(),
            self.to_name.clone(),
        )
    }

    /// Opens the admin panel if `attempt` passes the gate.
    pub fn admin_panel(
        &mut self,
        gate: &AdminGate,
        attempt: &str,
    ) -> Result<AdminPanel<'_>, AdminError> {
        AdminPanel::open(gate, attempt, &mut self.store, self.exporter.clone())
    }
}

#[cfg(test)]
mod tests;
