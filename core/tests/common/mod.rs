#![allow(dead_code)]

use folio_core::FolioCore;
use folio_core::notify::error::NotifyError;
use folio_core::notify::{Delivery, Notifier, TemplateParams};
use folio_core::types::{AppConfig, Config, ContactForm};
use std::cell::Cell;
use std::rc::Rc;
use tempfile::TempDir;

pub fn open_core(temp: &TempDir) -> FolioCore {
    let mut app = AppConfig::default();
    app.owner.email = "owner@example.com".to_string();
    FolioCore::open(
        Config {
            base_path: temp.path().to_path_buf(),
        },
        &app,
    )
}

pub fn form(name: &str, email: &str, phone: &str, message: &str) -> ContactForm {
    ContactForm {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        message: message.to_string(),
    }
}

/// Notifier that counts calls and always fails.
#[derive(Clone, Default)]
pub struct FailingNotifier {
    pub calls: Rc<Cell<usize>>,
}

impl Notifier for FailingNotifier {
    fn send(&self, _params: &TemplateParams) -> Delivery {
        self.calls.set(self.calls.get() + 1);
        Delivery::Failed(NotifyError::Transport("forced failure".to_string()))
    }
}
