use super::*;
use crate::notify::DisabledNotifier;
use crate::types::ContactForm;
use crate::workflow::SubmitOutcome;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

mod common {
    use super::*;

    pub(super) fn config(temp: &TempDir) -> Config {
        Config {
            base_path: temp.path().to_path_buf(),
        }
    }

    pub(super) fn alice() -> ContactForm {
        ContactForm {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: "+1-555-123-4567".to_string(),
            message: "Hello".to_string(),
        }
    }
}

use common::{alice, config};

#[test]
fn test_open_creates_available_store() {
    let temp = TempDir::new().unwrap();
    let mut core = FolioCore::open(config(&temp), &AppConfig::default());

    assert!(core.store_mut().is_available());
    assert_eq!(core.data_dir(), temp.path());
    assert!(temp.path().join("folio.redb").exists());
}

#[test]
fn test_second_open_of_same_directory_is_unavailable() {
    let temp = TempDir::new().unwrap();
    let _first = FolioCore::open(config(&temp), &AppConfig::default());

    let mut second = FolioCore::open(config(&temp), &AppConfig::default());

    assert!(!second.store_mut().is_available());
}

#[test]
fn test_exports_default_to_data_directory() {
    let temp = TempDir::new().unwrap();
    let core = FolioCore::open(config(&temp), &AppConfig::default());

    assert_eq!(core.exporter().dir(), temp.path().join("exports"));
}

#[test]
fn test_exports_dir_override() {
    let temp = TempDir::new().unwrap();
    let mut app = AppConfig::default();
    app.storage.exports_dir = Some(temp.path().join("downloads"));

    let core = FolioCore::open(config(&temp), &app);

    assert_eq!(core.exporter().dir(), temp.path().join("downloads"));
}

#[test]
fn test_configured_namespace_is_used() {
    let temp = TempDir::new().unwrap();
    let mut app = AppConfig::default();
    app.storage.namespace = "inbox".to_string();

    let core = FolioCore::open(config(&temp), &app);

    assert_eq!(core.store().key().as_str(), "inbox");
}

#[test]
fn test_submission_is_visible_to_admin_panel() {
    let temp = TempDir::new().unwrap();
    let mut core = FolioCore::open(config(&temp), &AppConfig::default());
    let now = Utc.with_ymd_and_hms(2024, 2, 2, 8, 0, 0).unwrap();

    let mut form = core.contact_form(Box::new(DisabledNotifier));
    form.fill(alice());
    assert!(matches!(form.submit(now), SubmitOutcome::Sent { .. }));
    drop(form);

    let gate = AdminGate::new("admin123");
    let panel = core.admin_panel(&gate, "admin123").unwrap();
    assert_eq!(panel.count(), 1);
    assert!(
        temp.path()
            .join("exports")
            .join("message_2024-02-02T08-00-00-000Z.json")
            .exists()
    );
}

mod owner_details {
    use super::common::*;
    use super::*;
    use crate::types::Notification;

    fn profile() -> Profile {
        Profile::from_json(
            r#"{
              "name": "Jane Doe", "title": "Engineer", "location": "Earth", "about": "Hi",
              "github": "gh", "linkedin": "li", "email": "jane@example.com",
              "education": [], "experience": [], "skills": {}, "projects": []
            }"#,
        )
        .unwrap()
    }

    fn failed_submit(core: &mut FolioCore) -> Notification {
        let mut form = core.contact_form(Box::new(DisabledNotifier));
        form.fill(alice());
        match form.submit(Utc.with_ymd_and_hms(2024, 2, 2, 8, 0, 0).unwrap()) {
            SubmitOutcome::Failed(notification) => notification,
            other => panic!("expected Failed outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_failure_text_has_no_dangling_address() {
        let temp = TempDir::new().unwrap();
        let mut app = AppConfig::default();
        app.storage.quota_bytes = 10;
        assert!(app.validate().is_empty());
        let mut core = FolioCore::open(config(&temp), &app);

        let notification = failed_submit(&mut core);

        assert_eq!(
            notification.message,
            "Failed to send message. Please try again or email the site owner directly"
        );
    }

    #[test]
    fn test_profile_fills_blank_owner_details() {
        let temp = TempDir::new().unwrap();
        let mut app = AppConfig::default();
        app.storage.quota_bytes = 10;
        let mut core = FolioCore::open(config(&temp), &app);
        assert!(core.needs_profile());

        core.adopt_profile(&profile());

        assert!(!core.needs_profile());
        assert_eq!(core.owner_email(), "jane@example.com");
        assert_eq!(core.to_name(), "Jane");
        assert_eq!(
            failed_submit(&mut core).message,
            "Failed to send message. Please try again or email directly at jane@example.com"
        );
    }

    #[test]
    fn test_configured_owner_details_win_over_profile() {
        let temp = TempDir::new().unwrap();
        let mut app = AppConfig::default();
        app.owner.email = "owner@example.com".to_string();
        app.notifier.to_name = "Owner".to_string();
        let mut core = FolioCore::open(config(&temp), &app);
        assert!(!core.needs_profile());

        core.adopt_profile(&profile());

        assert_eq!(core.owner_email(), "owner@example.com");
        assert_eq!(core.to_name(), "Owner");
    }
}
