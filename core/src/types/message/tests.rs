use super::*;
use chrono::TimeZone;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 15).unwrap() + chrono::Duration::nanoseconds(123_456_789)
}

fn form(name: &str, email: &str, phone: &str, message: &str) -> ContactForm {
    ContactForm {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        message: message.to_string(),
    }
}

#[test]
fn test_capture_trims_fields_and_marks_blank_phone() {
    let captured = ContactMessage::capture(
        &form("  Alice ", " alice@example.com", "   ", " Hello\n"),
        fixed_now(),
    );

    assert_eq!(captured.name(), "Alice");
    assert_eq!(captured.email(), "alice@example.com");
    assert_eq!(captured.phone(), &Phone::NotProvided);
    assert_eq!(captured.message(), "Hello");
}

#[test]
fn test_capture_truncates_timestamp_to_millis() {
    let captured = ContactMessage::capture(&form("a", "a@b.c", "", "m"), fixed_now());
    assert_eq!(
        format_timestamp(captured.timestamp()),
        "2024-05-01T09:30:15.123Z"
    );
}

#[test]
fn test_message_serializes_in_browser_layout() {
    let captured = ContactMessage::capture(&form("Bob", "bob@x.io", "", "Hi"), fixed_now());
    let json = serde_json::to_string(&captured).unwrap();
    assert_eq!(
        json,
        r#"{"name":"Bob","email":"bob@x.io","phone":"Not provided","message":"Hi","timestamp":"2024-05-01T09:30:15.123Z"}"#
    );
}

#[test]
fn test_stored_json_reserializes_identically() {
    let stored = r#"{"name":"Carol","email":"c@d.ef","phone":"+1-555-123-4567","message":"Yo","timestamp":"2023-12-31T23:59:59.999Z"}"#;
    let parsed: ContactMessage = serde_json::from_str(stored).unwrap();

    assert_eq!(parsed.phone(), &Phone::Provided("+1-555-123-4567".to_string()));
    assert_eq!(serde_json::to_string(&parsed).unwrap(), stored);
}

#[test]
fn test_invalid_timestamp_is_rejected() {
    let stored = r#"{"name":"a","email":"a@b.c","phone":"Not provided","message":"m","timestamp":"yesterday"}"#;
    assert!(serde_json::from_str::<ContactMessage>(stored).is_err());
}

#[test]
fn test_file_safe_timestamp_replaces_colons_and_dots() {
    assert_eq!(file_safe_timestamp(fixed_now()), "2024-05-01T09-30-15-123Z");
}

#[test]
fn test_form_field_accessors_cover_every_field() {
    let mut draft = ContactForm::default();
    for field in Field::ALL {
        field.as_str().clone_into(draft.field_mut(field));
    }
    for field in Field::ALL {
        assert_eq!(draft.field(field), field.as_str());
    }
}
