use folio_core::admin::{LOAD_FAILED, Listing, format_received};
use folio_core::profile::ProfileSource;
use folio_core::profile::error::ProfileLoadError;
use folio_core::types::Notification;
use folio_core::validate::FieldErrors;
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

pub fn notification(notification: &Notification) {
    if notification.is_error() {
        eprintln!("{notification}");
    } else {
        println!("{notification}");
    }
}

pub fn field_errors(errors: &FieldErrors) {
    eprintln!("Please fix the following:");
    for (field, message) in errors {
        eprintln!("  {field}: {message}");
    }
}

pub fn listing(listing: Listing<'_>) -> String {
    let messages = match listing {
        Listing::Empty => return "No messages yet.\n".to_string(),
        Listing::Unavailable => return format!("{LOAD_FAILED}\n"),
        Listing::Messages(messages) => messages,
    };

    let mut out = format!("Messages ({} total)\n", messages.len());
    for message in messages {
        let _ = writeln!(
            out,
            "\n[{}] {} <{}> phone: {}",
            format_received(message.timestamp()),
            message.name(),
            message.email(),
            message.phone()
        );
        for line in message.message().lines() {
            let _ = writeln!(out, "    {line}");
        }
    }
    out
}

/// Asks a yes/no question on stdin; anything but `y`/`yes` declines.
pub fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn load_failure(source: &ProfileSource, error: &ProfileLoadError) -> String {
    format!("Error loading profile\n\n{error}\n\nSource: {source}\n")
}
