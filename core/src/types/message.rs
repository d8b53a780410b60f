//! Contact form input and the persisted message built from it.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One form field of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Phone, Field::Message];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, unvalidated contact form values as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Message => &mut self.message,
        }
    }
}

/// Optional phone number. Absent numbers are stored as the `"Not provided"` marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Phone {
    Provided(String),
    NotProvided,
}

impl Phone {
    pub const NOT_PROVIDED: &'static str = "Not provided";

    /// Builds a phone value from form input; blank input becomes [`Phone::NotProvided`].
    pub fn from_input(raw: &str) -> Self {
        match raw.trim() {
            "" => Phone::NotProvided,
            trimmed => Phone::Provided(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Phone::Provided(number) => number,
            Phone::NotProvided => Self::NOT_PROVIDED,
        }
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Phone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Phone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == Self::NOT_PROVIDED {
            Ok(Phone::NotProvided)
        } else {
            Ok(Phone::Provided(raw))
        }
    }
}

/// A submitted contact message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    name: String,
    email: String,
    phone: Phone,
    message: String,
    #[serde(with = "iso8601_millis")]
    timestamp: DateTime<Utc>,
}

impl ContactMessage {
    /// Captures a message from form values, trimming every field.
    ///
    /// The timestamp is truncated to millisecond precision so the stored
    /// representation survives a JSON round trip unchanged.
    pub fn capture(form: &ContactForm, now: DateTime<Utc>) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: Phone::from_input(&form.phone),
            message: form.message.trim().to_string(),
            timestamp: now.trunc_subsecs(3),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Formats an instant the way it appears in stored timestamps (`2024-05-01T09:30:00.000Z`).
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Timestamp form safe for file names: `:` and `.` replaced with `-`.
pub fn file_safe_timestamp(instant: DateTime<Utc>) -> String {
    format_timestamp(instant).replace([':', '.'], "-")
}

mod iso8601_millis {
    use super::format_timestamp;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|instant| instant.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests;
