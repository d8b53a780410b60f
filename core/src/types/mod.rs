pub mod config;
pub use config::{
    AdminConfig, AppConfig, AppConfigError, Config, NotifierConfig, OwnerConfig, ProfileConfig,
    StorageConfig,
};

pub(crate) mod storage_key;
pub use storage_key::{MAX_STORAGE_KEY_LENGTH, StorageKey};

pub(crate) mod message;
pub use message::{
    ContactForm, ContactMessage, Field, Phone, file_safe_timestamp, format_timestamp,
};

pub(crate) mod notification;
pub use notification::{Notification, NotificationKind};
