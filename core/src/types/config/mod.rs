mod app;
mod core;

pub use app::{
    AdminConfig, AppConfig, AppConfigError, NotifierConfig, OwnerConfig, ProfileConfig,
    StorageConfig,
};
pub use core::Config;
