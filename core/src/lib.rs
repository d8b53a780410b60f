pub mod admin;
pub mod core;
pub mod notify;
pub mod profile;
pub mod types;
pub mod validate;
pub mod workflow;

pub use crate::core::FolioCore;
