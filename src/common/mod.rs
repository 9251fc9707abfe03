pub mod config;
pub mod config_commands;
pub mod errors;

pub use config::{AppConfig, FailurePolicy};
pub use errors::{InvalidLanguage, SubmissionFailed};
