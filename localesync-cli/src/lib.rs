//! CLI library for testing purposes

pub mod config;
pub mod http;
pub mod validation;

pub use config::{CommonArgs, FileConfig, Settings};
pub use http::{HttpTranslationService, classify_response};
