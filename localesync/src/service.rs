//! The boundary to the external single-pair batch translation service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{error::Error, types::LanguageCode};

/// One batch sent to the translation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub source_language: LanguageCode,
    pub target_language: LanguageCode,
    pub texts: Vec<String>,
}

/// What the service answered for a batch it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceResponse {
    /// Translations in request order.
    Translated(Vec<String>),
    /// Generic server-side failure; the same batch may be retried.
    InternalError,
    /// The service cannot translate this pair (tokenizer missing for `language`).
    Unsupported { language: Option<LanguageCode> },
}

/// A translation backend.
///
/// Connection problems are reported as [`Error::Transport`]; everything the
/// service actually answered is a [`ServiceResponse`].
#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<ServiceResponse, Error>;
}
