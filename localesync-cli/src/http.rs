//! JSON-over-HTTP translation backend.

use std::time::Duration;

use async_trait::async_trait;
use localesync::{Error, ServiceResponse, TranslationRequest, TranslationService};
use serde::Deserialize;
use tracing::debug;

/// Posts each batch as `{"sourceLanguage", "targetLanguage", "texts"}` to one endpoint.
pub struct HttpTranslationService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTranslationService {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl TranslationService for HttpTranslationService {
    async fn translate(&self, request: &TranslationRequest) -> Result<ServiceResponse, Error> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        debug!(event = "service_response", status = status.as_u16(), bytes = body.len());
        classify_response(status.as_u16(), &body)
    }
}

#[derive(Deserialize)]
struct TranslatedBody {
    translated: Vec<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    language: Option<String>,
}

/// Maps an HTTP status and body onto what the dispatcher understands.
///
/// - `{"translated": [...]}` on a success status is a translation.
/// - A body mentioning a tokenizer or an unsupported language is a refused pair.
/// - Other 5xx answers are internal errors and get retried.
/// - Anything else is malformed.
pub fn classify_response(status: u16, body: &str) -> Result<ServiceResponse, Error> {
    if (200..300).contains(&status)
        && let Ok(parsed) = serde_json::from_str::<TranslatedBody>(body)
    {
        return Ok(ServiceResponse::Translated(parsed.translated));
    }

    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let message = parsed
        .as_ref()
        .map(|e| e.error.as_str())
        .unwrap_or(body)
        .to_lowercase();

    if message.contains("tokenizer")
        || message.contains("not supported")
        || message.contains("unsupported")
    {
        return Ok(ServiceResponse::Unsupported {
            language: parsed.and_then(|e| e.language),
        });
    }

    if (500..600).contains(&status) || message.contains("internal") {
        return Ok(ServiceResponse::InternalError);
    }

    Err(Error::MalformedResponse(format!(
        "HTTP {}: {}",
        status,
        truncate(body, 200)
    )))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translated_body() {
        let response = classify_response(200, r#"{"translated": ["Hallo", "Welt"]}"#).unwrap();
        assert_eq!(
            response,
            ServiceResponse::Translated(vec!["Hallo".to_string(), "Welt".to_string()])
        );
    }

    #[test]
    fn test_tokenizer_error_is_unsupported() {
        let response = classify_response(
            500,
            r#"{"error": "Tokenizer not found for language", "language": "ja"}"#,
        )
        .unwrap();
        assert_eq!(
            response,
            ServiceResponse::Unsupported {
                language: Some("ja".to_string())
            }
        );
    }

    #[test]
    fn test_plain_text_unsupported() {
        let response = classify_response(400, "language pair ru-ja is not supported").unwrap();
        assert_eq!(response, ServiceResponse::Unsupported { language: None });
    }

    #[test]
    fn test_internal_error() {
        assert_eq!(
            classify_response(500, "Internal Server Error").unwrap(),
            ServiceResponse::InternalError
        );
        assert_eq!(
            classify_response(200, r#"{"error": "internal error"}"#).unwrap(),
            ServiceResponse::InternalError
        );
        assert_eq!(
            classify_response(503, "").unwrap(),
            ServiceResponse::InternalError
        );
    }

    #[test]
    fn test_unexpected_answer_is_malformed() {
        let err = classify_response(404, "Not Found").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(ref m) if m.contains("404")));
        assert!(classify_response(200, "{\"other\": 1}").is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("привет", 2), "пр...");
    }
}
