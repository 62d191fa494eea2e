//! Core types for localesync.
//! Stores decode into these; the reconciliation engine and dispatcher operate on them.

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// An opaque language identifier such as `en` or `pt-BR`.
pub type LanguageCode = String;

/// A nested key/value tree. Insertion order is preserved so write-back stays readable.
///
/// `Value::Object` is a subtree, `Value::String` is a leaf. Everything else is
/// opaque: carried by key, never translated.
pub type Tree = serde_json::Map<String, Value>;

/// Every loaded tree, keyed by language. Iteration order is processing order.
pub type Translations = BTreeMap<LanguageCode, Tree>;

/// Keys from the root of a tree down to one value.
pub type KeyPath = Vec<String>;

/// A directly supported `(source, target)` capability of the translation service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationWay {
    pub source: LanguageCode,
    pub target: LanguageCode,
}

impl TranslationWay {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Parses a whole catalog, keeping its order.
    pub fn parse_catalog<S: AsRef<str>>(ids: &[S]) -> Result<Vec<TranslationWay>, Error> {
        ids.iter().map(|id| id.as_ref().parse()).collect()
    }
}

impl FromStr for TranslationWay {
    type Err = Error;

    /// Parses a `"source-target"` identifier, splitting on the first `-`.
    ///
    /// The source is therefore a single language subtag, while the target may
    /// carry a region or script (`en-pt-BR`). Both halves must be canonical
    /// BCP 47 codes, so a region-tagged source such as `pt-BR-en` is rejected
    /// rather than read as `pt` into `BR-en`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.split_once('-') {
            Some((source, target)) if is_canonical_code(source) && is_canonical_code(target) => {
                Ok(TranslationWay::new(source, target))
            }
            _ => Err(Error::InvalidTranslationWay(s.to_string())),
        }
    }
}

fn is_canonical_code(code: &str) -> bool {
    code.parse::<LanguageIdentifier>()
        .is_ok_and(|id| id.to_string() == code)
}

impl Display for TranslationWay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

impl Serialize for TranslationWay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TranslationWay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Checks that `code` parses as a BCP 47 language identifier.
pub fn validate_language_code(code: &str) -> Result<(), Error> {
    if code.trim().is_empty() {
        return Err(Error::validation_error("language code cannot be empty"));
    }
    code.parse::<LanguageIdentifier>()
        .map(|_| ())
        .map_err(|_| {
            Error::validation_error(format!(
                "invalid language code `{}`, expected a BCP 47 identifier",
                code
            ))
        })
}
