//! The per-locale reconciliation pass: difference, translate, merge, prune.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    dispatch::Dispatcher,
    error::Error,
    operations::{count_extra_keys, difference, merge, prune},
    service::TranslationService,
    tree::{TranslationBatch, count_leaves, display_path},
    types::{LanguageCode, Translations, Tree},
};

/// Options controlling a sync pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncOptions {
    /// The authoritative language every other tree is aligned with.
    pub main_language: LanguageCode,
    /// Only these secondary languages are processed when set.
    pub language_filter: Option<Vec<LanguageCode>>,
}

impl SyncOptions {
    pub fn new(main_language: impl Into<String>) -> Self {
        Self {
            main_language: main_language.into(),
            language_filter: None,
        }
    }

    pub fn with_language_filter(mut self, languages: Option<Vec<LanguageCode>>) -> Self {
        self.language_filter = languages;
        self
    }

    fn selects(&self, language: &str) -> bool {
        language != self.main_language
            && self
                .language_filter
                .as_ref()
                .is_none_or(|filter| filter.iter().any(|l| l == language))
    }
}

/// What one secondary language went through.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LanguageReport {
    pub language: LanguageCode,
    /// Leaves sent to the translator.
    pub translated: usize,
    /// Keys dropped because main no longer has them.
    pub removed: usize,
    /// Text leaves after the pass.
    pub total_leaves: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncSummary {
    pub languages: usize,
    pub translated: usize,
    pub removed: usize,
}

/// Sync report with per-language counters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncReport {
    pub main_language: LanguageCode,
    pub summary: SyncSummary,
    pub languages: Vec<LanguageReport>,
}

/// Work a sync pass would do for one language, computed without translating.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LanguagePlan {
    pub language: LanguageCode,
    /// Dotted paths of leaves that need a translation.
    pub missing: Vec<String>,
    /// Keys that would be pruned.
    pub extra_keys: usize,
}

/// Brings every secondary tree in `translations` in line with the main tree.
///
/// Languages are processed one at a time in map order. Results are committed
/// to `translations` only after every language succeeded, so an error leaves
/// the map untouched. Persisting the trees is up to the caller.
pub async fn sync_translations<S: TranslationService>(
    translations: &mut Translations,
    options: &SyncOptions,
    dispatcher: &mut Dispatcher<S>,
) -> Result<SyncReport, Error> {
    let main_language = options.main_language.as_str();
    let main = translations
        .get(main_language)
        .ok_or_else(|| Error::MissingMainLanguage(main_language.to_string()))?;

    let mut report = SyncReport {
        main_language: main_language.to_string(),
        ..SyncReport::default()
    };
    let mut updated = Vec::new();

    for (language, secondary) in translations.iter() {
        if !options.selects(language) {
            continue;
        }
        info!(event = "sync_language", language = %language);
        let (tree, language_report) =
            reconcile_language(main, secondary, main_language, language, dispatcher).await?;

        report.summary.languages += 1;
        report.summary.translated += language_report.translated;
        report.summary.removed += language_report.removed;
        report.languages.push(language_report);
        updated.push((language.clone(), tree));
    }

    translations.extend(updated);
    Ok(report)
}

/// One language: difference, translate, write back, merge, prune.
pub async fn reconcile_language<S: TranslationService>(
    main: &Tree,
    secondary: &Tree,
    main_language: &str,
    language: &str,
    dispatcher: &mut Dispatcher<S>,
) -> Result<(Tree, LanguageReport), Error> {
    let mut diff = difference(main, secondary);
    let batch = TranslationBatch::collect(&diff);
    debug!(event = "sync_difference", language = %language, leaves = batch.len());

    if !batch.is_empty() {
        let translated = dispatcher
            .translate(&batch.texts(), main_language, language)
            .await?;
        batch.apply(translated, &mut diff)?;
    }

    let merged = merge(secondary, &diff);
    let removed = count_extra_keys(main, &merged);
    let tree = prune(main, &merged);

    let report = LanguageReport {
        language: language.to_string(),
        translated: batch.len(),
        removed,
        total_leaves: count_leaves(&tree),
    };
    info!(
        event = "sync_language_done",
        language = %language,
        translated = report.translated,
        removed = report.removed
    );
    Ok((tree, report))
}

/// Computes, per secondary language, which leaves are missing and how many keys are stale.
pub fn plan_translations(
    translations: &Translations,
    options: &SyncOptions,
) -> Result<Vec<LanguagePlan>, Error> {
    let main = translations
        .get(&options.main_language)
        .ok_or_else(|| Error::MissingMainLanguage(options.main_language.clone()))?;

    Ok(translations
        .iter()
        .filter(|(language, _)| options.selects(language))
        .map(|(language, secondary)| {
            let diff = difference(main, secondary);
            LanguagePlan {
                language: language.clone(),
                missing: TranslationBatch::collect(&diff)
                    .items()
                    .iter()
                    .map(|item| display_path(&item.path))
                    .collect(),
                extra_keys: count_extra_keys(main, secondary),
            }
        })
        .collect())
}
