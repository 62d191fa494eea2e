use crate::config::{CommonArgs, Settings};
use crate::http::HttpTranslationService;
use crate::validation::{validate_dir_path, validate_language_code, validate_output_path};
use localesync::{
    Dispatcher, JsonDirStore, SyncOptions as LibSyncOptions, SyncReport, TranslationGraph,
    sync_translations, traits::TreeStore,
};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub common: CommonArgs,
    pub endpoint: Option<String>,
    pub only: Vec<String>,
    pub report_json: Option<String>,
    pub dry_run: bool,
}

fn write_report(path: &str, report: &SyncReport) -> Result<(), String> {
    let text = serde_json::to_string_pretty(report)
        .map_err(|e| format!("Failed to serialize report JSON: {}", e))?;
    std::fs::write(path, text)
        .map_err(|e| format!("Failed to write report JSON '{}': {}", path, e))
}

/// Turns `--only` values into a language filter. Every value must be a loaded secondary language.
fn language_filter(only: &[String], settings: &Settings) -> Result<Option<Vec<String>>, String> {
    if only.is_empty() {
        return Ok(None);
    }
    for lang in only {
        validate_language_code(lang)?;
        if *lang == settings.main_language {
            return Err(format!("--only cannot select the main language '{}'", lang));
        }
        if !settings.languages.contains(lang) {
            return Err(format!(
                "--only language '{}' is not loaded (loaded: {})",
                lang,
                settings.languages.join(", ")
            ));
        }
    }
    Ok(Some(only.to_vec()))
}

fn print_report(report: &SyncReport) {
    println!("Main language: {}", report.main_language);
    for lang in &report.languages {
        println!(
            "  {}: translated {}, removed {}, leaves {}",
            lang.language, lang.translated, lang.removed, lang.total_leaves
        );
    }
    println!("Languages synced: {}", report.summary.languages);
    println!("Translated: {}", report.summary.translated);
    println!("Removed: {}", report.summary.removed);
}

pub fn run_sync_command(opts: SyncOptions) -> Result<(), String> {
    let settings = Settings::resolve(&opts.common)?;
    if let Some(report_path) = &opts.report_json {
        validate_output_path(report_path)?;
    }
    validate_dir_path(&settings.locales_dir)?;
    let filter = language_filter(&opts.only, &settings)?;

    let endpoint = opts
        .endpoint
        .clone()
        .or_else(|| settings.endpoint.clone())
        .ok_or_else(|| {
            "No translation endpoint configured; pass --endpoint or set `endpoint`".to_string()
        })?;

    let store = JsonDirStore::new(&settings.locales_dir);
    let mut translations = store
        .load_all(&settings.languages)
        .map_err(|e| format!("Failed to load trees from '{}': {}", store.dir().display(), e))?;
    info!(
        event = "trees_loaded",
        dir = %store.dir().display(),
        languages = translations.len()
    );

    let service =
        HttpTranslationService::new(endpoint, settings.timeout).map_err(|e| e.to_string())?;
    let mut dispatcher = Dispatcher::with_options(
        service,
        TranslationGraph::new(&settings.catalog),
        settings.dispatch.clone(),
    );
    let options = LibSyncOptions::new(settings.main_language.clone())
        .with_language_filter(filter);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {}", e))?;
    let report = runtime
        .block_on(sync_translations(&mut translations, &options, &mut dispatcher))
        .map_err(|e| format!("Sync failed: {}", e))?;

    print_report(&report);

    if let Some(report_path) = &opts.report_json {
        write_report(report_path, &report)?;
        println!("Report JSON written: {}", report_path);
    }

    if opts.dry_run {
        println!("Dry-run mode: no files were written");
        return Ok(());
    }

    store
        .save_all(&translations)
        .map_err(|e| format!("Failed to write trees: {}", e))?;
    println!("✅ Sync complete: {}", store.dir().display());
    Ok(())
}
