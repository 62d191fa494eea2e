use crate::config::{CommonArgs, Settings};
use crate::validation::{validate_dir_path, validate_output_path};
use localesync::{JsonDirStore, LanguagePlan, SyncOptions, plan_translations, traits::TreeStore};
use serde_json::json;

#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    pub common: CommonArgs,
    pub json: bool,
    pub output: Option<String>,
}

fn print_or_write(output: Option<&String>, content: &str) -> Result<(), String> {
    if let Some(path) = output {
        std::fs::write(path, content).map_err(|e| format!("Failed to write {}: {}", path, e))?;
        println!("Report written: {}", path);
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn render_human(main_language: &str, plans: &[LanguagePlan]) -> String {
    let mut lines = Vec::new();
    lines.push("=== Diff ===".to_string());
    lines.push(format!("Main language: {}", main_language));
    lines.push(format!(
        "Totals: missing={}, extra={}",
        plans.iter().map(|p| p.missing.len()).sum::<usize>(),
        plans.iter().map(|p| p.extra_keys).sum::<usize>()
    ));

    for plan in plans {
        lines.push(format!("\nLanguage: {}", plan.language));
        lines.push(format!("  missing: {}", plan.missing.len()));
        lines.push(format!("  extra: {}", plan.extra_keys));
        if !plan.missing.is_empty() {
            lines.push(format!("  missing keys: {}", plan.missing.join(", ")));
        }
    }

    lines.join("\n")
}

fn render_json(main_language: &str, plans: &[LanguagePlan]) -> Result<String, String> {
    let report = json!({
        "main_language": main_language,
        "summary": {
            "languages": plans.len(),
            "missing": plans.iter().map(|p| p.missing.len()).sum::<usize>(),
            "extra": plans.iter().map(|p| p.extra_keys).sum::<usize>(),
        },
        "languages": plans,
    });

    serde_json::to_string_pretty(&report)
        .map_err(|e| format!("Failed to serialize diff report JSON: {}", e))
}

pub fn run_diff_command(opts: DiffOptions) -> Result<(), String> {
    let settings = Settings::resolve(&opts.common)?;
    validate_dir_path(&settings.locales_dir)?;
    if let Some(output) = &opts.output {
        validate_output_path(output)?;
    }

    let store = JsonDirStore::new(&settings.locales_dir);
    let translations = store
        .load_all(&settings.languages)
        .map_err(|e| format!("Failed to load trees from '{}': {}", store.dir().display(), e))?;
    let plans = plan_translations(
        &translations,
        &SyncOptions::new(settings.main_language.clone()),
    )
    .map_err(|e| e.to_string())?;

    let rendered = if opts.json {
        render_json(&settings.main_language, &plans)?
    } else {
        render_human(&settings.main_language, &plans)
    };
    print_or_write(opts.output.as_ref(), &rendered)
}
