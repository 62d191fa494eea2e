//! `localesync.toml` loading and merging with command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use localesync::{DispatchOptions, LanguageCode, TranslationGraph, TranslationWay};
use serde::Deserialize;

use crate::validation::validate_language_code;

pub const DEFAULT_CONFIG_FILE: &str = "localesync.toml";
pub const DEFAULT_LOCALES_DIR: &str = "locales";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// On-disk configuration. Every field is optional; flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub main_language: Option<String>,
    pub languages: Vec<String>,
    pub locales_dir: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub translation_ways: Vec<TranslationWay>,
    pub dispatch: DispatchConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    pub chunk_size: Option<usize>,
    pub max_transport_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub max_internal_retries: Option<u32>,
}

impl FileConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| format!("Invalid configuration: {}", e))
    }

    pub fn read_from(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e))?;
        Self::from_toml_str(&text).map_err(|e| format!("{} ({})", e, path.display()))
    }

    /// Reads `--config`, else `./localesync.toml` when present, else nothing.
    pub fn locate(args: &CommonArgs) -> Result<Self, String> {
        match &args.config {
            Some(path) => Self::read_from(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::read_from(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Configuration file (defaults to ./localesync.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding one <lang>.json file per language
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// The authoritative language
    #[arg(short, long)]
    pub main: Option<String>,

    /// Languages to load (repeatable; defaults to the config or the catalog)
    #[arg(short, long = "lang")]
    pub langs: Vec<String>,

    /// Supported translation way as source-target (repeatable; replaces the config catalog)
    #[arg(short, long = "way")]
    pub ways: Vec<String>,
}

/// Everything a command needs, after merging flags over the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub main_language: LanguageCode,
    pub languages: Vec<LanguageCode>,
    pub locales_dir: PathBuf,
    pub endpoint: Option<String>,
    pub timeout: Duration,
    pub catalog: Vec<TranslationWay>,
    pub dispatch: DispatchOptions,
}

impl Settings {
    pub fn resolve(args: &CommonArgs) -> Result<Self, String> {
        Self::merge(args, FileConfig::locate(args)?)
    }

    pub fn merge(args: &CommonArgs, file: FileConfig) -> Result<Self, String> {
        let main_language = args
            .main
            .clone()
            .or(file.main_language)
            .ok_or_else(|| {
                "No main language configured; pass --main or set `main_language`".to_string()
            })?;

        let catalog = merge_catalog(args, file.translation_ways)?;

        let languages = if !args.langs.is_empty() {
            args.langs.clone()
        } else if !file.languages.is_empty() {
            file.languages
        } else {
            TranslationGraph::new(&catalog).languages().to_vec()
        };
        let languages = with_main_first(&main_language, languages);
        for lang in &languages {
            validate_language_code(lang)?;
        }

        let mut dispatch = DispatchOptions::new();
        if let Some(size) = file.dispatch.chunk_size {
            dispatch = dispatch.with_chunk_size(size);
        }
        if let Some(attempts) = file.dispatch.max_transport_attempts {
            dispatch = dispatch.with_max_transport_attempts(attempts);
        }
        if let Some(ms) = file.dispatch.retry_delay_ms {
            dispatch = dispatch.with_retry_delay(Duration::from_millis(ms));
        }
        dispatch = dispatch.with_max_internal_retries(file.dispatch.max_internal_retries);

        Ok(Settings {
            main_language,
            languages,
            locales_dir: args
                .dir
                .clone()
                .or(file.locales_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCALES_DIR)),
            endpoint: file.endpoint,
            timeout: Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            catalog,
            dispatch,
        })
    }
}

/// The translation way catalog alone, for commands that never touch locale files.
pub fn resolve_catalog(args: &CommonArgs) -> Result<Vec<TranslationWay>, String> {
    merge_catalog(args, FileConfig::locate(args)?.translation_ways)
}

fn merge_catalog(
    args: &CommonArgs,
    file_ways: Vec<TranslationWay>,
) -> Result<Vec<TranslationWay>, String> {
    if args.ways.is_empty() {
        Ok(file_ways)
    } else {
        TranslationWay::parse_catalog(&args.ways).map_err(|e| e.to_string())
    }
}

fn with_main_first(main: &str, languages: Vec<String>) -> Vec<String> {
    let mut out = vec![main.to_string()];
    for lang in languages {
        if !out.contains(&lang) {
            out.push(lang);
        }
    }
    out
}
