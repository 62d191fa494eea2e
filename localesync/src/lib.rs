#![forbid(unsafe_code)]
//! Keeps per-language translation trees in line with one main tree.
//!
//! For every text leaf the main tree has and a secondary tree lacks, the
//! leaf is translated through a [`TranslationService`] and written back;
//! keys the main tree no longer has are removed.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use localesync::{
//!     Dispatcher, JsonDirStore, SyncOptions, TranslationGraph, TranslationWay,
//!     sync_translations, traits::TreeStore,
//! };
//! # async fn run(service: impl localesync::TranslationService) -> Result<(), localesync::Error> {
//! let catalog = TranslationWay::parse_catalog(&["ru-en", "en-de"])?;
//! let mut dispatcher = Dispatcher::new(service, TranslationGraph::new(&catalog));
//!
//! let store = JsonDirStore::new("locales");
//! let mut trees = store.load_all(&["ru".to_string(), "en".to_string(), "de".to_string()])?;
//! sync_translations(&mut trees, &SyncOptions::new("ru"), &mut dispatcher).await?;
//! store.save_all(&trees)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Pieces
//!
//! - [`operations`]: structural difference, merge and prune over trees
//! - [`tree`]: flattening a tree into an ordered batch and writing results back
//! - [`graph`]: next-hop search over the catalog of supported language pairs
//! - [`dispatch`]: chunked translation with retries and indirect routing
//! - [`sync`]: the per-locale pass tying the above together

pub mod dispatch;
pub mod error;
pub mod graph;
pub mod operations;
pub mod service;
pub mod store;
pub mod sync;
pub mod traits;
pub mod tree;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    dispatch::{DispatchOptions, Dispatcher, TranslationMode},
    error::Error,
    graph::TranslationGraph,
    operations::{difference, merge, prune},
    service::{ServiceResponse, TranslationRequest, TranslationService},
    store::JsonDirStore,
    sync::{
        LanguagePlan, LanguageReport, SyncOptions, SyncReport, plan_translations,
        sync_translations,
    },
    tree::TranslationBatch,
    types::{KeyPath, LanguageCode, Translations, Tree, TranslationWay},
};
