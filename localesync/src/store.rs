//! Directory-backed storage: one `<language>.json` file per tree.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::Error,
    traits::{TreeStore, read_tree, write_tree},
    types::{LanguageCode, Translations, Tree},
};

/// Keeps each language's tree in `<dir>/<language>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, language: &str) -> PathBuf {
        self.dir.join(format!("{}.json", language))
    }

    fn load_one(&self, language: &str) -> Result<Tree, Error> {
        let path = self.path_for(language);
        if !path.exists() {
            debug!(event = "tree_missing", path = %path.display());
            return Ok(Tree::new());
        }
        let file = File::open(&path)?;
        read_tree(BufReader::new(file)).map_err(|e| match e {
            Error::InvalidTree(msg) => Error::InvalidTree(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }
}

impl TreeStore for JsonDirStore {
    fn load_all(&self, languages: &[LanguageCode]) -> Result<Translations, Error> {
        let mut translations = Translations::new();
        for language in languages {
            translations.insert(language.clone(), self.load_one(language)?);
        }
        Ok(translations)
    }

    fn save_all(&self, translations: &Translations) -> Result<(), Error> {
        std::fs::create_dir_all(&self.dir)?;
        for (language, tree) in translations {
            let path = self.path_for(language);
            debug!(event = "tree_write", path = %path.display());
            write_tree(tree, BufWriter::new(File::create(&path)?))?;
        }
        Ok(())
    }
}
