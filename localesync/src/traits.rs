//! Traits for loading and persisting translation trees.

use std::io::{BufRead, Read, Write};

use serde_json::Value;

use crate::{
    error::Error,
    types::{LanguageCode, Translations, Tree},
};

/// A place translation trees are loaded from and written back to.
///
/// # Example
///
/// ```rust,no_run
/// use localesync::{store::JsonDirStore, traits::TreeStore};
/// let store = JsonDirStore::new("locales");
/// let trees = store.load_all(&["en".to_string(), "de".to_string()])?;
/// store.save_all(&trees)?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait TreeStore {
    /// Loads one tree per language. Missing or empty sources yield an empty tree.
    fn load_all(&self, languages: &[LanguageCode]) -> Result<Translations, Error>;

    /// Persists every tree in full.
    fn save_all(&self, translations: &Translations) -> Result<(), Error>;
}

/// Parses a tree from any reader. Blank input is an empty tree.
pub fn read_tree<R: BufRead>(mut reader: R) -> Result<Tree, Error> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    if raw.trim().is_empty() {
        return Ok(Tree::new());
    }
    match serde_json::from_str::<Value>(&raw)? {
        Value::Object(tree) => Ok(tree),
        other => Err(Error::InvalidTree(format!(
            "expected an object at the root, found {}",
            json_kind(&other)
        ))),
    }
}

/// Writes a tree as pretty JSON with a trailing newline.
pub fn write_tree<W: Write>(tree: &Tree, mut writer: W) -> Result<(), Error> {
    serde_json::to_writer_pretty(&mut writer, tree)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_read_blank_is_empty() {
        assert!(read_tree(Cursor::new("  \n")).unwrap().is_empty());
    }

    #[test]
    fn test_read_rejects_non_object_root() {
        let err = read_tree(Cursor::new("[1, 2]")).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_write_preserves_order() {
        let tree = read_tree(Cursor::new(r#"{"z": "1", "a": {"y": "2", "b": "3"}}"#)).unwrap();
        let mut out = Vec::new();
        write_tree(&tree, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.find("\"z\"").unwrap() < text.find("\"a\"").unwrap());
        assert!(text.find("\"y\"").unwrap() < text.find("\"b\"").unwrap());
        assert!(text.ends_with("}\n"));
    }
}
