//! Flattening a tree into an ordered translation batch and writing results back.
//!
//! Collection and application are separate passes: [`TranslationBatch::collect`]
//! walks a tree depth-first and records every text leaf with its path, and
//! [`TranslationBatch::apply`] writes a list of replacements back by position.

use serde_json::Value;

use crate::{
    error::Error,
    types::{KeyPath, Tree},
};

/// One text leaf scheduled for translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub path: KeyPath,
    pub text: String,
}

/// Ordered text leaves of a tree, in depth-first insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationBatch {
    items: Vec<BatchItem>,
}

impl TranslationBatch {
    /// Collects every text leaf of `tree`. Opaque values are skipped.
    pub fn collect(tree: &Tree) -> Self {
        let mut items = Vec::new();
        let mut path = Vec::new();
        collect_into(tree, &mut path, &mut items);
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    /// The texts to send to the translator, in batch order.
    pub fn texts(&self) -> Vec<String> {
        self.items.iter().map(|item| item.text.clone()).collect()
    }

    /// Writes `translated[i]` to the path of item `i`.
    pub fn apply(&self, translated: Vec<String>, tree: &mut Tree) -> Result<(), Error> {
        if translated.len() != self.items.len() {
            return Err(Error::BatchLengthMismatch {
                expected: self.items.len(),
                actual: translated.len(),
            });
        }
        for (item, text) in self.items.iter().zip(translated) {
            set_at_path(tree, &item.path, Value::String(text))?;
        }
        Ok(())
    }
}

fn collect_into(tree: &Tree, path: &mut KeyPath, out: &mut Vec<BatchItem>) {
    for (key, value) in tree {
        path.push(key.clone());
        match value {
            Value::Object(child) => collect_into(child, path, out),
            Value::String(text) => out.push(BatchItem {
                path: path.clone(),
                text: text.clone(),
            }),
            _ => {}
        }
        path.pop();
    }
}

/// Replaces the value at `path`. Every intermediate key must already hold a subtree.
pub fn set_at_path(tree: &mut Tree, path: &[String], value: Value) -> Result<(), Error> {
    let Some((last, parents)) = path.split_last() else {
        return Err(Error::InvalidTree("empty key path".to_string()));
    };
    let mut node = tree;
    for key in parents {
        node = match node.get_mut(key) {
            Some(Value::Object(child)) => child,
            _ => {
                return Err(Error::InvalidTree(format!(
                    "no subtree at `{}`",
                    display_path(path)
                )));
            }
        };
    }
    node.insert(last.clone(), value);
    Ok(())
}

/// Looks up the value at `path`.
pub fn get_at_path<'a>(tree: &'a Tree, path: &[String]) -> Option<&'a Value> {
    let (last, parents) = path.split_last()?;
    let mut node = tree;
    for key in parents {
        node = node.get(key)?.as_object()?;
    }
    node.get(last)
}

/// Number of text leaves in `tree`.
pub fn count_leaves(tree: &Tree) -> usize {
    tree.values()
        .map(|value| match value {
            Value::Object(child) => count_leaves(child),
            Value::String(_) => 1,
            _ => 0,
        })
        .sum()
}

/// Dotted form of a key path, for logs and reports.
pub fn display_path(path: &[String]) -> String {
    path.join(".")
}
