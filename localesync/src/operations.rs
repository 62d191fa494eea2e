//! Structural tree operations (difference/merge/prune) reusable by the sync pass and the CLI.

use serde_json::Value;

use crate::types::Tree;

/// Returns the part of `main` that `secondary` lacks.
///
/// Rules:
/// - Subtrees on both sides are compared recursively; empty results are dropped.
/// - A key missing from `secondary` carries the main value over verbatim.
/// - A shape mismatch (subtree vs. anything else, or a main leaf against a
///   non-leaf) counts as missing.
/// - Leaves present on both sides are kept as they are, whatever their text.
/// - Keys only in `secondary` are ignored; see [`prune`].
pub fn difference(main: &Tree, secondary: &Tree) -> Tree {
    let mut diff = Tree::new();
    for (key, main_value) in main {
        let Some(secondary_value) = secondary.get(key) else {
            diff.insert(key.clone(), main_value.clone());
            continue;
        };

        match (main_value, secondary_value) {
            (Value::Object(main_child), Value::Object(secondary_child)) => {
                let child = difference(main_child, secondary_child);
                if !child.is_empty() {
                    diff.insert(key.clone(), Value::Object(child));
                }
            }
            (Value::Object(_), _) | (_, Value::Object(_)) => {
                diff.insert(key.clone(), main_value.clone());
            }
            (Value::String(_), other) if !other.is_string() => {
                diff.insert(key.clone(), main_value.clone());
            }
            _ => {}
        }
    }
    diff
}

/// Overlays `translated` onto `secondary`.
///
/// Subtrees present on both sides merge recursively; otherwise a value from
/// `translated` replaces the secondary one. Keys only in `translated` are
/// appended after the existing ones.
pub fn merge(secondary: &Tree, translated: &Tree) -> Tree {
    let mut merged = Tree::new();
    for (key, secondary_value) in secondary {
        let value = match (secondary_value, translated.get(key)) {
            (Value::Object(secondary_child), Some(Value::Object(translated_child))) => {
                Value::Object(merge(secondary_child, translated_child))
            }
            (_, Some(translated_value)) => translated_value.clone(),
            (_, None) => secondary_value.clone(),
        };
        merged.insert(key.clone(), value);
    }
    for (key, translated_value) in translated {
        if !secondary.contains_key(key) {
            merged.insert(key.clone(), translated_value.clone());
        }
    }
    merged
}

/// Drops every key of `merged` that `main` does not have at the same path.
pub fn prune(main: &Tree, merged: &Tree) -> Tree {
    let mut pruned = Tree::new();
    for (key, value) in merged {
        let Some(main_value) = main.get(key) else {
            continue;
        };
        let value = match (main_value, value) {
            (Value::Object(main_child), Value::Object(child)) => {
                Value::Object(prune(main_child, child))
            }
            _ => value.clone(),
        };
        pruned.insert(key.clone(), value);
    }
    pruned
}

/// Counts the keys [`prune`] would drop from `tree`, including everything below them.
pub fn count_extra_keys(main: &Tree, tree: &Tree) -> usize {
    tree.iter()
        .map(|(key, value)| match (main.get(key), value) {
            (None, Value::Object(child)) => 1 + count_keys(child),
            (None, _) => 1,
            (Some(Value::Object(main_child)), Value::Object(child)) => {
                count_extra_keys(main_child, child)
            }
            (Some(_), _) => 0,
        })
        .sum()
}

fn count_keys(tree: &Tree) -> usize {
    tree.values()
        .map(|value| match value {
            Value::Object(child) => 1 + count_keys(child),
            _ => 1,
        })
        .sum()
}

/// True when both trees have the same keys at every depth.
pub fn same_key_structure(left: &Tree, right: &Tree) -> bool {
    left.len() == right.len()
        && left.iter().all(|(key, left_value)| {
            let Some(right_value) = right.get(key) else {
                return false;
            };
            match (left_value, right_value) {
                (Value::Object(l), Value::Object(r)) => same_key_structure(l, r),
                (Value::Object(_), _) | (_, Value::Object(_)) => false,
                _ => true,
            }
        })
}
