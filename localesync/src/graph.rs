//! Route finding over the catalog of directly supported translation ways.
//!
//! Reachability is symmetric: a catalog entry `ru-en` makes `en` a neighbor of
//! `ru` and `ru` a neighbor of `en`. Direct support stays direction-sensitive,
//! and only the literal catalog direction counts as directly supported.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::{
    error::Error,
    types::{LanguageCode, TranslationWay},
};

/// Read-only adjacency built once from the translation way catalog.
#[derive(Debug, Clone, Default)]
pub struct TranslationGraph {
    ways: HashSet<TranslationWay>,
    languages: Vec<LanguageCode>,
    neighbors: HashMap<LanguageCode, Vec<LanguageCode>>,
}

impl TranslationGraph {
    pub fn new(catalog: &[TranslationWay]) -> Self {
        let mut graph = TranslationGraph::default();
        for way in catalog {
            graph.ways.insert(way.clone());
            graph.connect(&way.source, &way.target);
            graph.connect(&way.target, &way.source);
        }
        graph
    }

    fn connect(&mut self, from: &str, to: &str) {
        if !self.neighbors.contains_key(from) {
            self.languages.push(from.to_string());
        }
        let list = self.neighbors.entry(from.to_string()).or_default();
        if !list.iter().any(|n| n == to) {
            list.push(to.to_string());
        }
    }

    /// Languages mentioned by the catalog, in first-seen order.
    pub fn languages(&self) -> &[LanguageCode] {
        &self.languages
    }

    pub fn neighbors(&self, language: &str) -> &[LanguageCode] {
        self.neighbors
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// True iff the exact ordered pair is listed in the catalog.
    pub fn is_directly_supported(&self, source: &str, target: &str) -> bool {
        self.ways.contains(&TranslationWay::new(source, target))
    }

    /// The language to translate into before `target`, or `None` if no hop is needed.
    ///
    /// Breadth-first from `source`, returning the first neighbor that can
    /// translate directly into `target`.
    pub fn next_hop(&self, source: &str, target: &str) -> Result<Option<LanguageCode>, Error> {
        if self.is_directly_supported(source, target) {
            return Ok(None);
        }

        let mut visited: HashSet<&str> = HashSet::from([source]);
        let mut queue: VecDeque<&str> = VecDeque::from([source]);
        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors(current) {
                if !visited.insert(neighbor.as_str()) {
                    continue;
                }
                if self.is_directly_supported(neighbor, target) {
                    return Ok(Some(neighbor.clone()));
                }
                queue.push_back(neighbor);
            }
        }

        Err(Error::no_path(source, target))
    }

    /// Unrolls [`next_hop`](Self::next_hop) into the full list of hops from `source` to `target`.
    ///
    /// Identity resolves to an empty route. A chain that comes back to a
    /// target it is still resolving fails with [`Error::NoTranslationPath`].
    pub fn route(&self, source: &str, target: &str) -> Result<Vec<TranslationWay>, Error> {
        let mut pending = Vec::new();
        let mut hops = Vec::new();
        self.route_into(source, target, &mut pending, &mut hops)?;
        Ok(hops)
    }

    fn route_into(
        &self,
        source: &str,
        target: &str,
        pending: &mut Vec<LanguageCode>,
        hops: &mut Vec<TranslationWay>,
    ) -> Result<(), Error> {
        if source == target {
            return Ok(());
        }
        if pending.iter().any(|p| p == target) {
            return Err(Error::no_path(source, target));
        }
        pending.push(target.to_string());
        match self.next_hop(source, target)? {
            None => hops.push(TranslationWay::new(source, target)),
            Some(hop) => {
                self.route_into(source, &hop, pending, hops)?;
                hops.push(TranslationWay::new(hop, target));
            }
        }
        pending.pop();
        Ok(())
    }
}
