//! Read-only lookup of every page in a notebook.
//!
//! Zim allows the same leaf name in different branches (`Work:Notes` and
//! `Home:Notes`), so besides the exact path map the index keeps a leaf map
//! from each normalised leaf name to all pages carrying it.

use super::page::{normalize_segment, Page, PagePath};
use crate::ir::nodes::AddressMode;
use std::collections::{BTreeMap, BTreeSet};

type Key = Vec<String>;

/// Index of page identities, built once per run before any translation.
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
    by_path: BTreeMap<Key, PagePath>,
    by_leaf: BTreeMap<String, BTreeSet<Key>>,
}

impl PageIndex {
    /// Index the given pages.
    ///
    /// Canonical paths must be unique; when two pages normalise to the same
    /// key, the first one wins and the other is reported.
    pub fn build(pages: &[Page]) -> Self {
        pages.iter().map(|page| page.path.clone()).collect()
    }

    fn insert(&mut self, path: PagePath) {
        if path.is_root() {
            return;
        }
        let key = path.key();
        if let Some(existing) = self.by_path.get(&key) {
            log::warn!("Duplicate page '{path}' ignored, already indexed as '{existing}'");
            return;
        }
        let leaf = key[key.len() - 1].clone();
        self.by_leaf.entry(leaf).or_default().insert(key.clone());
        self.by_path.insert(key, path);
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Exact lookup from the notebook root.
    pub fn get<S: AsRef<str>>(&self, segments: &[S]) -> Option<&PagePath> {
        let key: Key = segments.iter().map(|s| normalize_segment(s.as_ref())).collect();
        self.by_path.get(&key)
    }

    /// Candidate pages for `segments` written in `mode` on page `from`.
    ///
    /// Relative lookups return the candidates of the innermost namespace that
    /// has any, ordered by depth and then by key, so the first entry is the
    /// preferred target. An empty result means "unresolved".
    pub fn lookup<S: AsRef<str>>(
        &self,
        segments: &[S],
        mode: &AddressMode,
        from: &PagePath,
    ) -> Vec<&PagePath> {
        if segments.is_empty() {
            return Vec::new();
        }
        match mode {
            AddressMode::Absolute => self.get(segments).into_iter().collect(),
            AddressMode::Child => self.get(from.join(segments).segments()).into_iter().collect(),
            AddressMode::Relative => self.lookup_relative(segments, from),
            AddressMode::External(_) => Vec::new(),
        }
    }

    fn lookup_relative<S: AsRef<str>>(&self, segments: &[S], from: &PagePath) -> Vec<&PagePath> {
        let target: Key = segments.iter().map(|s| normalize_segment(s.as_ref())).collect();
        let leaf = &target[target.len() - 1];
        let Some(keys) = self.by_leaf.get(leaf) else {
            return Vec::new();
        };
        let candidates: Vec<&Key> = keys.iter().filter(|key| key.ends_with(&target)).collect();
        if candidates.is_empty() {
            return Vec::new();
        }

        for namespace in from.ancestors() {
            let prefix = namespace.key();
            let mut found: Vec<&Key> = candidates
                .iter()
                .copied()
                .filter(|key| key.len() > prefix.len() && key.starts_with(&prefix))
                .collect();
            if found.is_empty() {
                continue;
            }
            found.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
            return found
                .into_iter()
                .filter_map(|key| self.by_path.get(key))
                .collect();
        }
        Vec::new()
    }
}

impl FromIterator<PagePath> for PageIndex {
    fn from_iter<T: IntoIterator<Item = PagePath>>(iter: T) -> Self {
        let mut index = PageIndex::default();
        for path in iter {
            index.insert(path);
        }
        index
    }
}
