use std::collections::HashMap;

use crate::{
    catalog::source::{Probe, SourceVideo},
    project::model::Clip,
};

/// Read-only index of the source videos available to the editor.
///
/// The catalog is replaced wholesale whenever the library collaborator returns a
/// fresh listing (see [`SourceCatalog::replace_all`]); the editor core never
/// mutates individual entries.
#[derive(Clone, Debug, Default)]
pub struct SourceCatalog {
    sources: Vec<SourceVideo>,
    index: HashMap<String, usize>,
    version: Option<String>,
}

impl SourceCatalog {
    /// Index `sources`; see [`SourceCatalog::replace_all`].
    pub fn new(sources: Vec<SourceVideo>) -> Self {
        let mut catalog = Self::default();
        catalog.replace_all(sources);
        catalog
    }

    /// Replace the catalog's view of every source.
    ///
    /// Later entries with a duplicate id shadow earlier ones.
    #[tracing::instrument(skip(self, sources), fields(count = sources.len()))]
    pub fn replace_all(&mut self, sources: Vec<SourceVideo>) {
        self.index = sources
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
        self.sources = sources;
    }

    /// Library server version string, when the listing carried one.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Record the library server version.
    pub fn set_version(&mut self, version: Option<String>) {
        self.version = version;
    }

    /// Number of known sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// `true` when no source is known.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Source with `id`, if known.
    pub fn get(&self, id: &str) -> Option<&SourceVideo> {
        self.index.get(id).map(|&i| &self.sources[i])
    }

    /// Probe data for `id`; `None` when the source is unknown or unprobed.
    pub fn probe(&self, id: &str) -> Option<&Probe> {
        self.get(id).and_then(|s| s.probe.as_ref())
    }

    /// Every source, in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &SourceVideo> {
        self.sources.iter()
    }

    /// Sources carrying `tag`, oldest first.
    pub fn for_tag(&self, tag: &str) -> Vec<&SourceVideo> {
        let mut out: Vec<&SourceVideo> = self
            .sources
            .iter()
            .filter(|s| s.tags.contains(tag))
            .collect();
        out.sort_by_key(|s| s.mtime);
        out
    }

    /// `true` while any source of `tag` is still waiting for probe data.
    pub fn needs_probe(&self, tag: &str) -> bool {
        self.sources
            .iter()
            .any(|s| s.tags.contains(tag) && !s.is_probed())
    }

    /// Ids of sources referenced by `clips` that lack probe data (or are unknown).
    pub fn unprobed_in(&self, clips: &[Clip]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for clip in clips {
            if self.probe(&clip.source_id).is_none() && !out.contains(&clip.source_id) {
                out.push(clip.source_id.clone());
            }
        }
        out
    }

    /// `true` when at least one clip references `source_id`.
    pub fn is_used(source_id: &str, clips: &[Clip]) -> bool {
        clips.iter().any(|c| c.source_id == source_id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/store.rs"]
mod tests;
