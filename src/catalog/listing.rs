use std::collections::BTreeSet;

use crate::{
    catalog::{
        source::{Mtime, Probe, SourceVideo},
        store::SourceCatalog,
    },
    foundation::error::{ClipError, ClipResult},
};

/// One video entry of the library server's listing.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct ListedVideo {
    /// Unique identifier of the video.
    pub thumbnail_name: String,
    /// Path on the server; used for labels only.
    #[serde(default)]
    pub path: String,
    /// Tags (collections) the video belongs to.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Modification time.
    #[serde(default)]
    pub mtime: Mtime,
    /// Probe data; `null` until the video is probed.
    #[serde(default)]
    pub probe: Option<Probe>,
}

/// The library server's listing (`GET /list`, `POST /preview`).
#[derive(Clone, Debug, serde::Deserialize)]
pub struct LibraryListing {
    /// Every listed video.
    pub videos: Vec<ListedVideo>,
    /// Library server version.
    #[serde(default)]
    pub version: Option<String>,
}

impl LibraryListing {
    /// Parse a listing body.
    pub fn from_json_str(s: &str) -> ClipResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ClipError::serde(format!("library listing parse failed: {e}")))
    }

    /// Convert every entry into a [`SourceVideo`].
    pub fn into_sources(self) -> Vec<SourceVideo> {
        self.videos
            .into_iter()
            .map(|v| SourceVideo {
                id: v.thumbnail_name,
                path: v.path,
                tags: v.tags,
                mtime: v.mtime,
                probe: v.probe,
            })
            .collect()
    }

    /// Replace `catalog`'s contents with this listing.
    pub fn apply_to(self, catalog: &mut SourceCatalog) {
        catalog.set_version(self.version.clone());
        catalog.replace_all(self.into_sources());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/listing.rs"]
mod tests;
