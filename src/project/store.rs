use uuid::Uuid;

use crate::{
    catalog::store::SourceCatalog,
    foundation::error::{ClipError, ClipResult},
    project::{
        model::{Clip, Project},
        storage::ProjectStorage,
    },
};

/// Options for [`ClipProjectStore`].
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct StoreOpts {
    /// Prefix prepended to the tag to form the storage key.
    pub key_prefix: String,
}

impl Default for StoreOpts {
    fn default() -> Self {
        Self {
            key_prefix: "video-sort/project/".to_string(),
        }
    }
}

/// Direction of a single reorder step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Towards the start of the timeline.
    Left,
    /// Towards the end of the timeline.
    Right,
}

/// Where the in-memory project came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Storage has not been read yet; nothing is saved.
    Pending,
    /// Storage had no record; the project is legitimately empty.
    Absent,
    /// Restored from storage (or created from an absent record by a mutation).
    Loaded,
    /// Storage could not be read; the project lives for this session only.
    Ephemeral,
}

/// Owns the ordered clip list of one tag and persists it after every accepted
/// mutation.
///
/// Invalid edits are rejected as silent no-ops (`false`/`None`). Storage failures
/// never propagate out of mutations; they are logged and surfaced through
/// [`ClipProjectStore::notice`].
pub struct ClipProjectStore<S: ProjectStorage> {
    tag: String,
    key: String,
    project: Project,
    state: LoadState,
    storage: S,
    notice: Option<String>,
}

impl<S: ProjectStorage> ClipProjectStore<S> {
    /// Create an empty, not-yet-loaded store for `tag`.
    pub fn new(tag: impl Into<String>, storage: S, opts: &StoreOpts) -> Self {
        let tag = tag.into();
        Self {
            key: format!("{}{}", opts.key_prefix, tag),
            tag,
            project: Project::default(),
            state: LoadState::Pending,
            storage,
            notice: None,
        }
    }

    /// Create a store for `tag` and restore it from storage (load-or-default).
    pub fn open(tag: impl Into<String>, storage: S, opts: &StoreOpts) -> Self {
        let mut store = Self::new(tag, storage, opts);
        store.load();
        store
    }

    /// Read the persisted record for this store's key.
    ///
    /// An absent record yields an empty project that is not marked loaded, so no
    /// save happens until a real mutation. An unreadable record makes the project
    /// ephemeral for the session.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn load(&mut self) -> &Project {
        let restored = self.storage.read(&self.key).and_then(|record| {
            record
                .map(|s| {
                    serde_json::from_str::<Project>(&s).map_err(|e| {
                        ClipError::storage(format!("project record is corrupt: {e}"))
                    })
                })
                .transpose()
        });
        match restored {
            Ok(Some(mut project)) => {
                let stored = project.clips.len();
                project.clips.retain(Clip::has_valid_range);
                if project.clips.len() < stored {
                    tracing::warn!(
                        dropped = stored - project.clips.len(),
                        "ignored stored clips with an invalid range"
                    );
                }
                tracing::debug!(clips = project.clips.len(), "project restored");
                self.project = project;
                self.state = LoadState::Loaded;
            }
            Ok(None) => {
                self.project = Project::default();
                self.state = LoadState::Absent;
            }
            Err(e) => {
                tracing::warn!(error = %e, "project storage unavailable; editing ephemerally");
                self.project = Project::default();
                self.state = LoadState::Ephemeral;
                self.notice = Some(e.to_string());
            }
        }
        &self.project
    }

    /// Persist the full clip list. Skipped unless the project has loaded.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn save(&mut self) -> ClipResult<()> {
        if self.state != LoadState::Loaded {
            return Ok(());
        }
        let json = serde_json::to_string(&self.project)
            .map_err(|e| ClipError::serde(format!("project serialize failed: {e}")))?;
        self.storage.write(&self.key, &json)
    }

    /// Append a clip covering the whole of `source_id`.
    ///
    /// Returns the new clip's id, or `None` when the source is unknown or unprobed.
    pub fn add_clip(&mut self, source_id: &str, catalog: &SourceCatalog) -> Option<String> {
        let duration = catalog.probe(source_id)?.duration;
        if !(duration.is_finite() && duration > 0.0) {
            return None;
        }
        let id = Uuid::new_v4().to_string();
        self.project
            .clips
            .push(Clip::full(id.clone(), source_id, duration));
        self.after_mutation();
        Some(id)
    }

    /// Replace the clip whose id matches `clip.id`.
    ///
    /// Rejected when no clip matches, the source is unknown or unprobed in
    /// `catalog`, or the range breaks `0 <= start < end <= duration`.
    pub fn update_clip(&mut self, clip: Clip, catalog: &SourceCatalog) -> bool {
        let Some(duration) = catalog.probe(&clip.source_id).map(|p| p.duration) else {
            return false;
        };
        if !clip.is_valid_within(duration) {
            return false;
        }
        let Some(slot) = self.project.clips.iter_mut().find(|c| c.id == clip.id) else {
            return false;
        };
        if *slot == clip {
            return true;
        }
        *slot = clip;
        self.after_mutation();
        true
    }

    /// Swap a clip with its neighbour in `direction`; no-op at either end.
    pub fn move_clip(&mut self, clip_id: &str, direction: Direction) -> bool {
        let Some(index) = self.project.index_of(clip_id) else {
            return false;
        };
        let target = match direction {
            Direction::Left => index.checked_sub(1),
            Direction::Right => Some(index + 1).filter(|&i| i < self.project.clips.len()),
        };
        let Some(target) = target else {
            return false;
        };
        self.project.clips.swap(index, target);
        self.after_mutation();
        true
    }

    /// Remove a clip. Confirmation is the caller's responsibility.
    pub fn delete_clip(&mut self, clip_id: &str) -> bool {
        let Some(index) = self.project.index_of(clip_id) else {
            return false;
        };
        self.project.clips.remove(index);
        self.after_mutation();
        true
    }

    /// Erase the persisted record and start over with an empty project.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn reset(&mut self) -> ClipResult<()> {
        self.project = Project::default();
        if self.state == LoadState::Ephemeral {
            return Ok(());
        }
        self.storage.remove(&self.key)?;
        self.state = LoadState::Absent;
        Ok(())
    }

    /// Current project.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Clips in timeline order.
    pub fn clips(&self) -> &[Clip] {
        &self.project.clips
    }

    /// Tag this project belongs to.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Storage key of this project.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// `true` once the project was restored from, or committed to, storage.
    pub fn has_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Where the project came from.
    pub fn load_state(&self) -> LoadState {
        self.state
    }

    /// Latest non-blocking storage notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Dismiss the current notice.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Underlying storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn after_mutation(&mut self) {
        if self.state == LoadState::Absent {
            self.state = LoadState::Loaded;
        }
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, key = %self.key, "project save failed");
            self.notice = Some(e.to_string());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/store.rs"]
mod tests;
