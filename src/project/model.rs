use crate::{
    catalog::{source::SourceVideo, store::SourceCatalog},
    foundation::core::Rotation,
};

/// A trimmed, orderable reference into a source video.
///
/// Serialized in the persisted record layout: `thumb` for the source reference
/// and `overrideRotation` for the optional rotation override.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Clip {
    /// Opaque id, stable across reorders.
    pub id: String,
    /// Id of the referenced [`SourceVideo`].
    #[serde(rename = "thumb", alias = "sourceId")]
    pub source_id: String,
    /// Trim start in source seconds.
    pub start: f64,
    /// Trim end in source seconds; always greater than `start`.
    pub end: f64,
    /// Rotation to render with instead of the source's native one.
    #[serde(
        rename = "overrideRotation",
        alias = "rotationOverride",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub rotation_override: Option<Rotation>,
}

impl Clip {
    /// Clip covering the whole of a source of `duration` seconds.
    pub fn full(id: impl Into<String>, source_id: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            start: 0.0,
            end: duration,
            rotation_override: None,
        }
    }

    /// Timeline length of the clip in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// `0 <= start < end`, both finite.
    pub fn has_valid_range(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && 0.0 <= self.start && self.start < self.end
    }

    /// `0 <= start < end <= source_duration`.
    pub fn is_valid_within(&self, source_duration: f64) -> bool {
        self.has_valid_range() && self.end <= source_duration
    }

    /// The override if present, else `native`.
    pub fn effective_rotation(&self, native: Rotation) -> Rotation {
        self.rotation_override.unwrap_or(native)
    }

    /// Effective rotation against the source as the catalog currently sees it.
    pub fn effective_rotation_in(&self, source: &SourceVideo) -> Rotation {
        self.effective_rotation(source.rotation())
    }
}

/// The ordered clip list of one tag/collection.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Project {
    /// Clips in timeline order.
    #[serde(default)]
    pub clips: Vec<Clip>,
}

impl Project {
    /// Sum of `end - start` over every clip.
    pub fn total_duration(&self) -> f64 {
        total_duration(&self.clips)
    }

    /// Timeline position of `clip_id`.
    pub fn index_of(&self, clip_id: &str) -> Option<usize> {
        self.clips.iter().position(|c| c.id == clip_id)
    }

    /// Clip with `clip_id`.
    pub fn clip(&self, clip_id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == clip_id)
    }

    /// Other clips that cut from the same source as `clip_id`.
    pub fn siblings_of(&self, clip_id: &str) -> Vec<&Clip> {
        let Some(clip) = self.clip(clip_id) else {
            return Vec::new();
        };
        self.clips
            .iter()
            .filter(|c| c.source_id == clip.source_id && c.id != clip.id)
            .collect()
    }

    /// Clips whose source is known and probed in `catalog`.
    pub fn available_clips<'a>(&'a self, catalog: &'a SourceCatalog) -> impl Iterator<Item = &'a Clip> {
        self.clips
            .iter()
            .filter(move |c| catalog.probe(&c.source_id).is_some())
    }
}

/// Sum of clip durations, recomputed on every call.
pub fn total_duration(clips: &[Clip]) -> f64 {
    clips.iter().map(Clip::duration).sum()
}

#[cfg(test)]
#[path = "../../tests/unit/project/model.rs"]
mod tests;
