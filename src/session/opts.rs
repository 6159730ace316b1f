use crate::{
    foundation::{
        error::{ClipError, ClipResult},
        http::HttpOpts,
    },
    project::store::StoreOpts,
    timeline::engine::TimelineOpts,
    trim::trimmer::TrimOpts,
};

/// Every tunable of an editor session, loadable from one JSON document.
///
/// Missing sections and fields take their defaults.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct EditorOpts {
    /// Project persistence.
    pub store: StoreOpts,
    /// Playback.
    pub timeline: TimelineOpts,
    /// Trimming.
    pub trim: TrimOpts,
    /// Library and render server.
    pub http: HttpOpts,
    /// Prefix of the default render output name; the tag is appended.
    pub output_prefix: String,
}

impl Default for EditorOpts {
    fn default() -> Self {
        Self {
            store: StoreOpts::default(),
            timeline: TimelineOpts::default(),
            trim: TrimOpts::default(),
            http: HttpOpts::default(),
            output_prefix: "video-sort-".to_string(),
        }
    }
}

impl EditorOpts {
    /// Parse options from JSON.
    pub fn from_json_str(s: &str) -> ClipResult<Self> {
        serde_json::from_str(s).map_err(|e| ClipError::serde(format!("editor options: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
