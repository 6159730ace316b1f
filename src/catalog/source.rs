use std::collections::BTreeSet;

use crate::foundation::core::{Rotation, Size};

/// Audio stream parameters of a probed source.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AudioProbe {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Audio bit rate; carried through, never negotiated.
    #[serde(default)]
    pub bit_rate: u64,
    /// Channel count.
    pub channels: u32,
    /// Channel layout name (e.g. `stereo`).
    pub channel_layout: String,
}

/// Technical metadata extracted from a source video.
///
/// `width`/`height` are the displayed dimensions, i.e. already swapped when the
/// stream's `rotation` is a quarter turn.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Probe {
    /// Displayed width in pixels.
    pub width: u32,
    /// Displayed height in pixels.
    pub height: u32,
    /// Native rotation of the stream.
    #[serde(default)]
    pub rotation: Rotation,
    /// Duration in seconds.
    pub duration: f64,
    /// Pixel format name (e.g. `yuv420p`).
    pub pix_fmt: String,
    /// Color space, when the container reports one.
    #[serde(default)]
    pub color_space: Option<String>,
    /// Color transfer characteristics, when reported.
    #[serde(default)]
    pub color_transfer: Option<String>,
    /// Color primaries, when reported.
    #[serde(default)]
    pub color_primaries: Option<String>,
    /// Video bit rate; carried through, never negotiated.
    #[serde(default)]
    pub bit_rate: u64,
    /// First audio stream, if the source has audio at all.
    #[serde(default)]
    pub audio: Option<AudioProbe>,
}

impl Probe {
    /// Displayed dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Dimensions of a clip of this source rendered with `effective` rotation.
    ///
    /// Width and height swap when `effective` differs from the native rotation in
    /// transposed-ness.
    pub fn effective_size(&self, effective: Rotation) -> Size {
        if self.rotation.is_transposed() == effective.is_transposed() {
            self.size()
        } else {
            self.size().transposed()
        }
    }
}

/// File modification time as reported by the library server.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct Mtime {
    /// Whole seconds since the Unix epoch.
    pub secs_since_epoch: u64,
    /// Sub-second nanoseconds.
    pub nanos_since_epoch: u32,
}

/// A source video known to the library.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceVideo {
    /// Unique, stable identifier (the library's thumbnail name).
    pub id: String,
    /// Display path; only used for labels.
    pub path: String,
    /// Tags (collections) the video belongs to.
    pub tags: BTreeSet<String>,
    /// Modification time; orders the palette.
    pub mtime: Mtime,
    /// Probe data, or `None` while the source has not been probed.
    pub probe: Option<Probe>,
}

impl SourceVideo {
    /// Build an unprobed source with a single tag.
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            path: id.clone(),
            id,
            tags: BTreeSet::from([tag.into()]),
            mtime: Mtime::default(),
            probe: None,
        }
    }

    /// Attach probe data.
    pub fn with_probe(mut self, probe: Probe) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Set the modification time.
    pub fn with_mtime(mut self, secs_since_epoch: u64) -> Self {
        self.mtime = Mtime {
            secs_since_epoch,
            nanos_since_epoch: 0,
        };
        self
    }

    /// `true` once probe data is available.
    pub fn is_probed(&self) -> bool {
        self.probe.is_some()
    }

    /// Probed duration in seconds, if known.
    pub fn duration(&self) -> Option<f64> {
        self.probe.as_ref().map(|p| p.duration)
    }

    /// Native rotation; unprobed sources are treated as unrotated.
    pub fn rotation(&self) -> Rotation {
        self.probe.as_ref().map(|p| p.rotation).unwrap_or_default()
    }

    /// File name portion of [`SourceVideo::path`].
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}
