use crate::{
    catalog::{source::AudioProbe, store::SourceCatalog},
    encoding::{
        candidate::{Candidate, group, offers},
        descriptor::{AudioDescriptor, EncodingDescriptor},
    },
    foundation::{
        core::Size,
        error::{ClipError, ClipResult},
    },
    project::model::Clip,
};

/// Audio candidates, present only when at least one clip has audio.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AudioOptions {
    /// Sample rates in Hz.
    pub sample_rate: Vec<Candidate<u32>>,
    /// Channel counts.
    pub channels: Vec<Candidate<u32>>,
    /// Channel layout names.
    pub channel_layout: Vec<Candidate<String>>,
}

/// Every selectable output parameter derived from a project's clips.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EncodingOptions {
    /// Effective (rotation-applied) clip dimensions.
    pub resolution: Vec<Candidate<Size>>,
    /// Default for the free-form resolution: per-axis maximum of `resolution`.
    pub custom_resolution: Size,
    /// Pixel formats.
    pub pix_fmt: Vec<Candidate<String>>,
    /// Color spaces; sources reporting none share the `None` group.
    pub color_space: Vec<Candidate<Option<String>>>,
    /// Color transfer characteristics.
    pub color_transfer: Vec<Candidate<Option<String>>>,
    /// Color primaries.
    pub color_primaries: Vec<Candidate<Option<String>>>,
    /// `None` when no clip has audio.
    pub audio: Option<AudioOptions>,
    /// Referenced sources without probe data; these block finalization.
    pub unprobed: Vec<String>,
}

/// Chosen output resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ResolutionChoice {
    /// One of the grouped clip resolutions.
    Preset(Size),
    /// A free-form width/height.
    Custom(Size),
}

impl ResolutionChoice {
    /// Chosen dimensions.
    pub fn size(self) -> Size {
        match self {
            ResolutionChoice::Preset(s) | ResolutionChoice::Custom(s) => s,
        }
    }
}

/// One value per field. `None` means "not selected yet".
///
/// Color fields are doubly optional: the outer `Option` is the selection, the
/// inner one the (possibly unknown) value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EncodingSelection {
    /// Output resolution.
    pub resolution: Option<ResolutionChoice>,
    /// Pixel format.
    pub pix_fmt: Option<String>,
    /// Color space.
    pub color_space: Option<Option<String>>,
    /// Color transfer.
    pub color_transfer: Option<Option<String>>,
    /// Color primaries.
    pub color_primaries: Option<Option<String>>,
    /// Audio sample rate.
    pub sample_rate: Option<u32>,
    /// Audio channel count.
    pub channels: Option<u32>,
    /// Audio channel layout.
    pub channel_layout: Option<String>,
}

/// Derive the encoding candidates for `clips`.
///
/// Clips whose source is unknown or unprobed do not contribute; their sources are
/// listed in [`EncodingOptions::unprobed`].
#[tracing::instrument(skip(clips, catalog), fields(clips = clips.len()))]
pub fn negotiate(clips: &[Clip], catalog: &SourceCatalog) -> EncodingOptions {
    let mut unprobed: Vec<String> = Vec::new();
    let mut probed = Vec::new();
    for clip in clips {
        match catalog.probe(&clip.source_id) {
            Some(probe) => probed.push((clip, probe)),
            None => {
                if !unprobed.contains(&clip.source_id) {
                    unprobed.push(clip.source_id.clone());
                }
            }
        }
    }
    if !unprobed.is_empty() {
        tracing::warn!(?unprobed, "sources excluded from encoding negotiation");
    }

    let resolution = group(probed.iter().map(|&(clip, probe)| {
        (
            probe.effective_size(clip.effective_rotation(probe.rotation)),
            clip,
        )
    }));
    let custom_resolution = resolution.iter().fold(Size::new(0, 0), |acc, c| {
        Size::new(acc.width.max(c.value.width), acc.height.max(c.value.height))
    });

    let with_audio: Vec<(&Clip, &AudioProbe)> = probed
        .iter()
        .filter_map(|&(clip, probe)| probe.audio.as_ref().map(|a| (clip, a)))
        .collect();
    let audio = (!with_audio.is_empty()).then(|| AudioOptions {
        sample_rate: group(with_audio.iter().map(|&(c, a)| (a.sample_rate, c))),
        channels: group(with_audio.iter().map(|&(c, a)| (a.channels, c))),
        channel_layout: group(with_audio.iter().map(|&(c, a)| (a.channel_layout.clone(), c))),
    });

    EncodingOptions {
        resolution,
        custom_resolution,
        pix_fmt: group(probed.iter().map(|&(c, p)| (p.pix_fmt.clone(), c))),
        color_space: group(probed.iter().map(|&(c, p)| (p.color_space.clone(), c))),
        color_transfer: group(probed.iter().map(|&(c, p)| (p.color_transfer.clone(), c))),
        color_primaries: group(probed.iter().map(|&(c, p)| (p.color_primaries.clone(), c))),
        audio,
        unprobed,
    }
}

impl EncodingOptions {
    /// `true` while some referenced source still needs probing.
    pub fn is_blocked(&self) -> bool {
        !self.unprobed.is_empty()
    }

    /// The most-represented candidate of every field.
    pub fn default_selection(&self) -> EncodingSelection {
        fn top<T: Clone>(c: &[Candidate<T>]) -> Option<T> {
            c.first().map(|c| c.value.clone())
        }
        EncodingSelection {
            resolution: top(&self.resolution).map(ResolutionChoice::Preset),
            pix_fmt: top(&self.pix_fmt),
            color_space: top(&self.color_space),
            color_transfer: top(&self.color_transfer),
            color_primaries: top(&self.color_primaries),
            sample_rate: self.audio.as_ref().and_then(|a| top(&a.sample_rate)),
            channels: self.audio.as_ref().and_then(|a| top(&a.channels)),
            channel_layout: self.audio.as_ref().and_then(|a| top(&a.channel_layout)),
        }
    }

    /// Assemble the descriptor for `selection`.
    ///
    /// Fails with [`ClipError::Metadata`] while sources are unprobed, and with
    /// [`ClipError::Validation`] when a field that has candidates is unselected,
    /// a value is not among its candidates, or a custom resolution is empty.
    #[tracing::instrument(skip(self, selection))]
    pub fn finalize(&self, selection: &EncodingSelection) -> ClipResult<EncodingDescriptor> {
        if self.is_blocked() {
            return Err(ClipError::metadata(format!(
                "sources not probed: {}",
                self.unprobed.join(", ")
            )));
        }
        if self.resolution.is_empty() {
            return Err(ClipError::validation("no clips to encode"));
        }

        let size = match selection.resolution {
            None => return Err(ClipError::validation("resolution not selected")),
            Some(ResolutionChoice::Preset(s)) if !offers(&self.resolution, &s) => {
                return Err(ClipError::validation(format!("resolution {s} not offered")));
            }
            Some(ResolutionChoice::Custom(s)) if s.is_empty() => {
                return Err(ClipError::validation(format!("custom resolution {s} is empty")));
            }
            Some(choice) => choice.size(),
        };

        let audio = match &self.audio {
            None => None,
            Some(a) => Some(AudioDescriptor {
                sample_rate: pick("sample_rate", &a.sample_rate, &selection.sample_rate)?,
                channels: pick("channels", &a.channels, &selection.channels)?,
                channel_layout: pick(
                    "channel_layout",
                    &a.channel_layout,
                    &selection.channel_layout,
                )?,
            }),
        };

        Ok(EncodingDescriptor {
            width: size.width,
            height: size.height,
            pix_fmt: pick("pix_fmt", &self.pix_fmt, &selection.pix_fmt)?,
            color_space: pick("color_space", &self.color_space, &selection.color_space)?,
            color_transfer: pick("color_transfer", &self.color_transfer, &selection.color_transfer)?,
            color_primaries: pick(
                "color_primaries",
                &self.color_primaries,
                &selection.color_primaries,
            )?,
            audio,
        })
    }
}

fn pick<T: Clone + PartialEq + std::fmt::Debug>(
    field: &str,
    candidates: &[Candidate<T>],
    chosen: &Option<T>,
) -> ClipResult<T> {
    let Some(value) = chosen else {
        return Err(ClipError::validation(format!("{field} not selected")));
    };
    if !offers(candidates, value) {
        return Err(ClipError::validation(format!(
            "{field} {value:?} is not one of the offered values"
        )));
    }
    Ok(value.clone())
}

#[cfg(test)]
#[path = "../../tests/unit/encoding/negotiator.rs"]
mod tests;
