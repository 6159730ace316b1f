use crate::{
    catalog::source::SourceVideo,
    foundation::{
        core::Rotation,
        error::{ClipError, ClipResult},
    },
    project::model::Clip,
    timeline::rotation::{PreviewRotation, preview_rotation},
};

/// Options for [`Trimmer`].
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct TrimOpts {
    /// One nudge step in seconds (one frame at 60 fps).
    pub nudge_step_s: f64,
    /// How far before `end` the "play near end" preview starts.
    pub near_end_preview_s: f64,
}

impl Default for TrimOpts {
    fn default() -> Self {
        Self {
            nudge_step_s: 1.0 / 60.0,
            near_end_preview_s: 0.5,
        }
    }
}

/// Which bound of the clip an edit targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TrimField {
    /// The trim start.
    Start,
    /// The trim end.
    End,
}

/// Where a trim preview starts playing from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewPoint {
    /// At the clip's start.
    Start,
    /// Shortly before the clip's end.
    NearEnd,
}

/// Another clip of the same source, as fractions of the source duration.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SiblingRange {
    /// Sibling clip id.
    pub clip_id: String,
    /// `start / duration`.
    pub start_frac: f64,
    /// `(end - start) / duration`.
    pub width_frac: f64,
    /// The sibling's range intersects the clip being trimmed. Informational only.
    pub overlaps: bool,
}

/// Editing surface for a single clip against its source.
///
/// Every edit either yields a valid clip (`0 <= start < end <= duration`) or is
/// rejected with `false`, leaving the clip untouched. Nothing is persisted here;
/// hand [`Trimmer::into_clip`] to the project store.
#[derive(Clone, Debug)]
pub struct Trimmer {
    clip: Clip,
    duration: f64,
    native: Rotation,
    opts: TrimOpts,
}

impl Trimmer {
    /// Trimmer for `clip` against a source of `duration` seconds with `native` rotation.
    ///
    /// An override equal to `native` is normalized away.
    pub fn new(clip: Clip, duration: f64, native: Rotation, opts: TrimOpts) -> Self {
        let mut trimmer = Self {
            clip,
            duration,
            native,
            opts,
        };
        trimmer.set_rotation(trimmer.clip.rotation_override);
        trimmer
    }

    /// Open a trimmer for `clip` against its probed `source`.
    pub fn for_source(clip: Clip, source: &SourceVideo, opts: TrimOpts) -> ClipResult<Self> {
        if clip.source_id != source.id {
            return Err(ClipError::validation(format!(
                "clip {} does not reference source {}",
                clip.id, source.id
            )));
        }
        let duration = source
            .duration()
            .ok_or_else(|| ClipError::metadata(format!("source {} is not probed", source.id)))?;
        Ok(Self::new(clip, duration, source.rotation(), opts))
    }

    /// Move one bound by `delta` seconds.
    ///
    /// Rejected when the bound would leave `[0, duration]` or the range would
    /// become empty or inverted.
    pub fn nudge(&mut self, field: TrimField, delta: f64) -> bool {
        let current = self.bound(field);
        self.set_bound(field, current + delta)
    }

    /// Nudge by a whole number of steps of [`TrimOpts::nudge_step_s`].
    pub fn nudge_steps(&mut self, field: TrimField, steps: i32) -> bool {
        self.nudge(field, f64::from(steps) * self.opts.nudge_step_s)
    }

    /// Continuous handle adjustment.
    ///
    /// `value` is clamped into `[0, duration]` first; a handle that would reach or
    /// cross the opposite handle is rejected.
    pub fn drag(&mut self, field: TrimField, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.set_bound(field, value.clamp(0.0, self.duration))
    }

    /// Drag from a fractional track position (`0..=1` of the source duration).
    pub fn drag_fraction(&mut self, field: TrimField, fraction: f64) -> bool {
        if !fraction.is_finite() {
            return false;
        }
        self.drag(field, fraction.clamp(0.0, 1.0) * self.duration)
    }

    /// Select a rotation override. A value equal to the native rotation is stored
    /// as no override.
    pub fn set_rotation(&mut self, rotation: Option<Rotation>) {
        self.clip.rotation_override = rotation.filter(|&r| r != self.native);
    }

    /// Override if set, else the native rotation.
    pub fn effective_rotation(&self) -> Rotation {
        self.clip.effective_rotation(self.native)
    }

    /// Display correction for previewing with the current override.
    pub fn preview_rotation(&self) -> PreviewRotation {
        preview_rotation(self.native, self.clip.rotation_override)
    }

    /// Source time a preview should start from.
    pub fn preview_point(&self, point: PreviewPoint) -> f64 {
        match point {
            PreviewPoint::Start => self.clip.start,
            PreviewPoint::NearEnd => self
                .clip
                .start
                .max(self.clip.end - self.opts.near_end_preview_s),
        }
    }

    /// A preview stops once the handle reaches the clip's end.
    pub fn should_stop_preview(&self, time: f64) -> bool {
        time >= self.clip.end
    }

    /// Other clips cutting from the same source, for collision display.
    pub fn siblings(&self, clips: &[Clip]) -> Vec<SiblingRange> {
        if self.duration <= 0.0 {
            return Vec::new();
        }
        clips
            .iter()
            .filter(|c| c.source_id == self.clip.source_id && c.id != self.clip.id)
            .map(|c| SiblingRange {
                clip_id: c.id.clone(),
                start_frac: c.start / self.duration,
                width_frac: (c.end - c.start) / self.duration,
                overlaps: c.start < self.clip.end && self.clip.start < c.end,
            })
            .collect()
    }

    /// Clip as edited so far.
    pub fn clip(&self) -> &Clip {
        &self.clip
    }

    /// Finish editing and hand back the clip.
    pub fn into_clip(self) -> Clip {
        self.clip
    }

    /// Source duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Native rotation of the source.
    pub fn native_rotation(&self) -> Rotation {
        self.native
    }

    fn bound(&self, field: TrimField) -> f64 {
        match field {
            TrimField::Start => self.clip.start,
            TrimField::End => self.clip.end,
        }
    }

    fn set_bound(&mut self, field: TrimField, value: f64) -> bool {
        if !value.is_finite() || value < 0.0 || value > self.duration {
            return false;
        }
        let (start, end) = match field {
            TrimField::Start => (value, self.clip.end),
            TrimField::End => (self.clip.start, value),
        };
        if start >= end {
            return false;
        }
        self.clip.start = start;
        self.clip.end = end;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trim/trimmer.rs"]
mod tests;
