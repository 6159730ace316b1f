use crate::{foundation::core::Rotation, project::model::Clip};

/// The clip under the play-head and where its source should be.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveClip {
    /// Position of the clip in timeline order.
    pub index: usize,
    /// Id of the active clip.
    pub clip_id: String,
    /// Source the clip cuts from.
    pub source_id: String,
    /// Virtual time at which this clip starts.
    pub cum_start: f64,
    /// Source time the active handle should be at.
    pub local_offset: f64,
    /// Trim start in source seconds.
    pub clip_start: f64,
    /// Trim end in source seconds.
    pub clip_end: f64,
    /// Rotation override of the clip.
    pub rotation_override: Option<Rotation>,
}

impl ActiveClip {
    /// Virtual time at which this clip ends.
    pub fn cum_end(&self) -> f64 {
        self.cum_start + (self.clip_end - self.clip_start)
    }

    /// Virtual time corresponding to the source handle being at `native`.
    ///
    /// A handle at or past the trim end maps to the clip's cumulative end; a handle
    /// still before the trim start maps to the clip's cumulative start.
    pub fn virtual_time_at(&self, native: f64) -> f64 {
        if native >= self.clip_end {
            self.cum_end()
        } else {
            self.cum_start + (native - self.clip_start).max(0.0)
        }
    }
}

/// Result of resolving a virtual play-head position.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// A clip contains the play-head.
    Active(ActiveClip),
    /// The play-head is at (or past) the end of the timeline, or there are no clips.
    End,
}

impl Resolution {
    /// The active clip, unless at the end.
    pub fn active(&self) -> Option<&ActiveClip> {
        match self {
            Resolution::Active(a) => Some(a),
            Resolution::End => None,
        }
    }
}

/// Find the clip whose half-open interval `[cum_start, cum_start + duration)`
/// contains `t`.
///
/// Linear scan in clip order; negative `t` is treated as `0`. Boundaries are
/// accumulated left to right like [`total_duration`], so `t == total_duration`
/// always resolves to [`Resolution::End`].
///
/// [`total_duration`]: crate::project::model::total_duration
pub fn resolve(clips: &[Clip], t: f64) -> Resolution {
    let t = t.max(0.0);
    let mut cum_start = 0.0;
    for (index, clip) in clips.iter().enumerate() {
        let cum_end = cum_start + clip.duration();
        if t < cum_end {
            return Resolution::Active(ActiveClip {
                index,
                clip_id: clip.id.clone(),
                source_id: clip.source_id.clone(),
                cum_start,
                local_offset: t - cum_start + clip.start,
                clip_start: clip.start,
                clip_end: clip.end,
                rotation_override: clip.rotation_override,
            });
        }
        cum_start = cum_end;
    }
    Resolution::End
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/resolve.rs"]
mod tests;
