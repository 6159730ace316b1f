use crate::{
    catalog::store::SourceCatalog,
    project::model::{Clip, total_duration},
    timeline::{
        handles::{HandleRegistry, MediaHandle},
        resolve::{ActiveClip, Resolution, resolve},
        rotation::{PreviewRotation, preview_rotation},
    },
};

/// Options for [`TimelineEngine`].
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct TimelineOpts {
    /// Drift (source seconds) between the active handle and the resolved offset
    /// beyond which the handle is re-seeked.
    pub seek_tolerance_s: f64,
    /// Playback rate applied to every handle while fast-forward is held.
    pub fast_forward_rate: f64,
}

impl Default for TimelineOpts {
    fn default() -> Self {
        Self {
            seek_tolerance_s: 0.2,
            fast_forward_rate: 2.0,
        }
    }
}

/// Read-only snapshot of the playback state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlaybackState {
    /// Virtual play-head position in seconds.
    pub time: f64,
    /// Sum of clip durations.
    pub total: f64,
    /// Playback is running.
    pub playing: bool,
    /// Fast-forward is held.
    pub fast_forward: bool,
    /// Clip under the play-head, if any.
    pub active_clip: Option<String>,
    /// Source of the active clip when it has no media handle.
    pub unavailable_source: Option<String>,
}

/// Plays an ordered clip list as one continuous virtual timeline.
///
/// A reducer over `(clips, t, playing, handles)`: every input (play, pause, scrub,
/// a time update from a handle, a new clip list) proposes a new `t`, then
/// [`TimelineEngine::sync`] re-resolves the active clip and brings the handles in
/// line. At most one handle plays at any instant.
pub struct TimelineEngine<H: MediaHandle> {
    opts: TimelineOpts,
    clips: Vec<Clip>,
    total: f64,
    time: f64,
    playing: bool,
    fast_forward: bool,
    handles: HandleRegistry<H>,
    active: Option<ActiveClip>,
    unavailable: Option<String>,
}

impl<H: MediaHandle> TimelineEngine<H> {
    /// Empty timeline, paused at `0`.
    pub fn new(opts: TimelineOpts) -> Self {
        Self {
            opts,
            clips: Vec::new(),
            total: 0.0,
            time: 0.0,
            playing: false,
            fast_forward: false,
            handles: HandleRegistry::new(),
            active: None,
            unavailable: None,
        }
    }

    /// Replace the clip list (after any accepted edit).
    ///
    /// Handles for sources no longer referenced are dropped. The play-head is kept
    /// where it was, clamped into the new timeline.
    #[tracing::instrument(skip(self, clips), fields(clips = clips.len()))]
    pub fn set_clips(&mut self, clips: &[Clip]) {
        self.clips = clips.to_vec();
        self.total = total_duration(&self.clips);
        self.time = self.time.clamp(0.0, self.total);
        let referenced: Vec<String> = self.clips.iter().map(|c| c.source_id.clone()).collect();
        self.handles
            .retain_sources(referenced.iter().map(String::as_str));
        self.sync();
    }

    /// Attach the media handle for `source_id`.
    pub fn register_handle(&mut self, source_id: impl Into<String>, handle: H) {
        self.handles.register(source_id, handle);
        self.sync();
    }

    /// Distinct sources referenced by the timeline that have no handle yet.
    pub fn missing_handles(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for clip in &self.clips {
            if !self.handles.contains(&clip.source_id) && !out.contains(&clip.source_id) {
                out.push(clip.source_id.clone());
            }
        }
        out
    }

    /// Start playback. At (or past) the end, playback restarts from `0`.
    pub fn play(&mut self) {
        if self.time >= self.total {
            self.time = 0.0;
        }
        self.playing = true;
        self.sync();
    }

    /// Pause playback, keeping the play-head.
    pub fn pause(&mut self) {
        self.playing = false;
        self.sync();
    }

    /// Play when paused, pause when playing.
    pub fn toggle_play(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Move the play-head to `t` (clamped to `[0, total]`) and pause.
    pub fn scrub(&mut self, t: f64) {
        if !t.is_finite() {
            return;
        }
        self.time = t.clamp(0.0, self.total);
        self.playing = false;
        self.sync();
    }

    /// A handle reported progress.
    ///
    /// Reports from any handle other than the current owner are stale and ignored.
    /// Otherwise the play-head is re-derived from the owner's native position.
    pub fn on_time_update(&mut self, source_id: &str) {
        if self.handles.owner() != Some(source_id) {
            tracing::trace!(source = source_id, "ignored time update from non-owner");
            return;
        }
        let Some(active) = self.active.as_ref().filter(|a| a.source_id == source_id) else {
            return;
        };
        let Some(handle) = self.handles.get(source_id) else {
            return;
        };
        let t = active.virtual_time_at(handle.current_time());
        self.time = t.clamp(0.0, self.total);
        self.sync();
    }

    /// Hold fast-forward. Only meaningful once some handle owns playback.
    pub fn begin_fast_forward(&mut self) -> bool {
        if self.fast_forward || self.handles.owner().is_none() {
            return false;
        }
        self.fast_forward = true;
        self.handles.set_rate(self.opts.fast_forward_rate);
        true
    }

    /// Release (or cancel) fast-forward.
    pub fn end_fast_forward(&mut self) {
        self.fast_forward = false;
        self.handles.set_rate(1.0);
    }

    /// Re-resolve the active clip for the current play-head and reconcile handles.
    ///
    /// At the end of the timeline playback stops and `t` clamps to `total`. When the
    /// active source has no handle, playback pauses and the source is reported as
    /// unavailable. Otherwise ownership moves to the active source (pausing the
    /// previous owner first), the handle is seeked when it drifted past the
    /// tolerance, and it plays or pauses to match the engine.
    pub fn sync(&mut self) {
        let Resolution::Active(active) = resolve(&self.clips, self.time) else {
            if self.playing {
                tracing::debug!(total = self.total, "timeline reached end");
            }
            self.playing = false;
            self.time = self.total;
            self.active = None;
            self.unavailable = None;
            self.handles.pause_all();
            return;
        };

        if !self.handles.contains(&active.source_id) {
            tracing::warn!(
                source = %active.source_id,
                clip = %active.clip_id,
                "no media handle for active clip; pausing"
            );
            self.playing = false;
            self.handles.pause_all();
            self.unavailable = Some(active.source_id.clone());
            self.active = Some(active);
            return;
        }

        self.unavailable = None;
        self.handles.transfer_to(&active.source_id);
        let tolerance = self.opts.seek_tolerance_s;
        let playing = self.playing;
        if let Some(handle) = self.handles.get_mut(&active.source_id) {
            let drift = handle.current_time() - active.local_offset;
            if drift.abs() > tolerance {
                tracing::debug!(source = %active.source_id, drift, "force-seek");
                handle.seek(active.local_offset);
            }
            if playing {
                if handle.is_paused() {
                    handle.play();
                }
            } else if !handle.is_paused() {
                handle.pause();
            }
        }
        self.active = Some(active);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            time: self.time,
            total: self.total,
            playing: self.playing,
            fast_forward: self.fast_forward,
            active_clip: self.active.as_ref().map(|a| a.clip_id.clone()),
            unavailable_source: self.unavailable.clone(),
        }
    }

    /// Virtual play-head position in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Sum of clip durations.
    pub fn total_duration(&self) -> f64 {
        self.total
    }

    /// `true` while playback runs.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// `true` while fast-forward is held.
    pub fn is_fast_forwarding(&self) -> bool {
        self.fast_forward
    }

    /// Clip under the play-head.
    pub fn active(&self) -> Option<&ActiveClip> {
        self.active.as_ref()
    }

    /// Clip list being played.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// The only source whose surface should be visible.
    pub fn visible_source(&self) -> Option<&str> {
        self.active
            .as_ref()
            .filter(|a| self.unavailable.as_deref() != Some(a.source_id.as_str()))
            .map(|a| a.source_id.as_str())
    }

    /// Display correction for the active clip's rotation override.
    pub fn active_preview_rotation(&self, catalog: &SourceCatalog) -> Option<PreviewRotation> {
        let active = self.active.as_ref()?;
        let native = catalog.get(&active.source_id)?.rotation();
        Some(preview_rotation(native, active.rotation_override))
    }

    /// Registered media handles.
    pub fn handles(&self) -> &HandleRegistry<H> {
        &self.handles
    }

    /// Direct handle access, e.g. to advance simulated clocks.
    pub fn handles_mut(&mut self) -> &mut HandleRegistry<H> {
        &mut self.handles
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/engine.rs"]
mod tests;
