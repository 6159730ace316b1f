use std::collections::BTreeMap;

/// Contract for a per-source media playback handle.
///
/// One handle exists per distinct source referenced by the timeline. Implementations
/// report their own position in source seconds and obey play/pause/seek requests.
pub trait MediaHandle {
    /// Current playback position in source seconds.
    fn current_time(&self) -> f64;
    /// Jump to `time` source seconds.
    fn seek(&mut self, time: f64);
    /// Start or resume playback.
    fn play(&mut self);
    /// Pause playback.
    fn pause(&mut self);
    /// `true` while not playing.
    fn is_paused(&self) -> bool;
    /// Speed multiplier; `1.0` is normal speed.
    fn set_playback_rate(&mut self, rate: f64);
}

/// Handles keyed by source id, with at most one owner allowed to play.
///
/// Ownership is an explicit token: [`HandleRegistry::transfer_to`] pauses the previous
/// owner before the new one is authorized, and every non-owner is kept paused.
pub struct HandleRegistry<H: MediaHandle> {
    handles: BTreeMap<String, H>,
    owner: Option<String>,
    rate: f64,
}

impl<H: MediaHandle> Default for HandleRegistry<H> {
    fn default() -> Self {
        Self {
            handles: BTreeMap::new(),
            owner: None,
            rate: 1.0,
        }
    }
}

impl<H: MediaHandle> HandleRegistry<H> {
    /// Empty registry at rate `1.0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the handle for `source_id`.
    ///
    /// The handle starts paused at the registry's current playback rate. Replacing
    /// the owner's handle revokes ownership.
    pub fn register(&mut self, source_id: impl Into<String>, mut handle: H) -> Option<H> {
        let source_id = source_id.into();
        handle.pause();
        handle.set_playback_rate(self.rate);
        if self.owner.as_deref() == Some(source_id.as_str()) {
            self.owner = None;
        }
        self.handles.insert(source_id, handle)
    }

    /// Drop the handle for `source_id`, revoking ownership if it held it.
    pub fn unregister(&mut self, source_id: &str) -> Option<H> {
        if self.owner.as_deref() == Some(source_id) {
            self.owner = None;
        }
        self.handles.remove(source_id)
    }

    /// Drop handles whose source no longer appears in `keep`.
    pub fn retain_sources<'a>(&mut self, keep: impl IntoIterator<Item = &'a str>) {
        let keep: std::collections::BTreeSet<&str> = keep.into_iter().collect();
        let stale: Vec<String> = self
            .handles
            .keys()
            .filter(|k| !keep.contains(k.as_str()))
            .cloned()
            .collect();
        for id in stale {
            self.unregister(&id);
        }
    }

    /// `true` when `source_id` has a handle.
    pub fn contains(&self, source_id: &str) -> bool {
        self.handles.contains_key(source_id)
    }

    /// Handle for `source_id`.
    pub fn get(&self, source_id: &str) -> Option<&H> {
        self.handles.get(source_id)
    }

    /// Mutable handle for `source_id`.
    pub fn get_mut(&mut self, source_id: &str) -> Option<&mut H> {
        self.handles.get_mut(source_id)
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// `true` when no handle is registered.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Registered source ids, sorted.
    pub fn source_ids(&self) -> impl Iterator<Item = &str> {
        self.handles.keys().map(String::as_str)
    }

    /// Source id of the handle currently holding the playback token.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Hand the playback token to `source_id`.
    ///
    /// The previous owner is paused first, then every other non-owner. Returns `true`
    /// when ownership changed; `false` when `source_id` already owned it or has no
    /// handle.
    pub fn transfer_to(&mut self, source_id: &str) -> bool {
        if !self.handles.contains_key(source_id) {
            return false;
        }
        if self.owner.as_deref() == Some(source_id) {
            self.pause_others();
            return false;
        }
        if let Some(prev) = self.owner.take()
            && let Some(h) = self.handles.get_mut(&prev)
        {
            h.pause();
        }
        tracing::debug!(source = source_id, "playback ownership transferred");
        self.owner = Some(source_id.to_string());
        self.pause_others();
        true
    }

    /// Pause every handle. The token stays with its owner.
    pub fn pause_all(&mut self) {
        for h in self.handles.values_mut() {
            if !h.is_paused() {
                h.pause();
            }
        }
    }

    /// Apply `rate` to every registered handle and to handles registered later.
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
        for h in self.handles.values_mut() {
            h.set_playback_rate(rate);
        }
    }

    /// Rate applied to every handle.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Number of handles not paused; at most one while the registry is driven
    /// through [`HandleRegistry::transfer_to`].
    pub fn playing_count(&self) -> usize {
        self.handles.values().filter(|h| !h.is_paused()).count()
    }

    fn pause_others(&mut self) {
        let owner = self.owner.as_deref();
        for (id, h) in self.handles.iter_mut() {
            if Some(id.as_str()) != owner && !h.is_paused() {
                h.pause();
            }
        }
    }
}

/// Deterministic [`MediaHandle`] driven by explicit clock advances.
///
/// Used by tests and headless hosts: time only moves through
/// [`SimulatedHandle::advance`], scaled by the playback rate and capped at the media
/// duration (where the handle pauses itself, like an element reaching its end).
#[derive(Clone, Debug)]
pub struct SimulatedHandle {
    time: f64,
    duration: f64,
    paused: bool,
    rate: f64,
    /// Number of seek requests received.
    pub seeks: usize,
    /// Number of play requests received.
    pub plays: usize,
}

impl SimulatedHandle {
    /// Paused at `0` over media of `duration` seconds.
    pub fn new(duration: f64) -> Self {
        Self {
            time: 0.0,
            duration,
            paused: true,
            rate: 1.0,
            seeks: 0,
            plays: 0,
        }
    }

    /// Move the clock forward by `dt` wall seconds; returns the new position.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if !self.paused {
            self.time = (self.time + dt * self.rate).min(self.duration);
            if self.time >= self.duration {
                self.paused = true;
            }
        }
        self.time
    }

    /// Current playback rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl MediaHandle for SimulatedHandle {
    fn current_time(&self) -> f64 {
        self.time
    }

    fn seek(&mut self, time: f64) {
        self.seeks += 1;
        self.time = time.clamp(0.0, self.duration);
    }

    fn play(&mut self) {
        self.plays += 1;
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/handles.rs"]
mod tests;
