/// Playback reducer driving per-source handles along the virtual timeline.
pub mod engine;
/// Media handle contract, ownership registry and a simulated handle.
pub mod handles;
/// Pure mapping from virtual time to the active clip.
pub mod resolve;
/// Preview counter-rotation for overridden clips.
pub mod rotation;
