//! Clipline is the clip-timeline editing core of a video library.
//!
//! A user picks source videos from a tag's catalog, trims them into clips, orders
//! the clips, previews them as one continuous timeline, negotiates output encoding
//! parameters from the clips' probed metadata, and submits a render ("cook") job.
//!
//! # Components
//!
//! - [`SourceCatalog`]: read-only index of probed source videos.
//! - [`ClipProjectStore`]: the ordered clip list of one tag, persisted through a
//!   [`ProjectStorage`] after every accepted mutation.
//! - [`TimelineEngine`]: plays the clip list as a virtual timeline over one
//!   [`MediaHandle`] per source, with at most one handle playing at a time.
//! - [`Trimmer`]: single-clip bound and rotation editing.
//! - [`negotiate`]: grouped encoding candidates and the final [`EncodingDescriptor`].
//! - [`RenderJobClient`]: the render collaborator contract, tracked by [`CookProgress`].
//! - [`EditorSession`]: all of the above wired together for one tag.
//!
//! Routine invalid edits are silent no-ops (`false`/`None`), never errors. Library
//! code logs through `tracing` and never installs a subscriber.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Source videos, their probe data and the library listing.
pub mod catalog;
/// Encoding candidate negotiation.
pub mod encoding;
/// Shared primitives, errors, formatting and HTTP options.
pub mod foundation;
/// Clips, projects and their persistence.
pub mod project;
/// Render requests, job clients and cook progress.
pub mod render;
/// The per-tag editor session.
pub mod session;
/// Virtual timeline playback.
pub mod timeline;
/// Single-clip trimming.
pub mod trim;

pub use crate::catalog::listing::{LibraryListing, ListedVideo};
#[cfg(feature = "http")]
pub use crate::catalog::remote::HttpLibraryClient;
pub use crate::catalog::source::{AudioProbe, Mtime, Probe, SourceVideo};
pub use crate::catalog::store::SourceCatalog;
pub use crate::encoding::candidate::Candidate;
pub use crate::encoding::descriptor::{AudioDescriptor, EncodingDescriptor};
pub use crate::encoding::negotiator::{
    AudioOptions, EncodingOptions, EncodingSelection, ResolutionChoice, negotiate,
};
pub use crate::foundation::core::{Rotation, Size};
pub use crate::foundation::error::{ClipError, ClipResult};
pub use crate::foundation::format::{format_hms, format_mm_ss, format_seconds};
pub use crate::foundation::http::HttpOpts;
pub use crate::project::model::{Clip, Project, total_duration};
pub use crate::project::storage::{FsStorage, MemoryStorage, ProjectStorage};
pub use crate::project::store::{ClipProjectStore, Direction, LoadState, StoreOpts};
pub use crate::render::client::{
    RenderClip, RenderEvent, RenderJob, RenderJobClient, RenderRequest, ScriptedRenderClient,
};
#[cfg(feature = "http")]
pub use crate::render::http::HttpRenderClient;
pub use crate::render::progress::{CookOutcome, CookProgress, format_status};
pub use crate::session::editor::{EditorSession, PaletteItem};
pub use crate::session::opts::EditorOpts;
pub use crate::timeline::engine::{PlaybackState, TimelineEngine, TimelineOpts};
pub use crate::timeline::handles::{HandleRegistry, MediaHandle, SimulatedHandle};
pub use crate::timeline::resolve::{ActiveClip, Resolution, resolve};
pub use crate::timeline::rotation::{PreviewRotation, preview_rotation};
pub use crate::trim::trimmer::{PreviewPoint, SiblingRange, TrimField, TrimOpts, Trimmer};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;
