//! Read-only index of source videos and their probe metadata.
//!
//! The catalog is supplied by the external video library; the editor core only
//! reads it and replaces it wholesale after a probe refresh.

/// Library listing wire format.
pub mod listing;
/// Blocking HTTP client for the library server.
#[cfg(feature = "http")]
pub mod remote;
/// Source video and probe types.
pub mod source;
/// The catalog index.
pub mod store;
