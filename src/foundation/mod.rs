/// Rotation and dimension primitives.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Time display helpers.
pub mod format;
/// HTTP collaborator options and request helpers.
pub mod http;
