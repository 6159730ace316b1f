/// The per-tag editor session.
pub mod editor;
/// Bundled session options.
pub mod opts;
