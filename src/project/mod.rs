/// Clip and project data model.
pub mod model;
/// Persistence backends.
pub mod storage;
/// The per-tag clip project store.
pub mod store;
