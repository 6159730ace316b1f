/// Render request wire format, job stream and the client contract.
pub mod client;
/// Blocking HTTP client for the cook endpoint.
#[cfg(feature = "http")]
pub mod http;
/// Cook progress and status formatting.
pub mod progress;
