/// Grouped, ranked field values.
pub mod candidate;
/// The final encoding descriptor handed to the render job.
pub mod descriptor;
/// Candidate derivation, selection and finalization.
pub mod negotiator;
