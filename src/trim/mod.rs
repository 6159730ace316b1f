/// Single-clip bound, rotation and preview editing.
pub mod trimmer;
