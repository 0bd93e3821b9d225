//! Output module for aggregated movie records.
//!
//! Serializes the in-memory record list to a single pretty-printed
//! JSON array file and reads it back.

/// JSON array file read/write.
pub mod json;
mod paths;

pub use json::{read_movies, write_movies};
pub use paths::{DEFAULT_OUTPUT_PATH, resolve_output_path};
