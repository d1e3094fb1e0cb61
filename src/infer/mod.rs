//! Structural type inference from JSON samples
//!
//! Derives a JSON-Schema-like structural type from a single concrete JSON
//! value, without validation constraints. Inference is per-sample: no merging
//! across samples of differing shape is attempted here.

mod inference;
mod types;

pub use inference::infer;
pub use types::InferredSchema;
