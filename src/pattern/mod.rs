//! Candidate patterns.

pub use canonical::{build_canonical_code, Signature};
pub use pattern::{EdgeType, Instance, NewEdge, Pattern};
pub use right_most_path::find_path;

mod canonical;
mod pattern;
mod right_most_path;
