//! Candidate generation by right-most extension.

pub use extension::{BackwardExtension, Candidates, Generator};
pub use frequent_edges::{frequent_edges, FrequentEdge};

mod extension;
mod frequent_edges;
