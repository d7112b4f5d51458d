//! Various types related to subgraph mining.

/// The vertex id type.
pub type VId = i64;

/// The edge id type.
pub type EId = i64;

/// The vertex label type.
pub type VLabel = i64;

/// The edge label type.
pub type ELabel = i64;
