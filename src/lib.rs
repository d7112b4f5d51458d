//! Frequent subgraph mining in a single large labeled graph.

pub mod data;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod pattern;
pub mod task;
pub mod types;

pub use error::{Err, Result};
