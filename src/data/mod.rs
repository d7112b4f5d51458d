//! The input graph and its CSP representation.

pub use csp_graph::{CspEntry, CspGraph, Edge, Neighbor, Node};
pub use data_graph::DataGraph;
pub use info::GraphInfo;
pub use sqlite::{from_sqlite, read_sqlite3};

mod csp_graph;
mod data_graph;
mod info;
mod sqlite;
