//! Error management.

use crate::types::{EId, VId};
use derive_more::Display;

#[derive(Debug, Display)]
pub enum Err {
    #[display(fmt = "edge {} references nonexistent node {}", edge, node)]
    DanglingEdge { edge: EId, node: VId },
    #[display(fmt = "root {} is unreachable from right-most node {}", root, right_most)]
    DisconnectedPattern { root: VId, right_most: VId },
    #[display(fmt = "sqlite: {}", _0)]
    Sqlite(rusqlite::Error),
}

impl std::error::Error for Err {}

impl From<rusqlite::Error> for Err {
    fn from(e: rusqlite::Error) -> Self {
        Err::Sqlite(e)
    }
}

pub type Result<T> = std::result::Result<T, Err>;
