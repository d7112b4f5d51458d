use super::{DataGraph, Edge, Node};
use crate::error::Result;
use log::info;
use std::path::Path;

/// Reads the input graph stored in the SQLite3 file `path`.
///
/// See [`from_sqlite`] for the expected schema.
pub fn read_sqlite3<P: AsRef<Path>>(path: P) -> Result<DataGraph> {
    let conn = rusqlite::Connection::open(path)?;
    from_sqlite(&conn)
}

/// Reads the input graph from an open connection.
///
/// The database must have the following schema:
///
/// ```sql
/// CREATE TABLE vertices (vid INT, vlabel INT);
/// CREATE TABLE edges (src INT, dst INT, elabel INT);
/// ```
///
/// The `rowid` of an edge is used as its id.
pub fn from_sqlite(conn: &rusqlite::Connection) -> Result<DataGraph> {
    info!("reading vertices...");
    let nodes = conn
        .prepare("SELECT vid, vlabel FROM vertices")?
        .query_map([], |row| Ok(Node::new(row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    info!("reading edges...");
    let edges = conn
        .prepare("SELECT rowid, src, dst, elabel FROM edges")?
        .query_map([], |row| {
            Ok(Edge::new(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    info!("read {} vertices and {} edges", nodes.len(), edges.len());
    DataGraph::new(nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error,
        types::{ELabel, VId, VLabel},
    };
    use rusqlite::params;

    fn create_sqlite(
        vertices: &[(VId, VLabel)],
        edges: &[(VId, VId, ELabel)],
    ) -> rusqlite::Connection {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE vertices (vid INT, vlabel INT)", [])
            .unwrap();
        conn.execute("CREATE TABLE edges (src INT, dst INT, elabel INT)", [])
            .unwrap();
        for &(vid, vlabel) in vertices {
            conn.execute("INSERT INTO vertices VALUES (?1, ?2)", params![vid, vlabel])
                .unwrap();
        }
        for &(src, dst, elabel) in edges {
            conn.execute(
                "INSERT INTO edges VALUES (?1, ?2, ?3)",
                params![src, dst, elabel],
            )
            .unwrap();
        }
        conn
    }

    #[test]
    fn test_from_sqlite() {
        let conn = create_sqlite(
            &[(1, 10), (2, 20), (3, 30)],
            &[(1, 2, 12), (1, 3, 13), (2, 3, 23), (3, 2, 32)],
        );
        let g = from_sqlite(&conn).unwrap();
        assert_eq!(g.nodes().len(), 3);
        assert_eq!(g.edges().len(), 4);
        assert!(g.has_edge(3, 2, 32));
        assert_eq!(g.entry(1).unwrap().out_deg(), 2);
    }

    #[test]
    fn test_from_sqlite_dangling() {
        let conn = create_sqlite(&[(1, 10)], &[(1, 2, 12)]);
        match from_sqlite(&conn) {
            Err(error::Err::DanglingEdge { node, .. }) => assert_eq!(node, 2),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("dangling edge accepted"),
        }
    }

    #[test]
    fn test_missing_table() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        assert!(matches!(from_sqlite(&conn), Err(error::Err::Sqlite(_))));
    }
}
