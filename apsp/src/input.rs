//! Plain-text edge lists: a header line `<vertices> <edges>` followed by one
//! `<tail> <head> <cost>` line per edge, vertices numbered from 1. Blank lines are skipped.
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::InputError;
use crate::graph::Graph;
use crate::{Cost, VertexId};

/// Parsed construction input, not yet checked against the vertex range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeList {
    pub vertices: usize,
    pub edges: Vec<(VertexId, VertexId, Cost)>,
}

impl EdgeList {
    /// Builds the graph, failing on the first edge whose endpoint is outside `1..=vertices`.
    pub fn into_graph(self) -> Result<Graph, InputError> {
        Ok(Graph::from_edge_list(self.vertices, &self.edges)?)
    }
}

pub fn read_edge_list(path: &Path) -> Result<EdgeList, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Io { path: path.to_path_buf(), source })?;
    parse_edge_list(&text)
}

pub fn parse_edge_list(text: &str) -> Result<EdgeList, InputError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (line, header) = lines.next().ok_or(InputError::MissingHeader)?;
    let mut fields = header.split_whitespace();
    let vertices: usize = field(&mut fields, line, "vertex count")?;
    let expected: usize = field(&mut fields, line, "edge count")?;

    let mut edges = Vec::with_capacity(expected.min(1 << 20));
    for (line, row) in lines {
        let mut fields = row.split_whitespace();
        let tail: VertexId = field(&mut fields, line, "tail")?;
        let head: VertexId = field(&mut fields, line, "head")?;
        let cost: Cost = field(&mut fields, line, "cost")?;
        edges.push((tail, head, cost));
    }
    if edges.len() != expected {
        return Err(InputError::EdgeCountMismatch { expected, found: edges.len() });
    }
    tracing::debug!(vertices, edges = edges.len(), "edge list parsed");
    Ok(EdgeList { vertices, edges })
}

fn field<'a, T: FromStr>(fields: &mut impl Iterator<Item = &'a str>, line: usize, name: &'static str) -> Result<T, InputError> {
    let raw = fields.next().ok_or(InputError::MissingField { line, field: name })?;
    raw.parse().map_err(|_| InputError::InvalidNumber { line, field: name, value: raw.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    #[test]
    fn parses_header_and_edges() {
        let list = parse_edge_list("3 3\n1 2 4\n2 3 1\n\n1 3 -7\n").unwrap();
        assert_eq!(list, EdgeList { vertices: 3, edges: vec![(1, 2, 4), (2, 3, 1), (1, 3, -7)] });
        let g = list.into_graph().unwrap();
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.edge(3).unwrap().cost, -7);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let list = parse_edge_list("\n  2 1  \n\t1   2 0\t\n").unwrap();
        assert_eq!(list.edges, vec![(1, 2, 0)]);
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(parse_edge_list(""), Err(InputError::MissingHeader)));
        assert!(matches!(parse_edge_list("  \n\n"), Err(InputError::MissingHeader)));
    }

    #[test]
    fn negative_counts_are_rejected() {
        match parse_edge_list("-3 0\n") {
            Err(InputError::InvalidNumber { line: 1, field: "vertex count", value }) => assert_eq!(value, "-3"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn bad_edge_lines() {
        assert!(matches!(
            parse_edge_list("2 1\n1 x 3\n"),
            Err(InputError::InvalidNumber { line: 2, field: "head", .. })
        ));
        assert!(matches!(
            parse_edge_list("2 1\n\n1 2\n"),
            Err(InputError::MissingField { line: 3, field: "cost" })
        ));
    }

    #[test]
    fn edge_count_must_match_header() {
        assert!(matches!(
            parse_edge_list("2 2\n1 2 3\n"),
            Err(InputError::EdgeCountMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn out_of_range_vertex_fails_on_construction() {
        let list = parse_edge_list("2 1\n1 3 5\n").unwrap();
        assert!(matches!(list.into_graph(), Err(InputError::Graph(GraphError::VertexNotFound(3)))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_edge_list(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
