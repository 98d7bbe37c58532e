//! Error types for graph construction, shortest-path runs and edge-list input.
use std::path::PathBuf;

use thiserror::Error;

use crate::{EdgeId, VertexId};

/// Lookup or construction failure in the graph store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {0} not found")]
    VertexNotFound(VertexId),

    #[error("edge {0} not found")]
    EdgeNotFound(EdgeId),
}

/// Failure of a shortest-path computation.
///
/// Unreachable vertices are not an error; they carry [`crate::INFINITY`] in the result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortestPathError {
    /// A cycle of negative total cost is reachable, so shortest paths are undefined.
    #[error("negative cycle detected")]
    NegativeCycle,

    /// No vertex id is left above the existing ones for Johnson's super-source.
    #[error("no free vertex id for the super-source (largest id is {max_id})")]
    SuperSourceUnavailable { max_id: VertexId },

    /// No edge id is left above the existing ones for the super-source's edges.
    #[error("no free edge id for the super-source edges")]
    SuperSourceEdgesUnavailable,

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Failure while reading an edge list.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing header line `<vertices> <edges>`")]
    MissingHeader,

    #[error("line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid {field} `{value}`")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("header announces {expected} edges but {found} were listed")]
    EdgeCountMismatch { expected: usize, found: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),
}
