//! apsp: shortest paths over directed graphs with integer edge costs.
//! Dijkstra for nonnegative costs, Bellman-Ford for arbitrary costs with negative-cycle
//! detection, and Johnson's all-pairs algorithm composed from the two.
//! Unreachable vertices are reported as [`INFINITY`].
pub mod bellman_ford;
pub mod dijkstra;
pub mod error;
pub mod generate;
pub mod graph;
pub mod heap;
pub mod input;
pub mod johnson;
pub mod logging;

pub use bellman_ford::{all_pairs_bellman_ford, bellman_ford};
pub use dijkstra::{dijkstra, dijkstra_with_stats, SearchStats};
pub use error::{GraphError, InputError, ShortestPathError};
pub use graph::{Edge, Graph};
pub use heap::IndexedMinHeap;
pub use input::{parse_edge_list, read_edge_list, EdgeList};
pub use johnson::{johnson, johnson_with, johnson_with_stats, DistanceMatrix, JohnsonConfig};

pub type VertexId = usize;
pub type EdgeId = usize;
pub type Cost = i64;

/// Distance of a vertex that no path reaches. Never produced by arithmetic on finite costs.
pub const INFINITY: Cost = Cost::MAX;
