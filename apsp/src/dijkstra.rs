//! Dijkstra's single-source shortest paths for graphs without negative edges.
//! Frontier vertices live in an [`IndexedMinHeap`] keyed by tentative distance; an
//! improvement to an enqueued vertex is a `decrease_key`, and a settled vertex is final.
use serde::Serialize;

use crate::error::GraphError;
use crate::graph::Graph;
use crate::heap::IndexedMinHeap;
use crate::{Cost, VertexId, INFINITY};

/// Work counters for one search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub settled: usize,
    pub edges_scanned: usize,
    pub heap_pushes: usize,
    pub decrease_keys: usize,
}

impl SearchStats {
    pub fn absorb(&mut self, other: &SearchStats) {
        self.settled += other.settled;
        self.edges_scanned += other.edges_scanned;
        self.heap_pushes += other.heap_pushes;
        self.decrease_keys += other.decrease_keys;
    }
}

/// Distances from `source` to every vertex, in slot order.
///
/// Every edge cost must be nonnegative; with a negative edge the result is meaningless.
pub fn dijkstra(g: &Graph, source: VertexId) -> Result<Vec<Cost>, GraphError> {
    dijkstra_with_stats(g, source).map(|(dist, _)| dist)
}

pub fn dijkstra_with_stats(g: &Graph, source: VertexId) -> Result<(Vec<Cost>, SearchStats), GraphError> {
    let s = g.slot_of(source)?;
    Ok(from_slot(g, s))
}

pub(crate) fn from_slot(g: &Graph, source: usize) -> (Vec<Cost>, SearchStats) {
    let n = g.vertex_count();
    let mut dist = vec![INFINITY; n];
    let mut settled = vec![false; n];
    let mut heap = IndexedMinHeap::with_capacity(n);
    let mut stats = SearchStats::default();

    heap.push(source, 0);
    stats.heap_pushes += 1;

    while let Some((v, d)) = heap.pop_min() {
        dist[v] = d;
        settled[v] = true;
        stats.settled += 1;
        for (to, w) in g.out_arcs(v) {
            stats.edges_scanned += 1;
            if settled[to] { continue; }
            debug_assert!(w >= 0, "negative edge cost {w} into slot {to}");
            let nd = d.saturating_add(w);
            match heap.score(to) {
                Some(cur) if nd < cur => {
                    heap.decrease_key(to, nd);
                    stats.decrease_keys += 1;
                }
                Some(_) => {}
                None => {
                    heap.push(to, nd);
                    stats.heap_pushes += 1;
                }
            }
        }
    }
    tracing::trace!(slot = source, settled = stats.settled, edges_scanned = stats.edges_scanned, "dijkstra finished");
    (dist, stats)
}
