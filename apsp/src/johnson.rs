//! Johnson's all-pairs shortest paths.
//!
//! Three phases, each finished before the next starts:
//! 1. a private copy of the graph gets a super-source with a zero-cost edge to every vertex;
//! 2. Bellman-Ford from the super-source yields a potential `π(v)` per vertex, or fails on a
//!    negative cycle before anything else runs;
//! 3. a second private copy has every edge cost replaced by `c + π(u) − π(v)` (never
//!    negative), Dijkstra runs from every vertex over it, and finite results are shifted back
//!    by `− π(u) + π(v)`.
//!
//! The caller's graph is never modified. Phase 3 may fan out over scoped threads; each worker
//! owns a disjoint block of rows and the reweighted graph is shared read-only.
use std::collections::HashMap;
use std::time::Instant;

use serde::Serialize;

use crate::dijkstra::{self, SearchStats};
use crate::error::{GraphError, ShortestPathError};
use crate::graph::Graph;
use crate::{bellman_ford, Cost, VertexId, INFINITY};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JohnsonConfig {
    /// Worker threads for the per-vertex Dijkstra phase. `0` and `1` both mean sequential.
    pub threads: usize,
}

impl Default for JohnsonConfig {
    fn default() -> Self { Self { threads: 1 } }
}

impl JohnsonConfig {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}

/// Square matrix of shortest distances; row and column order is the graph's slot order.
/// Unreachable pairs hold [`INFINITY`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DistanceMatrix {
    vertex_ids: Vec<VertexId>,
    rows: Vec<Vec<Cost>>,
    #[serde(skip)]
    slots: HashMap<VertexId, usize>,
}

impl DistanceMatrix {
    pub(crate) fn from_rows(vertex_ids: Vec<VertexId>, rows: Vec<Vec<Cost>>) -> Self {
        debug_assert_eq!(vertex_ids.len(), rows.len());
        let slots = vertex_ids.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        Self { vertex_ids, rows, slots }
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    pub fn vertex_ids(&self) -> &[VertexId] { &self.vertex_ids }
    pub fn row(&self, slot: usize) -> &[Cost] { &self.rows[slot] }
    pub fn rows(&self) -> impl Iterator<Item = &[Cost]> + '_ { self.rows.iter().map(Vec::as_slice) }

    pub fn distance(&self, from: VertexId, to: VertexId) -> Result<Cost, GraphError> {
        let u = *self.slots.get(&from).ok_or(GraphError::VertexNotFound(from))?;
        let v = *self.slots.get(&to).ok_or(GraphError::VertexNotFound(to))?;
        Ok(self.rows[u][v])
    }

    /// Smallest finite distance between two distinct vertices as `(from, to, cost)`.
    /// Ties go to the first pair in row-major order; `None` if no such pair exists.
    pub fn min_entry(&self) -> Option<(VertexId, VertexId, Cost)> {
        let mut best: Option<(VertexId, VertexId, Cost)> = None;
        for (u, row) in self.rows.iter().enumerate() {
            for (v, &d) in row.iter().enumerate() {
                if u == v || d == INFINITY { continue; }
                if best.map_or(true, |(_, _, b)| d < b) {
                    best = Some((self.vertex_ids[u], self.vertex_ids[v], d));
                }
            }
        }
        best
    }
}

pub fn johnson(g: &Graph) -> Result<DistanceMatrix, ShortestPathError> {
    johnson_with(g, &JohnsonConfig::default())
}

pub fn johnson_with(g: &Graph, config: &JohnsonConfig) -> Result<DistanceMatrix, ShortestPathError> {
    johnson_with_stats(g, config).map(|(m, _)| m)
}

/// Like [`johnson_with`], also returning the Dijkstra work summed over all sources.
pub fn johnson_with_stats(g: &Graph, config: &JohnsonConfig) -> Result<(DistanceMatrix, SearchStats), ShortestPathError> {
    let span = tracing::debug_span!("johnson", n = g.vertex_count(), m = g.edge_count(), threads = config.threads);
    let _enter = span.enter();
    if g.is_empty() {
        return Ok((DistanceMatrix::from_rows(Vec::new(), Vec::new()), SearchStats::default()));
    }

    let start = Instant::now();
    let pi = potentials(g)?;
    tracing::debug!(elapsed = ?start.elapsed(), "potentials computed");

    let start = Instant::now();
    let reweighted = reweight(g, &pi)?;
    tracing::debug!(elapsed = ?start.elapsed(), "edges reweighted");

    let start = Instant::now();
    let (rows, stats) = resolve(&reweighted, &pi, config.threads);
    tracing::debug!(elapsed = ?start.elapsed(), edges_scanned = stats.edges_scanned, "all sources resolved");

    Ok((DistanceMatrix::from_rows(g.vertex_ids().collect(), rows), stats))
}

/// Bellman-Ford distances from a super-source joined to every vertex by a zero-cost edge,
/// in slot order of `g`. The augmented copy is dropped before returning.
fn potentials(g: &Graph) -> Result<Vec<Cost>, ShortestPathError> {
    let max_id = g.max_vertex_id().unwrap_or(0);
    let super_id = max_id.checked_add(1).ok_or(ShortestPathError::SuperSourceUnavailable { max_id })?;
    let n = g.vertex_count();

    let mut augmented = g.clone();
    if !augmented.add_vertex(super_id) {
        return Err(ShortestPathError::SuperSourceUnavailable { max_id });
    }
    let s = augmented.slot_of(super_id)?;
    for v in 0..n {
        augmented.push_edge(s, v, 0).ok_or(ShortestPathError::SuperSourceEdgesUnavailable)?;
    }
    tracing::trace!(super_source = super_id, "graph augmented");

    let (mut dist, rounds) = bellman_ford::from_slot(&augmented, s)?;
    tracing::trace!(rounds, "bellman-ford from super-source finished");
    dist.truncate(n);
    Ok(dist)
}

/// Copy of `g` with every cost replaced by its reduced cost `c + π(u) − π(v)`.
fn reweight(g: &Graph, pi: &[Cost]) -> Result<Graph, ShortestPathError> {
    let mut h = g.clone();
    for e in g.edges() {
        let reduced = e.cost + pi[g.slot_of(e.tail)?] - pi[g.slot_of(e.head)?];
        h.set_edge_cost(e.id, reduced)?;
    }
    if let Some(&cheapest) = h.edge_ids_by_cost().first() {
        let min = h.edge(cheapest)?.cost;
        assert!(min >= 0, "reduced cost {min} on edge {cheapest} is negative");
        tracing::trace!(min_reduced_cost = min, "reduced costs checked");
    }
    Ok(h)
}

/// One Dijkstra per vertex over the reweighted graph, with finite entries shifted back to
/// true distances.
fn resolve(h: &Graph, pi: &[Cost], threads: usize) -> (Vec<Vec<Cost>>, SearchStats) {
    let n = h.vertex_count();
    let solve_row = |u: usize| -> (Vec<Cost>, SearchStats) {
        let (mut row, stats) = dijkstra::from_slot(h, u);
        for (v, d) in row.iter_mut().enumerate() {
            if *d != INFINITY { *d = *d - pi[u] + pi[v]; }
        }
        (row, stats)
    };

    let t = threads.max(1).min(n.max(1));
    let mut rows: Vec<Vec<Cost>> = vec![Vec::new(); n];
    let mut total = SearchStats::default();
    if t <= 1 {
        for (u, slot) in rows.iter_mut().enumerate() {
            let (row, stats) = solve_row(u);
            *slot = row;
            total.absorb(&stats);
            if (u + 1) % 500 == 0 { tracing::trace!(solved = u + 1, of = n, "sources solved so far"); }
        }
        return (rows, total);
    }

    let block = n.div_ceil(t);
    std::thread::scope(|scope| {
        let solve_row = &solve_row;
        let handles: Vec<_> = rows
            .chunks_mut(block)
            .enumerate()
            .map(|(b, chunk)| {
                scope.spawn(move || {
                    let mut stats = SearchStats::default();
                    for (k, slot) in chunk.iter_mut().enumerate() {
                        let (row, s) = solve_row(b * block + k);
                        *slot = row;
                        stats.absorb(&s);
                    }
                    stats
                })
            })
            .collect();
        for handle in handles {
            match handle.join() {
                Ok(stats) => total.absorb(&stats),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
    });
    (rows, total)
}
