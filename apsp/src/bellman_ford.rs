//! Bellman-Ford single-source shortest paths with negative-cycle detection.
//! Round `i` holds, for every vertex, the shortest walk from the source using at most `i`
//! edges. Only the previous and current rounds are kept, so memory is O(n) regardless of
//! how many rounds run. Parallel edges are allowed.
use crate::error::ShortestPathError;
use crate::graph::Graph;
use crate::johnson::DistanceMatrix;
use crate::{Cost, VertexId, INFINITY};

/// Distances from `source` in slot order, or [`ShortestPathError::NegativeCycle`] when a
/// negative cycle is reachable from `source`.
pub fn bellman_ford(g: &Graph, source: VertexId) -> Result<Vec<Cost>, ShortestPathError> {
    let s = g.slot_of(source)?;
    from_slot(g, s).map(|(dist, _)| dist)
}

/// Runs Bellman-Ford from every vertex. O(n²m); this is the slow reference that Johnson's
/// algorithm must agree with.
pub fn all_pairs_bellman_ford(g: &Graph) -> Result<DistanceMatrix, ShortestPathError> {
    let rows = (0..g.vertex_count())
        .map(|s| from_slot(g, s).map(|(dist, _)| dist))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DistanceMatrix::from_rows(g.vertex_ids().collect(), rows))
}

/// Returns the distances and the number of rounds that ran.
pub(crate) fn from_slot(g: &Graph, source: usize) -> Result<(Vec<Cost>, usize), ShortestPathError> {
    let n = g.vertex_count();
    let mut prev = vec![INFINITY; n];
    let mut cur = vec![INFINITY; n];
    prev[source] = 0;

    for round in 1..=n {
        let mut changed = false;
        for v in 0..n {
            let mut best = prev[v];
            for (u, c) in g.in_arcs(v) {
                // an unreached tail offers no candidate
                if prev[u] == INFINITY { continue; }
                best = best.min(prev[u].saturating_add(c));
            }
            changed |= best != prev[v];
            cur[v] = best;
        }
        std::mem::swap(&mut prev, &mut cur);
        if !changed {
            tracing::trace!(slot = source, rounds = round, "bellman-ford converged");
            return Ok((prev, round));
        }
        if round % 200 == 0 {
            tracing::trace!(slot = source, round, of = n, "bellman-ford rounds so far");
        }
    }
    // still improving after n rounds: some walk repeats a negative cycle
    tracing::warn!(source = g.vertex_at(source), rounds = n, "negative cycle reachable from source");
    Err(ShortestPathError::NegativeCycle)
}
