//! Seeded random graphs for tests, benchmarks and the CLI. Vertices are `1..=n`.
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::graph::Graph;
use crate::Cost;

/// `rows × cols` grid with both directions of every neighbour edge; weights in `1..=maxw`.
pub fn grid(rows: usize, cols: usize, maxw: Cost, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::dense(rows * cols);
    let idx = |r: usize, c: usize| -> usize { r * cols + c };
    for r in 0..rows {
        for c in 0..cols {
            let u = idx(r, c);
            if r + 1 < rows {
                let w = rng.gen_range(1..=maxw);
                g.push_edge(u, idx(r + 1, c), w);
                g.push_edge(idx(r + 1, c), u, w);
            }
            if c + 1 < cols {
                let w = rng.gen_range(1..=maxw);
                g.push_edge(u, idx(r, c + 1), w);
                g.push_edge(idx(r, c + 1), u, w);
            }
        }
    }
    g
}

/// Erdős–Rényi digraph: each ordered pair `u != v` is an edge with probability `p`.
pub fn erdos_renyi(n: usize, p: f64, minw: Cost, maxw: Cost, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::dense(n);
    for u in 0..n {
        for v in 0..n {
            if u == v { continue; }
            if rng.gen::<f64>() < p {
                g.push_edge(u, v, rng.gen_range(minw..=maxw));
            }
        }
    }
    g
}

/// Barabási–Albert style preferential attachment over a complete seed of `m0` vertices,
/// each later vertex linking to `m` endpoints picked proportionally to degree.
pub fn barabasi_albert(n: usize, m0: usize, m: usize, maxw: Cost, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::dense(n);
    let mut ends: Vec<usize> = Vec::new();
    let start = m0.max(1).min(n);
    for u in 0..start {
        for v in 0..start {
            if u != v { g.push_edge(u, v, 1); ends.push(u); }
        }
    }
    for u in start..n {
        for _ in 0..m {
            let t = if ends.is_empty() { rng.gen_range(0..u) } else { ends[rng.gen_range(0..ends.len())] };
            g.push_edge(u, t, rng.gen_range(1..=maxw));
            ends.push(t);
            ends.push(u);
        }
    }
    g
}

/// Exactly `m` edges between uniformly random distinct endpoints (none if `n < 2`).
pub fn sparse(n: usize, m: usize, minw: Cost, maxw: Cost, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::dense(n);
    if n < 2 { return g; }
    for _ in 0..m {
        let u = rng.gen_range(0..n);
        // head drawn from the other n - 1 vertices
        let mut v = rng.gen_range(0..n - 1);
        if v >= u { v += 1; }
        g.push_edge(u, v, rng.gen_range(minw..=maxw));
    }
    g
}

/// Copy of `g` with each cost `c` on `(u, v)` replaced by `c − p(u) + p(v)` for random
/// potentials `p` in `0..=bound`. Every cycle keeps its total cost, so a graph with
/// nonnegative costs comes out with negative edges but without negative cycles.
pub fn with_potential_shift(g: &Graph, bound: Cost, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let p: Vec<Cost> = (0..g.vertex_count()).map(|_| rng.gen_range(0..=bound)).collect();
    let mut shifted = Graph::with_capacity(g.vertex_count(), g.edge_count());
    for v in g.vertex_ids() { shifted.add_vertex(v); }
    for e in g.edges() {
        // endpoints come from `g`, so both slots exist in `shifted`
        let (Ok(u), Ok(v)) = (g.slot_of(e.tail), g.slot_of(e.head)) else { continue };
        shifted.push_edge(u, v, e.cost - p[u] + p[v]);
    }
    shifted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_symmetric() {
        let g = grid(3, 4, 9, 1);
        assert_eq!(g.vertex_count(), 12);
        assert_eq!(g.edge_count(), 2 * (2 * 4 + 3 * 3));
        for e in g.edges() {
            assert!(g.edges_leaving(e.head).unwrap().any(|r| r.head == e.tail && r.cost == e.cost));
        }
    }

    #[test]
    fn generators_are_seeded() {
        let a: Vec<_> = erdos_renyi(50, 0.1, -3, 7, 5).edges().copied().collect();
        let b: Vec<_> = erdos_renyi(50, 0.1, -3, 7, 5).edges().copied().collect();
        assert_eq!(a, b);
        assert!(a.iter().all(|e| (-3..=7).contains(&e.cost) && e.tail != e.head));
        let c: Vec<_> = barabasi_albert(60, 4, 2, 5, 9).edges().copied().collect();
        assert_eq!(c, barabasi_albert(60, 4, 2, 5, 9).edges().copied().collect::<Vec<_>>());
        assert_eq!(c.len(), 4 * 3 + 56 * 2);
    }

    #[test]
    fn sparse_respects_bounds() {
        let g = sparse(30, 200, 2, 4, 11);
        assert_eq!(g.edge_count(), 200);
        assert!(g.edges().all(|e| (2..=4).contains(&e.cost) && e.tail != e.head));
        let tiny = sparse(3, 300, 1, 5, 1);
        assert_eq!(tiny.edge_count(), 300);
        assert!(tiny.edges().all(|e| e.tail != e.head));
        assert_eq!(sparse(1, 10, 0, 1, 0).edge_count(), 0);
    }

    #[test]
    fn potential_shift_preserves_cycle_costs() {
        let base = Graph::from_edge_list(3, &[(1, 2, 2), (2, 3, 5), (3, 1, 1)]).unwrap();
        let g = with_potential_shift(&base, 50, 3);
        assert_eq!(g.edges().map(|e| e.cost).sum::<Cost>(), 8);
        assert_eq!(g.vertex_ids().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
