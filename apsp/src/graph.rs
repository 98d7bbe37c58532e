//! Directed graph store with integer edge costs.
//! Vertices and edges are keyed by caller-chosen ids; each vertex also owns a dense
//! slot (its insertion position) which indexes the distance vectors the algorithms return.
use std::collections::HashMap;

use serde::Serialize;

use crate::error::GraphError;
use crate::{Cost, EdgeId, VertexId};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub id: EdgeId,
    pub tail: VertexId,
    pub head: VertexId,
    pub cost: Cost,
}

/// An edge together with the slots of its endpoints.
#[derive(Copy, Clone, Debug)]
struct Arc {
    edge: Edge,
    tail: usize,
    head: usize,
}

#[derive(Clone, Debug)]
pub struct Graph {
    ids: Vec<VertexId>,
    slots: HashMap<VertexId, usize>,
    arcs: Vec<Arc>,
    arc_of: HashMap<EdgeId, usize>,
    leaving: Vec<Vec<usize>>,
    arriving: Vec<Vec<usize>>,
    /// Smallest id above every edge id seen so far; `None` once `EdgeId::MAX` is taken.
    next_edge_id: Option<EdgeId>,
}

impl Graph {
    pub fn new() -> Self { Self::with_capacity(0, 0) }

    pub fn with_capacity(n: usize, m: usize) -> Self {
        Self {
            ids: Vec::with_capacity(n),
            slots: HashMap::with_capacity(n),
            arcs: Vec::with_capacity(m),
            arc_of: HashMap::with_capacity(m),
            leaving: Vec::with_capacity(n),
            arriving: Vec::with_capacity(n),
            next_edge_id: Some(1),
        }
    }

    /// Graph with vertices `1..=n` and no edges.
    pub fn dense(n: usize) -> Self {
        let mut g = Self::with_capacity(n, 0);
        for v in 1..=n { g.add_vertex(v); }
        g
    }

    /// Builds a graph with vertices `1..=n` and one edge per `(tail, head, cost)` triple.
    /// Edge ids are `1..=m` in input order.
    pub fn from_edge_list(n: usize, edges: &[(VertexId, VertexId, Cost)]) -> Result<Self, GraphError> {
        let mut g = Self::dense(n);
        g.arcs.reserve(edges.len());
        for (i, &(tail, head, cost)) in edges.iter().enumerate() {
            g.add_edge(i + 1, tail, head, cost)?;
        }
        Ok(g)
    }

    pub fn vertex_count(&self) -> usize { self.ids.len() }
    pub fn edge_count(&self) -> usize { self.arcs.len() }
    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    /// Inserts a vertex. Returns `false` if the id was already present, in which case
    /// nothing changes.
    pub fn add_vertex(&mut self, id: VertexId) -> bool {
        if self.slots.contains_key(&id) { return false; }
        self.slots.insert(id, self.ids.len());
        self.ids.push(id);
        self.leaving.push(Vec::new());
        self.arriving.push(Vec::new());
        true
    }

    /// Inserts an edge, or replaces the edge with the same id and returns the old one.
    /// Both endpoints must already exist; otherwise the graph is left untouched.
    pub fn add_edge(&mut self, id: EdgeId, tail: VertexId, head: VertexId, cost: Cost) -> Result<Option<Edge>, GraphError> {
        let t = self.slot_of(tail)?;
        let h = self.slot_of(head)?;
        let edge = Edge { id, tail, head, cost };
        match self.arc_of.get(&id) {
            Some(&a) => {
                let old = self.arcs[a];
                if old.tail != t || old.head != h {
                    detach(&mut self.leaving[old.tail], a);
                    detach(&mut self.arriving[old.head], a);
                    self.leaving[t].push(a);
                    self.arriving[h].push(a);
                }
                self.arcs[a] = Arc { edge, tail: t, head: h };
                Ok(Some(old.edge))
            }
            None => {
                let a = self.arcs.len();
                self.arcs.push(Arc { edge, tail: t, head: h });
                self.arc_of.insert(id, a);
                self.leaving[t].push(a);
                self.arriving[h].push(a);
                if self.next_edge_id.is_some_and(|next| id >= next) {
                    self.next_edge_id = id.checked_add(1);
                }
                Ok(None)
            }
        }
    }

    /// Appends an edge between two slots under a fresh id above every existing one.
    /// Returns `None`, leaving the graph untouched, when no such id is left.
    /// Panics if either slot is out of range.
    pub(crate) fn push_edge(&mut self, tail: usize, head: usize, cost: Cost) -> Option<EdgeId> {
        let id = self.next_edge_id?;
        let a = self.arcs.len();
        let edge = Edge { id, tail: self.ids[tail], head: self.ids[head], cost };
        self.arcs.push(Arc { edge, tail, head });
        self.arc_of.insert(id, a);
        self.leaving[tail].push(a);
        self.arriving[head].push(a);
        self.next_edge_id = id.checked_add(1);
        Some(id)
    }

    /// Replaces the cost of an existing edge in place and returns the previous cost.
    pub fn set_edge_cost(&mut self, id: EdgeId, cost: Cost) -> Result<Cost, GraphError> {
        let a = *self.arc_of.get(&id).ok_or(GraphError::EdgeNotFound(id))?;
        Ok(std::mem::replace(&mut self.arcs[a].edge.cost, cost))
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool { self.slots.contains_key(&id) }

    /// Dense index of a vertex: its position in insertion order.
    pub fn slot_of(&self, id: VertexId) -> Result<usize, GraphError> {
        self.slots.get(&id).copied().ok_or(GraphError::VertexNotFound(id))
    }

    /// Vertex id stored at `slot`. Panics if `slot >= vertex_count()`.
    pub fn vertex_at(&self, slot: usize) -> VertexId { self.ids[slot] }

    pub fn edge(&self, id: EdgeId) -> Result<&Edge, GraphError> {
        self.arc_of.get(&id).map(|&a| &self.arcs[a].edge).ok_or(GraphError::EdgeNotFound(id))
    }

    /// Vertex ids in slot order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ { self.ids.iter().copied() }

    /// Edge ids in insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ { self.arcs.iter().map(|a| a.edge.id) }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ { self.arcs.iter().map(|a| &a.edge) }

    pub fn edges_leaving(&self, v: VertexId) -> Result<impl Iterator<Item = &Edge> + '_, GraphError> {
        let s = self.slot_of(v)?;
        Ok(self.leaving[s].iter().map(move |&a| &self.arcs[a].edge))
    }

    pub fn edges_arriving(&self, v: VertexId) -> Result<impl Iterator<Item = &Edge> + '_, GraphError> {
        let s = self.slot_of(v)?;
        Ok(self.arriving[s].iter().map(move |&a| &self.arcs[a].edge))
    }

    pub fn max_vertex_id(&self) -> Option<VertexId> { self.ids.iter().copied().max() }

    pub fn has_negative_edge(&self) -> bool { self.arcs.iter().any(|a| a.edge.cost < 0) }

    /// Edge ids sorted by ascending cost, ties broken by ascending id.
    pub fn edge_ids_by_cost(&self) -> Vec<EdgeId> {
        let mut keyed: Vec<(Cost, EdgeId)> = self.arcs.iter().map(|a| (a.edge.cost, a.edge.id)).collect();
        keyed.sort_unstable();
        keyed.into_iter().map(|(_, id)| id).collect()
    }

    /// `(head slot, cost)` for every edge leaving the vertex at `slot`.
    pub(crate) fn out_arcs(&self, slot: usize) -> impl Iterator<Item = (usize, Cost)> + '_ {
        self.leaving[slot].iter().map(move |&a| (self.arcs[a].head, self.arcs[a].edge.cost))
    }

    /// `(tail slot, cost)` for every edge arriving at the vertex at `slot`.
    pub(crate) fn in_arcs(&self, slot: usize) -> impl Iterator<Item = (usize, Cost)> + '_ {
        self.arriving[slot].iter().map(move |&a| (self.arcs[a].tail, self.arcs[a].edge.cost))
    }

    pub fn memory_estimate_bytes(&self) -> usize {
        let n = self.ids.len();
        let m = self.arcs.len();
        let word = std::mem::size_of::<usize>();
        let map_entry = 2 * word;
        let arc_bytes = m * std::mem::size_of::<Arc>();
        let adjacency_bytes = 2 * (m * word + n * 3 * word);
        let index_bytes = n * (word + map_entry) + m * map_entry;
        arc_bytes + adjacency_bytes + index_bytes
    }
}

impl Default for Graph {
    fn default() -> Self { Self::new() }
}

fn detach(list: &mut Vec<usize>, arc: usize) {
    if let Some(pos) = list.iter().position(|&a| a == arc) { list.remove(pos); }
}
