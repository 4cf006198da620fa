// TspCore: Euclidean TSP instances and tours written in Rust
// Copyright (C) 2022-2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! The successor-array tour representation and its invariants.
//!
//! A tour over N nodes is a permutation `succ` of `0..N` with exactly one cycle: `succ[i]` is
//! the node visited right after `i`. All neighborhood moves are index rewirings on this array.
//! The unordered edge-list form only appears at the boundary (file output, exact solvers); the
//! conversions between the two live here.

use crate::distance::DistanceMatrix;
use crate::types::{NodeId, TspError};

use rand::prelude::*;

/// A Hamiltonian cycle in successor form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    /// `succ[i]` is the node visited after `i`.
    succ: Vec<NodeId>,
}

impl Tour {
    /// Wrap a successor array, validating that it is a permutation with a single cycle.
    pub fn new(succ: Vec<NodeId>) -> Result<Self, TspError> {
        let tour = Self { succ };
        tour.validate()?;
        Ok(tour)
    }

    /// The tour `0 -> 1 -> ... -> N-1 -> 0`.
    pub fn identity(n: usize) -> Self {
        Self {
            succ: (0..n).map(|i| (i + 1) % n.max(1)).collect(),
        }
    }

    /// A uniformly random tour.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut order: Vec<NodeId> = (0..n).collect();
        order.shuffle(rng);
        Self::from_order(&order)
    }

    /// Build a tour from a visiting order (each node exactly once).
    pub fn from_order(order: &[NodeId]) -> Self {
        let n = order.len();
        let mut succ = vec![0; n];
        for i in 0..n {
            succ[order[i]] = order[(i + 1) % n];
        }
        Self { succ }
    }

    /// Reconstruct a tour from an unordered edge list. Fails with [`TspError::Infeasible`] if
    /// the edges do not form a single Hamiltonian cycle on `0..n`.
    pub fn from_edges(n: usize, edges: &[(NodeId, NodeId)]) -> Result<Self, TspError> {
        if edges.len() != n {
            return Err(TspError::Infeasible);
        }
        if n == 1 {
            return Ok(Self { succ: vec![0] });
        }
        // collect the (up to two) neighbors of every node
        let mut adj: Vec<Vec<NodeId>> = vec![Vec::with_capacity(2); n];
        for &(i, j) in edges {
            if i >= n || j >= n || i == j {
                return Err(TspError::Infeasible);
            }
            adj[i].push(j);
            adj[j].push(i);
        }
        if adj.iter().any(|a| a.len() != 2) {
            return Err(TspError::Infeasible);
        }
        // walk the cycle starting from node 0
        let mut succ = vec![usize::MAX; n];
        let mut prev = 0;
        let mut act = adj[0][0];
        for _ in 1..n {
            succ[prev] = act;
            let next = if adj[act][0] == prev {
                adj[act][1]
            } else {
                adj[act][0]
            };
            prev = act;
            act = next;
        }
        succ[prev] = act;
        if act != 0 {
            return Err(TspError::Infeasible);
        }
        Self::new(succ).map_err(|_| TspError::Infeasible)
    }

    /// The number of nodes.
    pub fn len(&self) -> usize {
        self.succ.len()
    }

    /// Whether the tour covers no node at all.
    pub fn is_empty(&self) -> bool {
        self.succ.is_empty()
    }

    /// The node visited after `i`.
    #[inline]
    pub fn succ(&self, i: NodeId) -> NodeId {
        self.succ[i]
    }

    /// The whole successor array.
    pub fn successors(&self) -> &[NodeId] {
        &self.succ
    }

    /// Mutable access to the successor array for in-place rewiring. The caller is responsible
    /// for restoring the single-cycle invariant before the tour is used again; debug builds
    /// re-check it in [`Tour::validate`] at the end of every move.
    pub fn successors_mut(&mut self) -> &mut [NodeId] {
        &mut self.succ
    }

    /// The edges `(i, succ[i])` of the tour.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.succ.iter().copied().enumerate().collect()
    }

    /// The visiting order, starting from node 0.
    pub fn order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        let mut act = 0;
        for _ in 0..self.len() {
            order.push(act);
            act = self.succ[act];
        }
        order
    }

    /// The number of arcs to walk from `from` until reaching `to`.
    pub fn rank_from(&self, from: NodeId, to: NodeId) -> usize {
        let mut act = from;
        let mut steps = 0;
        while act != to {
            act = self.succ[act];
            steps += 1;
        }
        steps
    }

    /// Total length of the tour under the given distances.
    pub fn cost(&self, d: &DistanceMatrix) -> f64 {
        self.succ
            .iter()
            .enumerate()
            .map(|(i, &j)| d.dist(i, j))
            .sum()
    }

    /// Check the tour invariant: `succ` is a permutation of `0..N` with exactly one cycle.
    pub fn validate(&self) -> Result<(), TspError> {
        let n = self.succ.len();
        if n == 0 {
            return Err(TspError::InvariantViolated("empty tour".to_string()));
        }
        let mut indegree = vec![0u32; n];
        for &j in &self.succ {
            if j >= n {
                return Err(TspError::InvariantViolated(format!(
                    "successor {j} out of range"
                )));
            }
            indegree[j] += 1;
        }
        if indegree.iter().any(|&d| d != 1) {
            return Err(TspError::InvariantViolated(
                "successor array is not a permutation".to_string(),
            ));
        }
        // a permutation has a single cycle iff node 0 is reached again after exactly n steps
        let mut steps = 1;
        let mut act = self.succ[0];
        while act != 0 {
            act = self.succ[act];
            steps += 1;
        }
        if steps != n {
            return Err(TspError::InvariantViolated(
                "successor array has more than one cycle".to_string(),
            ));
        }
        Ok(())
    }
}

/// Rewire the successors so that the traversal from the old predecessor of `u` visits the chain
/// `u -> ... -> v` in reverse order. Operates in O(|path|); `v` must be reachable from `u`.
///
/// The arcs *into* the chain are left untouched: after the call, `succ[u]` still holds its old
/// (now stale) value and the caller is expected to re-point it as part of the enclosing move.
pub fn reverse_path(succ: &mut [NodeId], u: NodeId, v: NodeId) {
    let mut chain = Vec::with_capacity(succ.len());
    let mut act = u;
    chain.push(act);
    while act != v {
        act = succ[act];
        chain.push(act);
    }
    for w in chain.windows(2) {
        succ[w[1]] = w[0];
    }
}
