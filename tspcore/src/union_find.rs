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

//! Weighted union-find with set enumeration.
//!
//! On top of the usual union-by-rank with path compression, every element carries a `next`
//! pointer forming, for each set, a circular singly-linked list of its members. Swapping the two
//! `next` pointers of the representatives on every union keeps the cycles consistent, so a whole
//! set can be enumerated in O(set size) without ever scanning the parent array. The spanning
//! tree construction and the perturbation step both rely on this.

use crate::types::NodeId;

/// A partition of `0..N` supporting near-constant-time union and find.
#[derive(Debug, Clone)]
pub struct UnionFind {
    /// Parent pointers; `parent[i] == i` for representatives.
    parent: Vec<NodeId>,
    /// Upper bound on the height of each tree.
    rank: Vec<u32>,
    /// Number of members of the set, accurate at the representative only.
    size_of_set: Vec<usize>,
    /// Circular linked list of the members of each set.
    next: Vec<NodeId>,
    /// Current number of disjoint sets.
    num_sets: usize,
}

impl UnionFind {
    /// Create the discrete partition of `0..n`.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            size_of_set: vec![1; n],
            next: (0..n).collect(),
            num_sets: n,
        }
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether the structure is empty.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// The representative of the set containing `i`, with full path compression.
    pub fn find(&mut self, i: NodeId) -> NodeId {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut act = i;
        while self.parent[act] != root {
            let up = self.parent[act];
            self.parent[act] = root;
            act = up;
        }
        root
    }

    /// Whether `i` and `j` belong to the same set.
    pub fn same_set(&mut self, i: NodeId, j: NodeId) -> bool {
        self.find(i) == self.find(j)
    }

    /// The size of the set containing `i`.
    pub fn set_size(&mut self, i: NodeId) -> usize {
        let root = self.find(i);
        self.size_of_set[root]
    }

    /// Merge the sets of `i` and `j` (no-op when already joined), keeping sizes and the `next`
    /// cycles consistent.
    pub fn union_set(&mut self, i: NodeId, j: NodeId) {
        let mut x = self.find(i);
        let mut y = self.find(j);
        if x == y {
            return;
        }
        if self.rank[x] > self.rank[y] {
            std::mem::swap(&mut x, &mut y);
        }
        self.parent[x] = y;
        if self.rank[x] == self.rank[y] {
            self.rank[y] += 1;
        }
        self.size_of_set[y] += self.size_of_set[x];
        self.num_sets -= 1;

        // splice the two circular member lists into one
        self.next.swap(x, y);
    }

    /// The members of the set containing `i`, enumerated along the `next` cycle starting at
    /// `i` itself. Takes exactly `set_size(i)` steps.
    pub fn set_members(&mut self, i: NodeId) -> Vec<NodeId> {
        let size = self.set_size(i);
        let mut members = Vec::with_capacity(size);
        let mut act = i;
        for _ in 0..size {
            members.push(act);
            act = self.next[act];
        }
        members
    }

    /// The current number of disjoint sets.
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }
}
