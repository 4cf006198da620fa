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

//! A binary heap keyed by distances, and its bounded top-k wrapper.
//!
//! Distance keys are floating point, so the heap never compares with strict `<` or `==`:
//! key differences within [`EPSILON`](crate::types::EPSILON) count as ties and are broken in
//! the direction of the heap mode. Keys are stored as [`NotNan`]; pushing a NaN key is a
//! caller bug.

use ordered_float::NotNan;
use rand::prelude::*;

use crate::types::{NodeId, EPSILON};

/// Whether the root of the heap holds the smallest or the largest key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapMode {
    /// The root holds the smallest key.
    Min,
    /// The root holds the largest key.
    Max,
}

/// A `(key, value)` pair on the heap.
#[derive(Debug, Clone, Copy)]
struct HeapNode {
    /// The ordering key.
    key: NotNan<f64>,
    /// The payload, a node id.
    val: NodeId,
}

/// A binary heap over `(f64, NodeId)` pairs with a direction-aware tolerant comparator. The
/// mode is fixed at creation.
#[derive(Debug, Clone)]
pub struct PriorityQueue {
    /// The implicit binary tree.
    data: Vec<HeapNode>,
    /// Min or max heap.
    mode: HeapMode,
}

impl PriorityQueue {
    /// Create an empty heap with the given mode.
    pub fn new(mode: HeapMode) -> Self {
        Self {
            data: Vec::new(),
            mode,
        }
    }

    /// The number of stored pairs.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The value at the root, without removing it.
    pub fn top(&self) -> Option<NodeId> {
        self.data.first().map(|n| n.val)
    }

    /// The key at the root, without removing it.
    pub fn top_key(&self) -> Option<f64> {
        self.data.first().map(|n| n.key.into_inner())
    }

    /// Insert a pair and sift it up. Panics on a NaN key.
    pub fn push(&mut self, key: f64, val: NodeId) {
        let key = NotNan::new(key).unwrap();
        self.data.push(HeapNode { key, val });
        self.sift_up(self.data.len() - 1);
    }

    /// Remove and return the value at the root.
    pub fn pop(&mut self) -> Option<NodeId> {
        if self.data.is_empty() {
            return None;
        }
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let node = self.data.pop()?;
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Some(node.val)
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// All stored values, in heap order.
    pub fn values(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.data.iter().map(|n| n.val)
    }

    /// Whether `a` belongs closer to the root than `b`: strictly better by more than the
    /// tolerance, or tied within it (ties move towards the root of the respective mode).
    fn outranks(&self, a: NotNan<f64>, b: NotNan<f64>) -> bool {
        match self.mode {
            HeapMode::Min => a.into_inner() - b.into_inner() < EPSILON,
            HeapMode::Max => a.into_inner() - b.into_inner() > -EPSILON,
        }
    }

    /// Move the element at `i` towards the root until the heap property holds.
    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.outranks(self.data[i].key, self.data[parent].key) {
                self.data.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    /// Move the element at `i` towards the leaves until the heap property holds.
    fn sift_down(&mut self, mut i: usize) {
        loop {
            let mut best = i;
            for child in [2 * i + 1, 2 * i + 2] {
                if child < self.data.len()
                    && self.outranks(self.data[child].key, self.data[best].key)
                {
                    best = child;
                }
            }
            if best == i {
                return;
            }
            self.data.swap(i, best);
            i = best;
        }
    }
}

/// A max-heap bounded at `k` entries, keeping the `k` smallest keys ever pushed. One of these
/// is drawn uniformly at random per round; callers treat the queue as one-shot and it drains
/// itself on every pick.
#[derive(Debug, Clone)]
pub struct TopKQueue {
    /// The bounded max-heap; its root is the eviction candidate.
    pq: PriorityQueue,
    /// The bound.
    k: usize,
}

impl TopKQueue {
    /// Create a queue keeping at most `k` entries.
    pub fn new(k: usize) -> Self {
        Self {
            pq: PriorityQueue::new(HeapMode::Max),
            k,
        }
    }

    /// The number of stored pairs.
    pub fn len(&self) -> usize {
        self.pq.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.pq.is_empty()
    }

    /// Insert a pair. When full, the pair only enters if its key undercuts the current largest
    /// key, which gets evicted.
    pub fn push(&mut self, key: f64, val: NodeId) {
        if self.pq.len() < self.k {
            self.pq.push(key, val);
        } else if self.pq.top_key().map(|top| key < top).unwrap_or(false) {
            self.pq.pop();
            self.pq.push(key, val);
        }
    }

    /// Draw one of the stored values uniformly at random, then drain the queue.
    pub fn random_pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<NodeId> {
        if self.pq.is_empty() {
            return None;
        }
        let mut npops = rng.gen_range(0..self.pq.len());
        while npops > 0 {
            self.pq.pop();
            npops -= 1;
        }
        let ans = self.pq.top();
        self.pq.clear();
        ans
    }
}
