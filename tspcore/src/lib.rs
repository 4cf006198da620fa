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

#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # TspCore
//!
//! This is a library providing the data model shared by all solvers of the symmetric, Euclidean
//! Traveling Salesman Problem: problem instances with their (lazily materialized) distance
//! matrix, tours in successor-array form, and the small data structures the solvers are built
//! from.
//!
//! ## Main Concepts
//!
//! The [`instance::Instance`] is the main structure to operate on. It owns the node coordinates
//! and the metric under which distances are measured, and it materializes the lower-triangular
//! [`distance::DistanceMatrix`] exactly once, on first use. Nothing in this crate (nor in any
//! solver built on top of it) ever mutates the coordinates of a loaded instance.
//!
//! A [`tour::Tour`] is a Hamiltonian cycle stored as a successor array: `succ[i]` is the node
//! visited right after `i`. All neighborhood moves of the solvers are formulated as index
//! rewirings on this array; the tour is data, not a graph of objects. Conversions to and from
//! the undirected edge-list form used at the I/O boundary live there as well.
//!
//! The remaining modules are the solver primitives:
//!
//! - [`union_find::UnionFind`]: weighted union-find with a cyclic `next` pointer for set
//!   enumeration, used by the spanning-tree construction and the perturbation step.
//! - [`pqueue::PriorityQueue`] and [`pqueue::TopKQueue`]: a binary heap with an
//!   epsilon-relaxed comparator, and its bounded top-k wrapper with randomized pick.
//! - [`tracker::Tracker`]: the time-stamped incumbent trajectory attached to every run.
//! - [`stopwatch::Stopwatch`]: the cooperative `(start, deadline)` budget threaded through all
//!   long-running loops.
//!
//! Reading and writing the TSPLIB subset (instances, tours, explicit matrices) is implemented
//! in [`tsplib`].
//!
//! ## Optional Features
//!
//! - `serde`: adds serialize and deserialize functionality to the plain data types (nodes,
//!   metrics, tracker series), so that experiment results can be exported.

pub mod distance;
pub mod instance;
pub mod pqueue;
pub mod prelude;
pub mod stopwatch;
pub mod tour;
pub mod tracker;
pub mod tsplib;
pub mod types;
pub mod union_find;

#[cfg(test)]
mod test;
