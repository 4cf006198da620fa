// Magellan: A solver laboratory for the symmetric Euclidean TSP
// Copyright (C) 2023 Tibor Schneider <sctibor@ethz.ch>
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

//! # Magellan: A solver laboratory for the symmetric Euclidean TSP
//!
//! Given N sites in the plane, this crate computes Hamiltonian tours of small total length
//! using a portfolio of constructive heuristics, local-search refinements, metaheuristics, and
//! (optionally) mixed-integer programming models handed to an external solver.
//!
//! ## Structure
//! The source code of this program is structured as follows:
//! - The module [`constructives`] builds initial tours from nothing: nearest-neighbour over all
//!   starts, a randomized greedy (picking among the top-k candidate arcs), insertion by extra
//!   mileage starting from the convex hull, and a spanning-tree shortcut.
//! - The module [`refinements`] improves a tour in place with best-improvement 2-opt and 3-opt
//!   moves, including the tabu-aware variant of the 2-opt pick.
//! - The module [`kick`] perturbs a tour by cutting several arcs and reconnecting the segments
//!   at random, guaranteeing that the result is still a single cycle.
//! - The module [`metaheuristics`] layers Variable Neighborhood Search, tabu search, and a
//!   memetic engine on top of the refinements and the kick.
//! - The module [`solvers`] defines the model catalogue, the per-run [`solvers::Solution`]
//!   record, and the dispatch from a model to its implementation.
//! - The module [`experiment`] generates random instance batteries and aggregates the results
//!   of comparative runs into CSV (and, with the `serde` feature, JSON) files.
//! - The module [`visualizer`] renders instances and tours as Graphviz documents.
//!
//! The data model (instances, the distance matrix, tours, trackers, and the small solver
//! primitives) lives in a separate crate: [`tspcore`].
//!
//! With the `mip` feature enabled, the module [`mip`] adds the exact and matheuristic models
//! (compact formulations and a cutting-plane loop) on top of an external MIP solver.

#![deny(
    missing_docs,
    clippy::missing_docs_in_private_items,
    missing_debug_implementations,
    rust_2018_idioms
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod constructives;
pub mod experiment;
pub mod formatter;
pub mod kick;
pub mod metaheuristics;
#[cfg(feature = "mip")]
#[cfg_attr(docsrs, doc(cfg(feature = "mip")))]
pub mod mip;
pub mod refinements;
pub mod solvers;
pub mod visualizer;

#[cfg(test)]
mod test;

pub use solvers::{solve, Model, RunParams, Solution};
