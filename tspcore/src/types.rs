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

//! Module containing all shared type definitions.

use thiserror::Error;

/// Identifier of a node (site) of an instance. Nodes are numbered `0..N-1` in the order in which
/// they appear in the input; the 1-indexed convention of TSPLIB only exists at the I/O boundary.
pub type NodeId = usize;

/// Tolerance used for every floating-point comparison against zero (objective deltas, heap key
/// ordering, incumbent improvements).
pub const EPSILON: f64 = 1e-9;

/// The error type shared by the instance model, the TSPLIB layer, and the tour representation.
#[derive(Debug, Error)]
pub enum TspError {
    /// The input could not be parsed, or its sections are inconsistent (wrong order, wrong
    /// dimension, malformed records).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested metric cannot be derived from the input attributes (e.g. a coordinate
    /// metric without coordinates, or an explicit metric without a weight section).
    #[error("metric {0} is not derivable from the given input attributes")]
    IllegalMetric(String),

    /// An edge list does not describe a single Hamiltonian cycle.
    #[error("edge list is not a single hamiltonian cycle")]
    Infeasible,

    /// A successor array is not a permutation with a single cycle, or a union-find handed out
    /// inconsistent sets. This is a bug in a solver, not a user error.
    #[error("invariant violated: {0}")]
    InvariantViolated(String),

    /// Any I/O error while reading or writing instance and tour files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
