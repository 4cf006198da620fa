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

//! The metaheuristics layered on top of the refinements and the kick.
//!
//! All three escape local optima in a different way: [`vns`] by kicking the incumbent with
//! adaptive strength, [`tabu_search`] by accepting uphill 2-opt moves guarded by a node-tabu
//! list, and [`genetic`] by recombining a population of tours.

mod genetic;
mod tabu;
mod vns;

pub use genetic::genetic;
pub use tabu::{tabu_search, tabu_search_with_stats, TabuStats, PHASE_DURATION};
pub use vns::{vns, K_MAX, K_START, K_STEP};
