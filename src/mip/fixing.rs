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

//! The hard-fixing matheuristic: freeze most of the incumbent and let the exact model
//! re-optimize the rest.

use log::{debug, info};
use rand::prelude::*;

use tspcore::prelude::*;

use crate::constructives;
use crate::refinements::twoopt_refinement;
use crate::solvers::{Model, RunParams, Solution, SolverError};

use super::benders::solve_degree_model;

/// Probability of freezing an incumbent arc in each round.
const FIXING_PROBABILITY: f64 = 0.7;

/// Share of the budget spent on the initial heuristic incumbent.
const INITIAL_FRACTION_TIME: f64 = 0.2;

/// Matheuristic on top of the degree model: start from a refined heuristic tour and
/// repeatedly re-solve the exact model with a random 70% of the incumbent's arcs frozen,
/// keeping every improvement, until the budget runs out.
pub fn solve_hard_fixing<R: Rng + ?Sized>(
    inst: &Instance,
    params: &RunParams,
    rng: &mut R,
    sw: &Stopwatch,
) -> Result<Solution, SolverError> {
    // initial incumbent: one randomized greedy pass, refined
    let mut incumbent = constructives::grasp(inst, true, rng, &sw.fraction(INITIAL_FRACTION_TIME));
    let mut zstar = incumbent.zstar;
    zstar += twoopt_refinement(inst, &mut incumbent.tour, &sw.fraction(INITIAL_FRACTION_TIME));
    info!("hard fixing starts from an incumbent of length {zstar:.2}");

    let mut tracker = Tracker::new();
    tracker.add(sw.elapsed_ms(), zstar);

    while !sw.expired() {
        let fixed: Vec<(NodeId, NodeId)> = incumbent
            .tour
            .edges()
            .into_iter()
            .filter(|_| rng.gen::<f64>() < FIXING_PROBABILITY)
            .collect();
        debug!("fixing {} of {} arcs", fixed.len(), inst.num_nodes());

        match solve_degree_model(inst, params, sw, &fixed) {
            Ok((tour, z)) => {
                if z < zstar - EPSILON {
                    info!("hard fixing improved {zstar:.2} -> {z:.2}");
                    zstar = z;
                    incumbent.tour = tour;
                    tracker.add(sw.elapsed_ms(), z);
                }
            }
            // a failed round (usually the budget inside the solver) ends the search
            Err(e) => {
                debug!("hard fixing round failed: {e}");
                break;
            }
        }
        if sw.remaining().is_none() {
            // without a deadline a single round is all there is to do
            break;
        }
    }

    let mut sol = Solution::new(Model::HardFixing, incumbent.tour, zstar);
    sol.tracker = tracker;
    Ok(sol)
}
