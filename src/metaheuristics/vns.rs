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

//! Variable Neighborhood Search: kick, refine, and adapt the kick strength.

use log::{debug, trace};
use rand::prelude::*;

use tspcore::prelude::*;

use crate::kick::kick;
use crate::refinements::twoopt_refinement;
use crate::solvers::{Model, Solution};

/// Kick strength of the first escape attempt.
pub const K_START: usize = 5;
/// Increment of the kick strength after a failed attempt.
pub const K_STEP: usize = 1;
/// The search gives up once the kick strength reaches this bound.
pub const K_MAX: usize = 20;

/// Run Variable Neighborhood Search from the given tour (or from a random one). The incumbent
/// is kicked with the current strength `k`, refined back to a 2-opt local optimum, and
/// compared against the best known tour: an improvement resets `k` to [`K_START`], a failure
/// raises it by [`K_STEP`]. The search ends when the budget is spent or `k` reaches
/// [`K_MAX`].
pub fn vns<R: Rng + ?Sized>(
    inst: &Instance,
    start: Option<Tour>,
    rng: &mut R,
    sw: &Stopwatch,
) -> Solution {
    let n = inst.num_nodes();
    let d = inst.distances();

    let mut tour = start.unwrap_or_else(|| Tour::random(n, rng));
    let mut tracker = Tracker::new();
    let mut best_tour = tour.clone();
    let mut best_obj = f64::INFINITY;

    let mut k = K_START;
    let mut first_iter = true;
    while !sw.expired() && k < K_MAX {
        // the first iteration refines the starting tour as-is
        if !first_iter {
            trace!("kick with strength {k}");
            kick(&mut tour, k, rng);
        } else {
            first_iter = false;
        }

        let mut obj = tour.cost(d);
        trace!("kicked objective: {obj}");
        obj += twoopt_refinement(inst, &mut tour, sw);
        debug!("refined objective: {obj} (best {best_obj})");

        if obj < best_obj - EPSILON {
            best_obj = obj;
            best_tour = tour.clone();
            tracker.add(sw.elapsed_ms(), obj);
            k = K_START;
        } else {
            k += K_STEP;
        }
    }

    let mut sol = Solution::new(Model::Vns, best_tour, best_obj);
    sol.tracker = tracker;
    sol
}
