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

//! Tabu search over the 2-opt neighborhood with adaptive tenure.
//!
//! Every iteration applies the best non-tabu 2-opt move, uphill if need be. Climbing out of a
//! local minimum marks both endpoints of the move tabu, keeping the search from sliding
//! straight back. The tenure alternates between a short (diversification) and a long
//! (intensification) phase on a fixed period.

use log::{debug, trace};
use rand::prelude::*;

use tspcore::prelude::*;

use crate::refinements::{twoopt_move, twoopt_tabu_pick};
use crate::solvers::{Model, Solution};

/// Number of iterations between two tenure flips.
pub const PHASE_DURATION: i64 = 100;

/// Without a deadline the search stops after this many tenure phases.
const PHASES_WITHOUT_DEADLINE: i64 = 10;

/// The short tenure, `ceil(N/20)`.
fn min_tenure(n: usize) -> usize {
    (n + 19) / 20
}

/// The long tenure, `ceil(N/10)`.
fn max_tenure(n: usize) -> usize {
    (n + 9) / 10
}

/// Observable behavior of a tabu run, for diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabuStats {
    /// Total number of applied moves.
    pub iterations: usize,
    /// Number of applied uphill moves.
    pub uphill_moves: usize,
    /// Iteration of the first uphill move, if any.
    pub first_uphill_iter: Option<usize>,
}

/// Run tabu search from the given tour (or from a random one); see
/// [`tabu_search_with_stats`].
pub fn tabu_search<R: Rng + ?Sized>(
    inst: &Instance,
    start: Option<Tour>,
    rng: &mut R,
    sw: &Stopwatch,
) -> Solution {
    tabu_search_with_stats(inst, start, rng, sw).0
}

/// Run tabu search and report its move statistics alongside the solution.
pub fn tabu_search_with_stats<R: Rng + ?Sized>(
    inst: &Instance,
    start: Option<Tour>,
    rng: &mut R,
    sw: &Stopwatch,
) -> (Solution, TabuStats) {
    let n = inst.num_nodes();
    let d = inst.distances();

    let mut tour = start.unwrap_or_else(|| Tour::random(n, rng));
    let mut obj = tour.cost(d);
    let mut tracker = Tracker::new();
    let mut best_tour = tour.clone();
    let mut best_obj = f64::INFINITY;
    let mut stats = TabuStats::default();

    // nobody is tabu at the start
    let mut last_move_iter = vec![i64::MIN / 2; n];
    let mut tenure = max_tenure(n);
    let mut downhill = true;

    let mut k: i64 = 0;
    let iter_bound = if sw.remaining().is_none() {
        PHASE_DURATION * PHASES_WITHOUT_DEADLINE
    } else {
        i64::MAX
    };

    while !sw.expired() && k < iter_bound {
        let Some((delta, a, b)) = twoopt_tabu_pick(inst, &tour, &last_move_iter, tenure, k)
        else {
            break;
        };
        trace!("iteration {k}: move ({a}, {b}), delta {delta}");

        if delta > EPSILON && downhill {
            // we just crossed a local minimum: candidate incumbent
            if obj < best_obj - EPSILON {
                debug!("improved solution: {best_obj} -> {obj}");
                best_obj = obj;
                best_tour = tour.clone();
                tracker.add(sw.elapsed_ms(), obj);
            }
            downhill = false;
        }
        if delta < -EPSILON {
            downhill = true;
        }

        // perform the move even when it climbs
        twoopt_move(&mut tour, a, b);
        obj += delta;
        stats.iterations += 1;

        if delta > EPSILON {
            // climbing: register both endpoints in the tabu list
            last_move_iter[a] = k;
            last_move_iter[b] = k;
            stats.uphill_moves += 1;
            if stats.first_uphill_iter.is_none() {
                stats.first_uphill_iter = Some(stats.iterations - 1);
            }
        }

        k += 1;
        if k % PHASE_DURATION == 0 {
            tenure = if tenure == min_tenure(n) {
                max_tenure(n)
            } else {
                min_tenure(n)
            };
            debug!("iteration {k}: tenure flipped to {tenure}");
        }
    }

    // maybe the last downhill was the best one
    if obj < best_obj - EPSILON {
        best_obj = obj;
        best_tour = tour;
        tracker.add(sw.elapsed_ms(), obj);
    }

    let mut sol = Solution::new(Model::Tabu, best_tour, best_obj);
    sol.tracker = tracker;
    (sol, stats)
}
