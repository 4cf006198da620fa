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

//! Local-search refinements over the 2-opt and 3-opt neighborhoods.
//!
//! All searches are best-improvement: the full neighborhood is enumerated, the most negative
//! delta is applied, and the process repeats until no improving move remains or the budget is
//! spent. Moves rewire the successor array in place; the delta returned by a pick is exact, so
//! callers maintain their running objective as `z += delta`.

use log::trace;
use rand::prelude::*;

use tspcore::prelude::*;

use crate::solvers::{Model, Solution};

/// Find the best 2-opt move: over all pairs `i < j`, the delta of replacing the arcs
/// `(i, succ[i])` and `(j, succ[j])` by `(i, j)` and `(succ[i], succ[j])`. Returns
/// `(delta, i, j)` with `delta <= 0`; a zero delta means the tour is 2-opt optimal.
pub fn twoopt_pick(inst: &Instance, tour: &Tour) -> (f64, NodeId, NodeId) {
    let n = tour.len();
    let d = inst.distances();
    let succ = tour.successors();

    let mut best = 0.0;
    let (mut a, mut b) = (0, 0);
    for i in 0..n {
        for j in i + 1..n {
            let delta = d.dist(i, j) + d.dist(succ[i], succ[j])
                - (d.dist(i, succ[i]) + d.dist(j, succ[j]));
            if delta < best {
                best = delta;
                a = i;
                b = j;
            }
        }
    }
    (best, a, b)
}

/// Apply the 2-opt move `(a, b)`: reverse the sub-path from `succ[a]` to `b`, then reconnect
/// `a -> b` and `succ_old[a] -> succ_old[b]`. The path from `succ_old[b]` back to `a` stays
/// untouched.
pub fn twoopt_move(tour: &mut Tour, a: NodeId, b: NodeId) {
    let succ = tour.successors_mut();
    let aprime = succ[a];
    let bprime = succ[b];

    // b -> b' becomes b ~-> a'
    reverse_path(succ, aprime, b);
    // a -> a' becomes a -> b
    succ[a] = b;
    // a' ~-> b becomes a' -> b'
    succ[aprime] = bprime;
}

/// Iterate best-improvement 2-opt moves until the tour is locally optimal or the budget is
/// spent. Returns the (non-positive) total improvement.
pub fn twoopt_refinement(inst: &Instance, tour: &mut Tour, sw: &Stopwatch) -> f64 {
    let mut improvement = 0.0;
    while !sw.expired() {
        let (delta, a, b) = twoopt_pick(inst, tour);
        if delta >= -EPSILON {
            break;
        }
        trace!("2-opt move on ({a}, {b}), delta {delta}");
        twoopt_move(tour, a, b);
        improvement += delta;
    }
    debug_assert!(tour.validate().is_ok());
    improvement
}

/// The best 2-opt move under a tabu constraint: pairs with a tabu endpoint are ignored, and
/// the best remaining delta is returned even when it is positive (an uphill step). `None` when
/// every candidate is tabu.
pub fn twoopt_tabu_pick(
    inst: &Instance,
    tour: &Tour,
    last_move_iter: &[i64],
    tenure: usize,
    iter: i64,
) -> Option<(f64, NodeId, NodeId)> {
    let n = tour.len();
    let d = inst.distances();
    let succ = tour.successors();
    let is_tabu = |x: NodeId| iter - last_move_iter[x] < tenure as i64;

    let mut best = f64::INFINITY;
    let mut ans = None;
    for i in 0..n {
        if is_tabu(i) {
            continue;
        }
        for j in i + 1..n {
            // skip the degenerate pairs sharing an arc: their move is a no-op
            if succ[i] == j || succ[j] == i {
                continue;
            }
            if is_tabu(j) {
                continue;
            }
            let delta = d.dist(i, j) + d.dist(succ[i], succ[j])
                - (d.dist(i, succ[i]) + d.dist(j, succ[j]));
            if delta < best {
                best = delta;
                ans = Some((delta, i, j));
            }
        }
    }
    ans
}

/// Find the best 3-opt move. For every triple `i < j < k` that shares no arc, the four
/// non-trivial reconnections are evaluated symbolically (the trivial ones reduce to 2-opt
/// moves or create subtours). Returns `(delta, i, tj, tk)` where `tj` and `tk` are the second
/// and third of the triple in tour order from `i`. Checks the stopwatch between rows and
/// returns the best move found so far on expiry.
pub fn threeopt_pick(
    inst: &Instance,
    tour: &Tour,
    sw: &Stopwatch,
) -> (f64, NodeId, NodeId, NodeId) {
    let n = tour.len();
    let d = inst.distances();
    let succ = tour.successors();

    // traversal ranks from node 0, to order each triple along the tour
    let mut pos = vec![0; n];
    for (rank, node) in tour.order().into_iter().enumerate() {
        pos[node] = rank;
    }

    let mut best = 0.0;
    let (mut a, mut b, mut c) = (0, 0, 0);
    for i in 0..n {
        if sw.expired() {
            break;
        }
        for j in i + 1..n {
            if i == succ[j] || j == succ[i] {
                continue;
            }
            for k in j + 1..n {
                if i == succ[k] || k == succ[i] {
                    continue;
                }
                if j == succ[k] || k == succ[j] {
                    continue;
                }

                // make tk the third visited node along the tour from i
                let rank_j = (pos[j] + n - pos[i]) % n;
                let rank_k = (pos[k] + n - pos[i]) % n;
                let (tj, tk) = if rank_k < rank_j { (k, j) } else { (j, k) };

                let removed =
                    d.dist(i, succ[i]) + d.dist(tj, succ[tj]) + d.dist(tk, succ[tk]);
                let deltas = [
                    d.dist(i, tj) + d.dist(succ[i], tk) + d.dist(succ[tj], succ[tk]),
                    d.dist(i, succ[tj]) + d.dist(tk, succ[i]) + d.dist(tj, succ[tk]),
                    d.dist(i, succ[tj]) + d.dist(tk, tj) + d.dist(succ[i], succ[tk]),
                    d.dist(i, tk) + d.dist(succ[tj], succ[i]) + d.dist(tj, succ[tk]),
                ];
                for delta in deltas {
                    let delta = delta - removed;
                    if delta < best {
                        best = delta;
                        a = i;
                        b = tj;
                        c = tk;
                    }
                }
            }
        }
    }
    (best, a, b, c)
}

/// Apply the best of the four 3-opt reconnections of `(a, b, c)`, re-deriving which case wins
/// from the current arcs. The nodes must be in tour order (as returned by [`threeopt_pick`]).
pub fn threeopt_move(inst: &Instance, tour: &mut Tour, a: NodeId, b: NodeId, c: NodeId) {
    let d = inst.distances();
    let succ = tour.successors_mut();
    let aprime = succ[a];
    let bprime = succ[b];
    let cprime = succ[c];

    let deltas = [
        d.dist(a, b) + d.dist(aprime, c) + d.dist(bprime, cprime),
        d.dist(a, bprime) + d.dist(c, aprime) + d.dist(b, cprime),
        d.dist(a, bprime) + d.dist(c, b) + d.dist(aprime, cprime),
        d.dist(a, c) + d.dist(bprime, aprime) + d.dist(b, cprime),
    ];
    let mut index = 0;
    for (case, delta) in deltas.iter().enumerate().skip(1) {
        if *delta < deltas[index] {
            index = case;
        }
    }

    // cases 0 and 2 ride on the reversed a' ~-> b, cases 0 and 3 on the reversed b' ~-> c
    if index == 0 || index == 2 {
        reverse_path(succ, aprime, b);
    }
    if index == 0 || index == 3 {
        reverse_path(succ, bprime, c);
    }

    match index {
        0 => {
            succ[a] = b;
            succ[aprime] = c;
            succ[bprime] = cprime;
        }
        1 => {
            succ[a] = bprime;
            succ[c] = aprime;
            succ[b] = cprime;
        }
        2 => {
            succ[a] = bprime;
            succ[c] = b;
            succ[aprime] = cprime;
        }
        _ => {
            succ[a] = c;
            succ[bprime] = aprime;
            succ[b] = cprime;
        }
    }
}

/// Iterate best-improvement 3-opt moves until the tour is locally optimal or the budget is
/// spent. Returns the (non-positive) total improvement.
pub fn threeopt_refinement(inst: &Instance, tour: &mut Tour, sw: &Stopwatch) -> f64 {
    let mut improvement = 0.0;
    while !sw.expired() {
        let (delta, a, b, c) = threeopt_pick(inst, tour, sw);
        if delta >= -EPSILON {
            break;
        }
        trace!("3-opt move on ({a}, {b}, {c}), delta {delta}");
        threeopt_move(inst, tour, a, b, c);
        improvement += delta;
    }
    debug_assert!(tour.validate().is_ok());
    improvement
}

/// Random multistart with 2-opt refinement: refine random tours until the budget is spent and
/// keep the best local optimum. Runs a single start when no deadline is given.
pub fn twoopt_multistart<R: Rng + ?Sized>(
    inst: &Instance,
    rng: &mut R,
    sw: &Stopwatch,
) -> Solution {
    multistart(inst, Model::TwoOpt, rng, sw, twoopt_refinement)
}

/// Random multistart with 3-opt refinement.
pub fn threeopt_multistart<R: Rng + ?Sized>(
    inst: &Instance,
    rng: &mut R,
    sw: &Stopwatch,
) -> Solution {
    multistart(inst, Model::ThreeOpt, rng, sw, threeopt_refinement)
}

/// The shared multistart loop over a refinement.
fn multistart<R: Rng + ?Sized>(
    inst: &Instance,
    model: Model,
    rng: &mut R,
    sw: &Stopwatch,
    refine: fn(&Instance, &mut Tour, &Stopwatch) -> f64,
) -> Solution {
    let n = inst.num_nodes();
    let d = inst.distances();

    let mut tracker = Tracker::new();
    let mut best_tour = Tour::identity(n);
    let mut best_obj = f64::INFINITY;

    loop {
        let mut tour = Tour::random(n, rng);
        let mut obj = tour.cost(d);
        obj += refine(inst, &mut tour, sw);

        if obj < best_obj - EPSILON {
            best_obj = obj;
            best_tour = tour;
            tracker.add(sw.elapsed_ms(), obj);
        }
        if sw.expired() || sw.remaining().is_none() {
            break;
        }
    }

    let mut sol = Solution::new(model, best_tour, best_obj);
    sol.tracker = tracker;
    sol
}
