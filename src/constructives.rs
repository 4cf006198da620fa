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

//! Constructive heuristics: they build a feasible tour from nothing.
//!
//! All constructives return a valid tour no matter how little time is left; the stopwatch only
//! bounds how many alternative starts are explored. Instances with fewer than three nodes have
//! a single feasible tour, which is returned immediately.

use itertools::Itertools;
use log::trace;
use rand::prelude::*;

use tspcore::distance::DistanceMatrix;
use tspcore::instance::Node;
use tspcore::prelude::*;

use crate::solvers::{Model, Solution};

/// Number of candidate arcs the randomized greedy picks from at every step.
pub const GRASP_K: usize = 3;

/// The single feasible tour of a tiny instance (or a fallback for degenerate calls).
fn trivial(inst: &Instance, model: Model) -> Solution {
    let tour = Tour::identity(inst.num_nodes());
    let zstar = tour.cost(inst.distances());
    Solution::new(model, tour, zstar)
}

/// Nearest-neighbour construction: repeatedly walk to the closest unvisited node, then close
/// the cycle. All starting nodes are tried (budget permitting) and the best tour wins; ties on
/// the closest node break first-seen.
pub fn nearest_neighbour(inst: &Instance, sw: &Stopwatch) -> Solution {
    let n = inst.num_nodes();
    if n < 3 {
        return trivial(inst, Model::Greedy);
    }
    let d = inst.distances();

    let mut tracker = Tracker::new();
    let mut best_order: Vec<NodeId> = Vec::new();
    let mut best_obj = f64::INFINITY;

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    for start in 0..n {
        // the first start always runs, so a valid tour exists even on an expired budget
        if start > 0 && sw.expired() {
            break;
        }
        visited.fill(false);
        order.clear();
        order.push(start);
        visited[start] = true;
        let mut act = start;
        let mut obj = 0.0;

        for _ in 1..n {
            let mut next = act;
            let mut weight = f64::INFINITY;
            for i in 0..n {
                if visited[i] {
                    continue;
                }
                if d.dist(act, i) < weight {
                    next = i;
                    weight = d.dist(act, i);
                }
            }
            order.push(next);
            visited[next] = true;
            obj += weight;
            act = next;
        }
        // do not forget to close the loop!
        obj += d.dist(act, start);
        trace!("greedy start {}: obj {obj}", start + 1);

        if obj < best_obj {
            best_obj = obj;
            best_order = order.clone();
            tracker.add(sw.elapsed_ms(), obj);
        }
    }

    let mut sol = Solution::new(Model::Greedy, Tour::from_order(&best_order), best_obj);
    sol.tracker = tracker;
    sol
}

/// Randomized greedy construction: start from a random node and, at every step, draw the next
/// node uniformly among the [`GRASP_K`] closest unvisited candidates. Restarts until the
/// budget is spent; a single pass is run when `one_solution` is set or no deadline is given.
pub fn grasp<R: Rng + ?Sized>(
    inst: &Instance,
    one_solution: bool,
    rng: &mut R,
    sw: &Stopwatch,
) -> Solution {
    let n = inst.num_nodes();
    if n < 3 {
        return trivial(inst, Model::Grasp);
    }
    let d = inst.distances();

    let mut tracker = Tracker::new();
    let mut best_order: Vec<NodeId> = Vec::new();
    let mut best_obj = f64::INFINITY;

    let mut tk = TopKQueue::new(GRASP_K);
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    loop {
        visited.fill(false);
        order.clear();
        let start = rng.gen_range(0..n);
        order.push(start);
        visited[start] = true;
        let mut act = start;
        let mut obj = 0.0;
        trace!("grasp start {}", start + 1);

        for _ in 1..n {
            for i in 0..n {
                if visited[i] {
                    continue;
                }
                tk.push(d.dist(act, i), i);
            }
            let next = tk
                .random_pick(rng)
                .expect("an unvisited candidate always exists");
            order.push(next);
            visited[next] = true;
            obj += d.dist(act, next);
            act = next;
        }
        // do not forget to close the loop!
        obj += d.dist(act, start);

        if obj < best_obj {
            best_obj = obj;
            best_order = order.clone();
            tracker.add(sw.elapsed_ms(), obj);
        }

        if one_solution || sw.expired() || sw.remaining().is_none() {
            break;
        }
    }

    let mut sol = Solution::new(Model::Grasp, Tour::from_order(&best_order), best_obj);
    sol.tracker = tracker;
    sol
}

/// Strict counter-clockwise orientation test; collinear triples fail it.
fn ccw(a: Node, b: Node, c: Node) -> bool {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x) > 0.0
}

/// The convex hull by Andrew's monotone chain, as node indices in counter-clockwise order.
/// Collinear points end up inside the hull; degenerate inputs may yield a two-point "hull".
fn convex_hull(nodes: &[Node]) -> Vec<NodeId> {
    let n = nodes.len();
    let mut idx: Vec<NodeId> = (0..n).collect();
    idx.sort_unstable_by(|&a, &b| {
        nodes[a]
            .x
            .total_cmp(&nodes[b].x)
            .then(nodes[a].y.total_cmp(&nodes[b].y))
    });

    let mut hull: Vec<NodeId> = Vec::with_capacity(2 * n);
    for &i in &idx {
        while hull.len() >= 2
            && !ccw(
                nodes[hull[hull.len() - 2]],
                nodes[hull[hull.len() - 1]],
                nodes[i],
            )
        {
            hull.pop();
        }
        hull.push(i);
    }
    let lower_end = hull.len() + 1;
    for &i in idx.iter().rev().skip(1) {
        while hull.len() >= lower_end
            && !ccw(
                nodes[hull[hull.len() - 2]],
                nodes[hull[hull.len() - 1]],
                nodes[i],
            )
        {
            hull.pop();
        }
        hull.push(i);
    }
    // the chain closed the loop on the starting point
    hull.pop();
    hull
}

/// Complete a partial cycle to a full tour: as long as unvisited nodes remain, insert the
/// (node, edge) pair of smallest extra mileage `d(u,a) + d(u,b) - d(a,b)`, splitting that
/// edge. Returns the total added mileage. Ties break first-found.
pub(crate) fn insert_by_extra_mileage(
    d: &DistanceMatrix,
    edges: &mut Vec<(NodeId, NodeId)>,
    visited: &mut [bool],
) -> f64 {
    let n = visited.len();
    let mut added = 0.0;
    let mut nunvisited = visited.iter().filter(|&&v| !v).count();

    while nunvisited > 0 {
        let mut best = f64::INFINITY;
        let mut best_node = 0;
        let mut best_edge = 0;

        for u in 0..n {
            if visited[u] {
                continue;
            }
            for (ei, &(a, b)) in edges.iter().enumerate() {
                let delta = d.dist(u, a) + d.dist(u, b) - d.dist(a, b);
                if delta < best {
                    best = delta;
                    best_node = u;
                    best_edge = ei;
                }
            }
        }

        // split the edge: substitute one endpoint and append the other half
        let (a, b) = edges[best_edge];
        edges[best_edge] = (a, best_node);
        edges.push((b, best_node));
        visited[best_node] = true;
        added += best;
        nunvisited -= 1;
        trace!("next: {}, break ({}, {})", best_node + 1, a + 1, b + 1);
    }
    added
}

/// Extra-mileage construction: initialize the tour as the convex hull of the sites, then
/// complete it by cheapest insertion. Instances without coordinates (explicit matrices
/// lacking display data) have no hull and fall back to the trivial tour.
pub fn extra_mileage(inst: &Instance, _sw: &Stopwatch) -> Solution {
    let n = inst.num_nodes();
    if n < 3 || inst.nodes().is_empty() {
        return trivial(inst, Model::ExtraMileage);
    }
    let d = inst.distances();

    let hull = convex_hull(inst.nodes());
    let mut visited = vec![false; n];
    let mut edges: Vec<(NodeId, NodeId)> = Vec::with_capacity(n);
    let mut zstar = 0.0;
    for (k, &i) in hull.iter().enumerate() {
        let j = hull[(k + 1) % hull.len()];
        edges.push((i, j));
        zstar += d.dist(i, j);
        visited[i] = true;
    }

    zstar += insert_by_extra_mileage(d, &mut edges, &mut visited);

    let tour = Tour::from_edges(n, &edges)
        .expect("extra-mileage always produces a single hamiltonian cycle");
    Solution::new(Model::ExtraMileage, tour, zstar)
}

/// Shortcut a minimum spanning tree: run Kruskal over all edges, then turn the single
/// resulting set into a tour by enumerating its members and closing the loop. Feasible, with
/// no approximation guarantee claimed.
pub fn min_spanning_tree(inst: &Instance, _sw: &Stopwatch) -> Solution {
    let n = inst.num_nodes();
    if n < 3 {
        return trivial(inst, Model::SpanningTree);
    }
    let d = inst.distances();

    let mut wedges: Vec<(NodeId, NodeId)> = (0..n).tuple_combinations().collect();
    wedges.sort_unstable_by(|&(a, b), &(x, y)| d.dist(a, b).total_cmp(&d.dist(x, y)));

    let mut uf = UnionFind::new(n);
    for (i, j) in wedges {
        if uf.num_sets() == 1 {
            break;
        }
        if !uf.same_set(i, j) {
            uf.union_set(i, j);
        }
    }

    let members = uf.set_members(0);
    let tour = Tour::from_order(&members);
    let zstar = tour.cost(d);
    Solution::new(Model::SpanningTree, tour, zstar)
}
