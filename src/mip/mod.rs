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

//! The exact and matheuristic models backed by an external MIP solver.
//!
//! From the laboratory's point of view each model is a single blocking call that consumes an
//! instance (and, for the matheuristics, a warm-start tour) and returns a completed tour. The
//! solver may multi-thread internally; the granted threads, memory, and the remaining time
//! budget are forwarded as solver parameters.

mod benders;
mod compact;
mod fixing;

pub use benders::solve_benders;
pub use compact::{solve_gg, solve_mtz};
pub use fixing::solve_hard_fixing;

use good_lp::solvers::coin_cbc::CoinCbcProblem;
use good_lp::{Expression, ProblemVariables, Solution as LpSolution, Variable};

use tspcore::prelude::*;

use crate::solvers::RunParams;

/// Column of the symmetric variable `x(i,j)` (with `i < j`) in the flat lower-triangular
/// layout.
pub(crate) fn xpos(i: NodeId, j: NodeId, n: usize) -> usize {
    debug_assert_ne!(i, j);
    if i > j {
        xpos(j, i, n)
    } else {
        i * n + j - (i + 1) * (i + 2) / 2
    }
}

/// Column of the directed variable `x(i,j)` in the dense square layout.
pub(crate) fn xxpos(i: NodeId, j: NodeId, n: usize) -> usize {
    i * n + j
}

/// Create one binary variable per undirected edge, returning the variables and the total cost
/// expression.
pub(crate) fn symmetric_variables(
    p: &mut ProblemVariables,
    inst: &Instance,
) -> (Vec<Variable>, Expression) {
    let n = inst.num_nodes();
    let d = inst.distances();
    let mut vars = Vec::with_capacity(n * (n - 1) / 2);
    let mut objective = Expression::from(0);
    for i in 0..n {
        for j in i + 1..n {
            let x = p.add(good_lp::variable().binary());
            objective += d.dist(i, j) * x;
            vars.push(x);
        }
    }
    (vars, objective)
}

/// Forward the run parameters to the solver: thread count, remaining seconds, and silence
/// unless debug logging is on.
pub(crate) fn configure(model: &mut CoinCbcProblem, params: &RunParams, sw: &Stopwatch) {
    if !log::log_enabled!(log::Level::Debug) {
        model.set_parameter("logLevel", "0");
    }
    if params.threads > 0 {
        model.set_parameter("threads", &params.threads.to_string());
    }
    if let Some(remaining) = sw.remaining() {
        model.set_parameter("seconds", &remaining.as_secs().max(1).to_string());
    }
}

/// The undirected edges selected (with value above one half) in a solved symmetric model.
pub(crate) fn chosen_edges(
    solution: &impl LpSolution,
    vars: &[Variable],
    n: usize,
) -> Vec<(NodeId, NodeId)> {
    let mut edges = Vec::with_capacity(n);
    for i in 0..n {
        for j in i + 1..n {
            if solution.value(vars[xpos(i, j, n)]) > 0.5 {
                edges.push((i, j));
            }
        }
    }
    edges
}

/// Group the nodes into connected components under the given edges.
pub(crate) fn components(n: usize, edges: &[(NodeId, NodeId)]) -> Vec<Vec<NodeId>> {
    let mut uf = UnionFind::new(n);
    for &(i, j) in edges {
        uf.union_set(i, j);
    }
    let mut done = vec![false; n];
    let mut comps = Vec::new();
    for i in 0..n {
        if done[i] {
            continue;
        }
        let members = uf.set_members(i);
        for &m in &members {
            done[m] = true;
        }
        comps.push(members);
    }
    comps
}
