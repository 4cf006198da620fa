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

//! The symmetric degree model with a cutting-plane loop for subtour elimination.

use good_lp::solvers::coin_cbc::coin_cbc;
use good_lp::{constraint, Expression, ProblemVariables, SolverModel};
use itertools::Itertools;
use log::{debug, info};

use tspcore::prelude::*;

use crate::solvers::{Model, RunParams, Solution, SolverError};

use super::{chosen_edges, components, configure, symmetric_variables, xpos};

/// Solve the degree model, re-solving with subtour elimination constraints for every connected
/// component until the selected edges form a single cycle. `fixed` arcs are forced into the
/// solution (used by the matheuristics).
pub(crate) fn solve_degree_model(
    inst: &Instance,
    params: &RunParams,
    sw: &Stopwatch,
    fixed: &[(NodeId, NodeId)],
) -> Result<(Tour, f64), SolverError> {
    let n = inst.num_nodes();
    if n < 3 {
        let tour = Tour::identity(n);
        let zstar = tour.cost(inst.distances());
        return Ok((tour, zstar));
    }
    let mut sec_sets: Vec<Vec<NodeId>> = Vec::new();

    loop {
        let mut p = ProblemVariables::new();
        let (vars, objective) = symmetric_variables(&mut p, inst);
        let mut model = coin_cbc(p.minimise(objective));
        configure(&mut model, params, sw);

        // every node has exactly two incident selected edges
        for h in 0..n {
            let degree = (0..n)
                .filter(|&j| j != h)
                .fold(Expression::from(0), |acc, j| acc + vars[xpos(h, j, n)]);
            model.add_constraint(constraint!(degree == 2.0));
        }
        // forced warm-start arcs
        for &(i, j) in fixed {
            model.add_constraint(constraint!(Expression::from(vars[xpos(i, j, n)]) == 1.0));
        }
        // subtour elimination cuts collected so far
        for set in &sec_sets {
            let inner = set
                .iter()
                .tuple_combinations()
                .fold(Expression::from(0), |acc, (&i, &j)| {
                    acc + vars[xpos(i, j, n)]
                });
            model.add_constraint(constraint!(inner <= set.len() as f64 - 1.0));
        }

        let solution = model
            .solve()
            .map_err(|e| SolverError::Resolution(e.to_string()))?;

        let edges = chosen_edges(&solution, &vars, n);
        let comps = components(n, &edges);
        if comps.len() == 1 {
            let tour = Tour::from_edges(n, &edges)?;
            let zstar = tour.cost(inst.distances());
            return Ok((tour, zstar));
        }

        debug!(
            "{} subtours found, adding their elimination constraints",
            comps.len()
        );
        if sw.expired() {
            return Err(SolverError::Resolution(
                "time limit reached before the cutting-plane loop closed a tour".to_string(),
            ));
        }
        sec_sets.extend(comps);
    }
}

/// Solve the instance exactly with the degree model and Benders-style subtour cuts.
pub fn solve_benders(
    inst: &Instance,
    params: &RunParams,
    sw: &Stopwatch,
) -> Result<Solution, SolverError> {
    let (tour, zstar) = solve_degree_model(inst, params, sw, &[])?;
    info!("cutting-plane loop closed a tour of length {zstar:.2}");
    let mut sol = Solution::new(Model::Benders, tour, zstar);
    sol.tracker.add(sw.elapsed_ms(), zstar);
    Ok(sol)
}
