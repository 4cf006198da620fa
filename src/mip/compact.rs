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

//! The compact formulations on the directed expansion of the instance: Miller-Tucker-Zemlin
//! sequencing and Gavish-Graves single-commodity flow.

use good_lp::solvers::coin_cbc::{coin_cbc, CoinCbcProblem};
use good_lp::{
    constraint, variable, Expression, ProblemVariables, Solution as LpSolution, SolverModel,
    Variable,
};
use log::info;

use tspcore::prelude::*;

use crate::solvers::{Model, RunParams, Solution, SolverError};

use super::{configure, xxpos};

/// The single feasible tour of a tiny instance.
fn trivial(inst: &Instance, model: Model) -> Solution {
    let tour = Tour::identity(inst.num_nodes());
    let zstar = tour.cost(inst.distances());
    Solution::new(model, tour, zstar)
}

/// Create one binary variable per directed arc and the cost expression over them. The dense
/// square layout keeps [`xxpos`] trivial; the diagonal variables are pinned to zero.
fn directed_variables(
    p: &mut ProblemVariables,
    inst: &Instance,
) -> (Vec<Variable>, Expression) {
    let n = inst.num_nodes();
    let d = inst.distances();
    let mut vars = Vec::with_capacity(n * n);
    let mut objective = Expression::from(0);
    for i in 0..n {
        for j in 0..n {
            let x = if i == j {
                p.add(variable().binary().max(0))
            } else {
                p.add(variable().binary())
            };
            objective += d.dist(i, j) * x;
            vars.push(x);
        }
    }
    (vars, objective)
}

/// Every node has exactly one outgoing and one incoming selected arc.
fn degree_constraints(model: &mut CoinCbcProblem, vars: &[Variable], n: usize) {
    for h in 0..n {
        let out = (0..n)
            .filter(|&j| j != h)
            .fold(Expression::from(0), |acc, j| acc + vars[xxpos(h, j, n)]);
        model.add_constraint(constraint!(out == 1.0));
        let inn = (0..n)
            .filter(|&i| i != h)
            .fold(Expression::from(0), |acc, i| acc + vars[xxpos(i, h, n)]);
        model.add_constraint(constraint!(inn == 1.0));
    }
}

/// Rebuild the tour from the selected arcs of a directed model.
fn directed_tour(
    solution: &impl LpSolution,
    vars: &[Variable],
    inst: &Instance,
) -> Result<(Tour, f64), SolverError> {
    let n = inst.num_nodes();
    let mut succ = vec![0; n];
    for i in 0..n {
        for j in 0..n {
            if i != j && solution.value(vars[xxpos(i, j, n)]) > 0.5 {
                succ[i] = j;
            }
        }
    }
    let tour = Tour::new(succ).map_err(|_| TspError::Infeasible)?;
    let zstar = tour.cost(inst.distances());
    Ok((tour, zstar))
}

/// Solve the instance exactly with the Miller-Tucker-Zemlin formulation: a sequencing
/// variable per node, with big-M ordering constraints along every selected arc.
pub fn solve_mtz(
    inst: &Instance,
    params: &RunParams,
    sw: &Stopwatch,
) -> Result<Solution, SolverError> {
    let n = inst.num_nodes();
    if n < 3 {
        return Ok(trivial(inst, Model::Mtz));
    }
    let mut p = ProblemVariables::new();
    let (vars, objective) = directed_variables(&mut p, inst);
    // us[i-1] is the position of node i along the tour from node 0
    let us: Vec<Variable> = (1..n)
        .map(|_| p.add(variable().min(1.0).max(n as f64 - 1.0)))
        .collect();
    let mut model = coin_cbc(p.minimise(objective));
    configure(&mut model, params, sw);

    degree_constraints(&mut model, &vars, n);
    let big_m = n as f64;
    for i in 1..n {
        for j in 1..n {
            if i == j {
                continue;
            }
            // u_j >= u_i + 1 whenever the arc (i, j) is selected
            let lhs = us[i - 1] - us[j - 1] + big_m * vars[xxpos(i, j, n)];
            model.add_constraint(constraint!(lhs <= big_m - 1.0));
        }
    }
    // two-node subtours are cheap to cut statically
    for i in 0..n {
        for j in i + 1..n {
            let both = vars[xxpos(i, j, n)] + vars[xxpos(j, i, n)];
            model.add_constraint(constraint!(both <= 1.0));
        }
    }

    let solution = model
        .solve()
        .map_err(|e| SolverError::Resolution(e.to_string()))?;
    let (tour, zstar) = directed_tour(&solution, &vars, inst)?;
    info!("mtz closed a tour of length {zstar:.2}");
    let mut sol = Solution::new(Model::Mtz, tour, zstar);
    sol.tracker.add(sw.elapsed_ms(), zstar);
    Ok(sol)
}

/// Solve the instance exactly with the Gavish-Graves single-commodity-flow formulation: node 0
/// sends one unit of flow to every other node along selected arcs.
pub fn solve_gg(
    inst: &Instance,
    params: &RunParams,
    sw: &Stopwatch,
) -> Result<Solution, SolverError> {
    let n = inst.num_nodes();
    if n < 3 {
        return Ok(trivial(inst, Model::Gg));
    }
    let mut p = ProblemVariables::new();
    let (vars, objective) = directed_variables(&mut p, inst);
    let flows: Vec<Variable> = (0..n * n).map(|_| p.add(variable().min(0.0))).collect();
    let mut model = coin_cbc(p.minimise(objective));
    configure(&mut model, params, sw);

    degree_constraints(&mut model, &vars, n);
    // flow rides only on selected arcs, at most n-1 units
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let lhs = flows[xxpos(i, j, n)] - (n as f64 - 1.0) * vars[xxpos(i, j, n)];
            model.add_constraint(constraint!(lhs <= 0.0));
        }
    }
    // the depot emits one unit per other node...
    let source = (1..n).fold(Expression::from(0), |acc, j| acc + flows[xxpos(0, j, n)]);
    model.add_constraint(constraint!(source == n as f64 - 1.0));
    // ...and every other node consumes exactly one
    for h in 1..n {
        let inflow = (0..n)
            .filter(|&i| i != h)
            .fold(Expression::from(0), |acc, i| acc + flows[xxpos(i, h, n)]);
        let outflow = (0..n)
            .filter(|&j| j != h)
            .fold(Expression::from(0), |acc, j| acc + flows[xxpos(h, j, n)]);
        let balance = inflow - outflow;
        model.add_constraint(constraint!(balance == 1.0));
    }

    let solution = model
        .solve()
        .map_err(|e| SolverError::Resolution(e.to_string()))?;
    let (tour, zstar) = directed_tour(&solution, &vars, inst)?;
    info!("gg closed a tour of length {zstar:.2}");
    let mut sol = Solution::new(Model::Gg, tour, zstar);
    sol.tracker.add(sw.elapsed_ms(), zstar);
    Ok(sol)
}
