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

//! The model catalogue, the per-run solution record, and the dispatch to the solvers.

use std::fmt;

use clap::ValueEnum;
use log::info;
use rand::prelude::*;
use thiserror::Error;

use tspcore::prelude::*;

use crate::constructives;
use crate::metaheuristics;
use crate::refinements;

/// Every way this laboratory can produce a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Model {
    /// Nearest-neighbour construction, best over all starting nodes.
    Greedy,
    /// Randomized greedy construction (GRASP), restarting until the budget is spent.
    Grasp,
    /// Extra-mileage insertion starting from the convex hull.
    ExtraMileage,
    /// Shortcut a minimum spanning tree into a tour.
    SpanningTree,
    /// Random multistart with 2-opt refinement.
    TwoOpt,
    /// Random multistart with 3-opt refinement.
    ThreeOpt,
    /// Variable Neighborhood Search.
    Vns,
    /// Tabu search over the 2-opt neighborhood.
    Tabu,
    /// The memetic (genetic) engine.
    Genetic,
    /// Symmetric degree model with a cutting-plane loop for subtours.
    #[cfg(feature = "mip")]
    Benders,
    /// The compact Miller-Tucker-Zemlin formulation.
    #[cfg(feature = "mip")]
    Mtz,
    /// The compact Gavish-Graves single-commodity-flow formulation.
    #[cfg(feature = "mip")]
    Gg,
    /// Matheuristic: repeatedly fix a fraction of the incumbent's arcs and re-solve.
    #[cfg(feature = "mip")]
    HardFixing,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Greedy => "greedy",
            Self::Grasp => "grasp",
            Self::ExtraMileage => "extra-mileage",
            Self::SpanningTree => "spanning-tree",
            Self::TwoOpt => "2opt",
            Self::ThreeOpt => "3opt",
            Self::Vns => "vns",
            Self::Tabu => "tabu",
            Self::Genetic => "genetic",
            #[cfg(feature = "mip")]
            Self::Benders => "benders",
            #[cfg(feature = "mip")]
            Self::Mtz => "mtz",
            #[cfg(feature = "mip")]
            Self::Gg => "gg",
            #[cfg(feature = "mip")]
            Self::HardFixing => "hard-fixing",
        };
        write!(f, "{name}")
    }
}

/// The parameters of a single run, carried from the command line to the solvers.
#[derive(Debug, Clone, Copy)]
pub struct RunParams {
    /// Wall-clock budget in seconds; non-finite means unlimited.
    pub time_limit: f64,
    /// Seed for all randomized choices. `None` draws one from the system.
    pub seed: Option<u64>,
    /// Maximum number of threads granted to an external solver or a battery run.
    pub threads: usize,
    /// Memory budget in MB granted to an external solver.
    pub memory_mb: usize,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            time_limit: f64::INFINITY,
            seed: None,
            threads: 1,
            memory_mb: 4096,
        }
    }
}

impl RunParams {
    /// The random number generator of this run.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Error thrown by [`solve`].
#[derive(Debug, Error)]
pub enum SolverError {
    /// The instance or a produced tour was broken.
    #[error(transparent)]
    Tsp(#[from] TspError),
    /// The external MIP solver failed to resolve the model.
    #[error("resolution failed: {0}")]
    Resolution(String),
}

/// The outcome of one run: the tour, its length, and the incumbent trajectory.
#[derive(Debug, Clone)]
pub struct Solution {
    /// The model that produced this solution.
    pub model: Model,
    /// The tour itself.
    pub tour: Tour,
    /// Total length of the tour.
    pub zstar: f64,
    /// Incumbent improvements over time.
    pub tracker: Tracker,
    /// Time spent materializing the distance matrix, in milliseconds (zero when another run
    /// on the same instance already paid for it).
    pub distance_time_ms: f64,
    /// Wall-clock time of the whole run, in milliseconds.
    pub solve_time_ms: f64,
}

impl Solution {
    /// Create a solution record with an empty trajectory.
    pub fn new(model: Model, tour: Tour, zstar: f64) -> Self {
        Self {
            model,
            tour,
            zstar,
            tracker: Tracker::new(),
            distance_time_ms: 0.0,
            solve_time_ms: 0.0,
        }
    }

    /// The relative gap of this solution against a reference objective.
    pub fn gap(&self, reference: f64) -> f64 {
        if reference.abs() < EPSILON {
            0.0
        } else {
            (self.zstar - reference) / reference
        }
    }
}

/// Run `model` on `inst` under the given parameters and return the best tour found within the
/// budget.
pub fn solve(inst: &Instance, model: Model, params: &RunParams) -> Result<Solution, SolverError> {
    let sw = Stopwatch::with_budget(params.time_limit);
    let mut rng = params.rng();
    info!("solving {} with model {}", inst, model);

    // pay for the distance matrix up front, so the solvers measure pure search time
    inst.distances();
    let distance_time_ms = sw.elapsed_ms();

    let mut sol = match model {
        Model::Greedy => constructives::nearest_neighbour(inst, &sw),
        Model::Grasp => constructives::grasp(inst, false, &mut rng, &sw),
        Model::ExtraMileage => constructives::extra_mileage(inst, &sw),
        Model::SpanningTree => constructives::min_spanning_tree(inst, &sw),
        Model::TwoOpt => refinements::twoopt_multistart(inst, &mut rng, &sw),
        Model::ThreeOpt => refinements::threeopt_multistart(inst, &mut rng, &sw),
        Model::Vns => metaheuristics::vns(inst, None, &mut rng, &sw),
        Model::Tabu => metaheuristics::tabu_search(inst, None, &mut rng, &sw),
        Model::Genetic => metaheuristics::genetic(inst, &mut rng, &sw),
        #[cfg(feature = "mip")]
        Model::Benders => crate::mip::solve_benders(inst, params, &sw)?,
        #[cfg(feature = "mip")]
        Model::Mtz => crate::mip::solve_mtz(inst, params, &sw)?,
        #[cfg(feature = "mip")]
        Model::Gg => crate::mip::solve_gg(inst, params, &sw)?,
        #[cfg(feature = "mip")]
        Model::HardFixing => crate::mip::solve_hard_fixing(inst, params, &mut rng, &sw)?,
    };
    sol.distance_time_ms = distance_time_ms;
    sol.solve_time_ms = sw.elapsed_ms();

    debug_assert!(sol.tour.validate().is_ok());
    info!(
        "model {} found a tour of length {:.2} in {:.0} ms",
        model, sol.zstar, sol.solve_time_ms
    );
    Ok(sol)
}
