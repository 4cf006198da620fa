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

use approx::assert_abs_diff_eq;
use rand::prelude::*;

use tspcore::prelude::*;

use crate::metaheuristics::{genetic, tabu_search_with_stats, vns, PHASE_DURATION};
use crate::refinements::twoopt_refinement;
use crate::solvers::{solve, Model, RunParams};
use crate::test::builder;

#[test_log::test]
fn vns_returns_a_valid_tour_with_a_monotone_trajectory() {
    let inst = builder::random(15, 8);
    let mut rng = StdRng::seed_from_u64(8);
    let start = Tour::identity(15);
    let z_start = start.cost(inst.distances());

    let sol = vns(&inst, Some(start), &mut rng, &Stopwatch::with_budget(0.5));
    assert!(sol.tour.validate().is_ok());
    assert!(sol.zstar <= z_start + EPSILON);
    assert_abs_diff_eq!(sol.zstar, sol.tour.cost(inst.distances()), epsilon = 1e-6);

    // the recorded incumbents strictly decrease
    let objs: Vec<f64> = sol.tracker.iter().map(|(_, o)| o).collect();
    assert!(!objs.is_empty());
    assert!(objs.windows(2).all(|w| w[1] < w[0]));
    assert_abs_diff_eq!(objs[objs.len() - 1], sol.zstar, epsilon = 1e-6);
}

#[test_log::test]
fn tabu_search_escapes_a_local_optimum_uphill() {
    let inst = builder::random(12, 31);
    let mut rng = StdRng::seed_from_u64(31);

    // start from a 2-opt local optimum, so the very first move must climb
    let mut start = Tour::random(12, &mut rng);
    twoopt_refinement(&inst, &mut start, &Stopwatch::unlimited());

    let (sol, stats) =
        tabu_search_with_stats(&inst, Some(start), &mut rng, &Stopwatch::with_budget(0.5));
    assert!(sol.tour.validate().is_ok());
    assert!(stats.uphill_moves >= 1);
    assert!(stats.first_uphill_iter.unwrap() < PHASE_DURATION as usize);
}

#[test]
fn genetic_breeds_valid_tours() {
    let inst = builder::random(10, 77);
    let mut rng = StdRng::seed_from_u64(77);
    let sol = genetic(&inst, &mut rng, &Stopwatch::with_budget(0.3));
    assert!(sol.tour.validate().is_ok());
    assert_abs_diff_eq!(sol.zstar, sol.tour.cost(inst.distances()), epsilon = 1e-6);
    assert!(!sol.tracker.is_empty());
}

#[test]
fn every_model_solves_the_triangle() {
    let inst = builder::triangle();
    let params = RunParams {
        time_limit: 1.0,
        seed: Some(42),
        ..Default::default()
    };
    for model in [
        Model::Greedy,
        Model::Grasp,
        Model::ExtraMileage,
        Model::SpanningTree,
        Model::TwoOpt,
        Model::ThreeOpt,
        Model::Vns,
        Model::Tabu,
        Model::Genetic,
    ] {
        let sol = solve(&inst, model, &params).unwrap();
        assert!(sol.tour.validate().is_ok());
        assert_abs_diff_eq!(sol.zstar, 12.0, epsilon = EPSILON);
    }
}

#[test]
fn metaheuristics_survive_tiny_instances() {
    let inst = builder::euclidean("pair", &[(0.0, 0.0), (1.0, 0.0)]);
    let params = RunParams {
        time_limit: 0.2,
        seed: Some(1),
        ..Default::default()
    };
    for model in [Model::Vns, Model::Tabu, Model::Genetic] {
        let sol = solve(&inst, model, &params).unwrap();
        assert!(sol.tour.validate().is_ok());
        assert_abs_diff_eq!(sol.zstar, 2.0, epsilon = EPSILON);
    }
}

#[test]
fn metaheuristics_beat_their_random_start() {
    let inst = builder::random(25, 55);
    let mut rng = StdRng::seed_from_u64(55);
    let start = Tour::random(25, &mut rng);
    let z_start = start.cost(inst.distances());

    let sol = vns(
        &inst,
        Some(start.clone()),
        &mut rng,
        &Stopwatch::with_budget(0.5),
    );
    assert!(sol.zstar < z_start);

    let (sol, _) = tabu_search_with_stats(
        &inst,
        Some(start),
        &mut rng,
        &Stopwatch::with_budget(0.5),
    );
    assert!(sol.zstar < z_start);
}
