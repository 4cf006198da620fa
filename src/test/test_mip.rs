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

use tspcore::prelude::*;

use crate::solvers::{solve, Model, RunParams};
use crate::test::builder;

fn exact_params() -> RunParams {
    RunParams {
        time_limit: 60.0,
        seed: Some(0),
        threads: 1,
        memory_mb: 4096,
    }
}

#[test]
fn the_exact_models_agree_on_the_square() {
    let inst = builder::unit_square();
    for model in [Model::Benders, Model::Mtz, Model::Gg] {
        let sol = solve(&inst, model, &exact_params()).unwrap();
        assert!(sol.tour.validate().is_ok());
        assert_abs_diff_eq!(sol.zstar, 4.0, epsilon = 1e-6);
    }
}

#[test]
fn the_exact_models_agree_on_a_random_instance() {
    let inst = builder::random(12, 3);
    let reference = solve(&inst, Model::Benders, &exact_params()).unwrap();
    for model in [Model::Mtz, Model::Gg] {
        let sol = solve(&inst, model, &exact_params()).unwrap();
        assert_abs_diff_eq!(sol.zstar, reference.zstar, epsilon = 1e-6);
    }
}

#[test]
fn hard_fixing_returns_a_feasible_tour() {
    let inst = builder::random(15, 9);
    let params = RunParams {
        time_limit: 20.0,
        ..exact_params()
    };
    let sol = solve(&inst, Model::HardFixing, &params).unwrap();
    assert!(sol.tour.validate().is_ok());
    assert_abs_diff_eq!(sol.zstar, sol.tour.cost(inst.distances()), epsilon = 1e-6);
}
