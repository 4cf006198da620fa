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
use pretty_assertions::assert_eq;
use rand::prelude::*;

use tspcore::instance::{CostKind, Instance, Node, WeightKind};
use tspcore::prelude::*;

use crate::constructives::{extra_mileage, grasp, min_spanning_tree, nearest_neighbour};
use crate::refinements::twoopt_refinement;
use crate::test::builder;

#[test]
fn unit_square_is_solved_by_every_constructive() {
    let inst = builder::unit_square();
    let sw = Stopwatch::unlimited();

    for sol in [
        nearest_neighbour(&inst, &sw),
        extra_mileage(&inst, &sw),
        min_spanning_tree(&inst, &sw),
    ] {
        assert!(sol.tour.validate().is_ok());
        assert_abs_diff_eq!(sol.zstar, 4.0, epsilon = EPSILON);
        assert_abs_diff_eq!(sol.zstar, sol.tour.cost(inst.distances()), epsilon = EPSILON);

        // already optimal: 2-opt must not touch it
        let mut tour = sol.tour.clone();
        let improvement = twoopt_refinement(&inst, &mut tour, &sw);
        assert_eq!(improvement, 0.0);
        assert_eq!(tour, sol.tour);
    }
}

#[test]
fn triangle_has_a_single_tour() {
    let inst = builder::triangle();
    let sw = Stopwatch::unlimited();
    let mut rng = StdRng::seed_from_u64(1);

    for sol in [
        nearest_neighbour(&inst, &sw),
        grasp(&inst, true, &mut rng, &sw),
        extra_mileage(&inst, &sw),
        min_spanning_tree(&inst, &sw),
    ] {
        assert!(sol.tour.validate().is_ok());
        assert_abs_diff_eq!(sol.zstar, 12.0, epsilon = EPSILON);
    }
}

#[test]
fn extra_mileage_splices_the_center_into_a_side() {
    let inst = builder::five_points();
    let sol = extra_mileage(&inst, &Stopwatch::unlimited());
    assert!(sol.tour.validate().is_ok());
    // the four sides minus one, plus the two legs to the center
    let expected = 40.0 + 2.0 * 50.0_f64.sqrt() - 10.0;
    assert_abs_diff_eq!(sol.zstar, expected, epsilon = 1e-9);
    assert_abs_diff_eq!(sol.zstar, sol.tour.cost(inst.distances()), epsilon = 1e-9);
}

#[test]
fn grasp_refines_to_the_optimum_on_the_square() {
    let inst = builder::unit_square();
    let sw = Stopwatch::unlimited();
    let mut rng = StdRng::seed_from_u64(7);
    let mut sol = grasp(&inst, true, &mut rng, &sw);
    assert!(sol.tour.validate().is_ok());
    sol.zstar += twoopt_refinement(&inst, &mut sol.tour, &sw);
    assert_abs_diff_eq!(sol.zstar, 4.0, epsilon = EPSILON);
}

#[test]
fn constructives_report_their_own_cost() {
    let inst = builder::random(30, 3);
    let sw = Stopwatch::unlimited();
    let mut rng = StdRng::seed_from_u64(3);

    for sol in [
        nearest_neighbour(&inst, &sw),
        grasp(&inst, true, &mut rng, &sw),
        extra_mileage(&inst, &sw),
        min_spanning_tree(&inst, &sw),
    ] {
        assert!(sol.tour.validate().is_ok());
        assert_eq!(sol.tour.len(), 30);
        assert_abs_diff_eq!(sol.zstar, sol.tour.cost(inst.distances()), epsilon = 1e-6);
    }
}

#[test]
fn collinear_sites_do_not_break_the_hull() {
    let inst = builder::euclidean(
        "line",
        &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0), (5.0, 0.0)],
    );
    let sol = extra_mileage(&inst, &Stopwatch::unlimited());
    assert!(sol.tour.validate().is_ok());
    assert_eq!(sol.tour.len(), 6);
    // out and back along the line
    assert_abs_diff_eq!(sol.zstar, 10.0, epsilon = EPSILON);
}

#[test]
fn tiny_instances_return_the_trivial_tour() {
    let sw = Stopwatch::unlimited();
    for n in [1, 2] {
        let nodes = (0..n).map(|i| Node {
            x: i as f64,
            y: 0.0,
        });
        let inst = Instance::new("tiny", nodes.collect(), WeightKind::Euc2d, CostKind::Real)
            .unwrap();
        for sol in [
            nearest_neighbour(&inst, &sw),
            extra_mileage(&inst, &sw),
            min_spanning_tree(&inst, &sw),
        ] {
            assert!(sol.tour.validate().is_ok());
            assert_eq!(sol.tour.len(), n);
        }
    }
}
