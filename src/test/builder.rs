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

//! Small deterministic instances shared by the solver tests.

use rand::prelude::*;

use tspcore::instance::{CostKind, Instance, Node, WeightKind};
use tspcore::tour::Tour;

/// Build a euclidean instance from plain coordinates.
pub fn euclidean(name: &str, coords: &[(f64, f64)]) -> Instance {
    Instance::new(
        name,
        coords.iter().map(|&(x, y)| Node { x, y }).collect(),
        WeightKind::Euc2d,
        CostKind::Real,
    )
    .unwrap()
}

/// The unit square; its optimal tour has length 4.
pub fn unit_square() -> Instance {
    euclidean("square", &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
}

/// A 3-4-5 triangle; every tour has length 12.
pub fn triangle() -> Instance {
    euclidean("triangle", &[(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)])
}

/// A square of side 10 with its center; the optimal tour splices the center into one side.
pub fn five_points() -> Instance {
    euclidean(
        "five",
        &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)],
    )
}

/// A reproducible random instance in the unit box scaled by 100.
pub fn random(n: usize, seed: u64) -> Instance {
    let mut rng = StdRng::seed_from_u64(seed);
    Instance::random_uniform(format!("rand{n}-{seed}"), n, 100.0, &mut rng).unwrap()
}

/// The self-crossing tour of the unit square, one 2-opt move away from optimal.
pub fn crossing_square_tour() -> Tour {
    Tour::from_order(&[0, 2, 1, 3])
}
