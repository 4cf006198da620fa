// TspCore: Euclidean TSP instances and tours written in Rust
// Copyright (C) 2022-2023 Tibor Schneider <sctibor@ethz.ch>
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

use pretty_assertions::assert_eq;
use rand::prelude::*;

use crate::instance::{CostKind, Instance, Node, WeightKind};
use crate::tour::{reverse_path, Tour};
use crate::types::TspError;

fn unit_square() -> Instance {
    Instance::new(
        "square",
        vec![
            Node { x: 0.0, y: 0.0 },
            Node { x: 1.0, y: 0.0 },
            Node { x: 1.0, y: 1.0 },
            Node { x: 0.0, y: 1.0 },
        ],
        WeightKind::Euc2d,
        CostKind::Real,
    )
    .unwrap()
}

#[test]
fn identity_is_valid() {
    for n in [1, 2, 3, 10] {
        let t = Tour::identity(n);
        assert!(t.validate().is_ok());
        assert_eq!(t.order(), (0..n).collect::<Vec<_>>());
    }
}

#[test]
fn random_tours_are_valid() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in [1, 2, 5, 37] {
        let t = Tour::random(n, &mut rng);
        assert!(t.validate().is_ok());
        assert_eq!(t.len(), n);
    }
}

#[test]
fn permutation_with_two_cycles_is_rejected() {
    assert!(matches!(
        Tour::new(vec![1, 0, 3, 2]),
        Err(TspError::InvariantViolated(_))
    ));
}

#[test]
fn non_permutation_is_rejected() {
    assert!(matches!(
        Tour::new(vec![1, 1, 0]),
        Err(TspError::InvariantViolated(_))
    ));
}

#[test]
fn edges_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in [1, 2, 3, 12] {
        let t = Tour::random(n, &mut rng);
        let back = Tour::from_edges(n, &t.edges()).unwrap();
        assert_eq!(back, t);
    }
}

#[test]
fn disjoint_cycles_are_infeasible() {
    // two triangles over six nodes
    let edges = vec![(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)];
    assert!(matches!(
        Tour::from_edges(6, &edges),
        Err(TspError::Infeasible)
    ));
}

#[test]
fn degree_three_is_infeasible() {
    let edges = vec![(0, 1), (1, 2), (2, 0), (0, 3)];
    assert!(matches!(
        Tour::from_edges(4, &edges),
        Err(TspError::Infeasible)
    ));
}

#[test]
fn reverse_path_rewires_the_chain() {
    let mut succ: Vec<usize> = Tour::identity(8).successors().to_vec();
    reverse_path(&mut succ, 2, 5);
    // the chain 2 -> 3 -> 4 -> 5 now runs backwards
    assert_eq!(succ[5], 4);
    assert_eq!(succ[4], 3);
    assert_eq!(succ[3], 2);
    // the arc out of the old chain head is left for the enclosing move to fix
    assert_eq!(succ[2], 3);
}

#[test]
fn reverse_path_preserves_the_node_set() {
    let mut rng = StdRng::seed_from_u64(3);
    let t = Tour::random(10, &mut rng);
    let u = t.succ(4);
    let v = t.succ(t.succ(u));
    let mut succ = t.successors().to_vec();
    reverse_path(&mut succ, u, v);
    // closing the move as 2-opt does: pred(u) -> v, u -> old succ(v)
    let old_after_v = t.succ(v);
    succ[4] = v;
    succ[u] = old_after_v;
    let rewired = Tour::new(succ).unwrap();
    assert_eq!(
        {
            let mut nodes = rewired.order();
            nodes.sort_unstable();
            nodes
        },
        (0..10).collect::<Vec<_>>()
    );
}

#[test]
fn cost_of_the_unit_square() {
    let inst = unit_square();
    let t = Tour::identity(4);
    assert_eq!(t.cost(inst.distances()), 4.0);
}

#[test]
fn rank_from_walks_the_tour() {
    let t = Tour::identity(9);
    assert_eq!(t.rank_from(0, 0), 0);
    assert_eq!(t.rank_from(0, 5), 5);
    assert_eq!(t.rank_from(7, 2), 4);
}
