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

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use rand::prelude::*;

use tspcore::prelude::*;

use crate::kick::kick;

/// The undirected edge set of a tour.
fn edge_set(tour: &Tour) -> BTreeSet<(NodeId, NodeId)> {
    tour.edges()
        .into_iter()
        .map(|(i, j)| (i.min(j), i.max(j)))
        .collect()
}

#[test]
fn kick_preserves_the_single_cycle() {
    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        for n in [6, 7, 10, 20, 35] {
            for strength in [2, 3, 5] {
                let mut tour = Tour::random(n, &mut rng);
                kick(&mut tour, strength, &mut rng);
                assert!(
                    tour.validate().is_ok(),
                    "kick({strength}) broke a tour of {n} nodes (seed {seed})"
                );
            }
        }
    }
}

#[test]
fn kick_changes_at_most_two_s_edges() {
    let mut exact_count = 0;
    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tour = Tour::identity(20);
        let before = edge_set(&tour);
        kick(&mut tour, 3, &mut rng);
        assert!(tour.validate().is_ok());

        let after = edge_set(&tour);
        let diff = before.symmetric_difference(&after).count();
        // 3 arcs leave, 3 arcs enter; recreating a deleted arc shrinks both sides alike
        assert!(diff <= 6, "kick changed {diff} edges (seed {seed})");
        assert_eq!(diff % 2, 0);
        if diff == 6 {
            exact_count += 1;
        }
    }
    // recreating a deleted arc is the rare exception, not the rule
    assert!(exact_count > 0);
}

#[test]
fn oversized_strengths_are_clamped() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut tour = Tour::identity(20);
    kick(&mut tour, 1000, &mut rng);
    assert!(tour.validate().is_ok());
}

#[test]
fn tiny_tours_are_left_alone() {
    let mut rng = StdRng::seed_from_u64(0);
    for n in [1, 2, 3, 4, 5] {
        let mut tour = Tour::identity(n);
        let frozen = tour.clone();
        kick(&mut tour, 3, &mut rng);
        assert_eq!(tour, frozen);
    }
}

#[test]
fn kick_is_deterministic_under_a_fixed_seed() {
    let mut tour_a = Tour::identity(20);
    let mut tour_b = Tour::identity(20);
    let mut rng_a = StdRng::seed_from_u64(99);
    let mut rng_b = StdRng::seed_from_u64(99);
    kick(&mut tour_a, 3, &mut rng_a);
    kick(&mut tour_b, 3, &mut rng_b);
    assert_eq!(tour_a, tour_b);
}
