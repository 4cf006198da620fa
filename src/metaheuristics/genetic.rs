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

//! The memetic engine: a population of tours recombined by prefix splicing and repaired by
//! extra-mileage insertion.

use log::{debug, trace};
use ordered_float::NotNan;
use rand::prelude::*;

use tspcore::prelude::*;

use crate::constructives::insert_by_extra_mileage;
use crate::refinements::twoopt_refinement;
use crate::solvers::{Model, Solution};

/// Generations to run when no deadline bounds the search.
const GENERATIONS_WITHOUT_DEADLINE: usize = 10;

/// A tour of the population together with its length.
#[derive(Debug, Clone)]
struct Member {
    /// The tour.
    tour: Tour,
    /// Its total length.
    z: f64,
}

/// Population size and children per generation, calibrated to the instance size.
fn population_sizes(n: usize) -> (usize, usize) {
    if n < 100 {
        (1000, 100)
    } else if n < 400 {
        (600, 60)
    } else if n < 750 {
        (120, 40)
    } else {
        // large instances skip the per-child refinement and keep a final share of the
        // budget for one long 2-opt pass on the winner
        (1000, 100)
    }
}

/// A random permutation member; small instances are immediately refined to a local optimum.
fn random_member<R: Rng + ?Sized>(inst: &Instance, rng: &mut R) -> Member {
    let n = inst.num_nodes();
    let mut tour = Tour::random(n, rng);
    let mut z = tour.cost(inst.distances());
    if n < 200 {
        z += twoopt_refinement(inst, &mut tour, &Stopwatch::unlimited());
    }
    Member { tour, z }
}

/// Splice two parents into a child: inherit the first `N/2` successors of parent 1 (starting
/// at node 0), extend along parent 2's successors skipping already-visited nodes, close the
/// partial cycle, and complete it by extra-mileage insertion.
fn crossover(inst: &Instance, p1: &Tour, p2: &Tour) -> Member {
    let n = p1.len();
    let d = inst.distances();
    let split = n / 2;

    let mut visited = vec![false; n];
    let mut chromosome: Vec<NodeId> = Vec::with_capacity(n);
    chromosome.push(0);
    visited[0] = true;
    for i in 1..split {
        let next = p1.succ(chromosome[i - 1]);
        chromosome.push(next);
        visited[next] = true;
    }

    // switch to parent 2 at the first unvisited node past the split point (one always
    // exists: node 0 is visited, so the upper ids cannot all be taken)
    let mut start2 = split;
    while visited[start2] {
        start2 += 1;
    }
    chromosome.push(start2);
    visited[start2] = true;

    // follow parent 2, skipping visited nodes, until too many skips pile up
    let mut skips = 0;
    let mut i = split + 1;
    while i < n && skips < n - split {
        let mut next = p2.succ(chromosome[i - 1]);
        while visited[next] {
            next = p2.succ(next);
            skips += 1;
        }
        chromosome.push(next);
        visited[next] = true;
        i += 1;
    }

    // close the partial cycle and repair it to a full tour
    let visnodes = chromosome.len();
    let mut edges: Vec<(NodeId, NodeId)> = (0..visnodes)
        .map(|x| (chromosome[x], chromosome[(x + 1) % visnodes]))
        .collect();
    let mut z: f64 = edges.iter().map(|&(a, b)| d.dist(a, b)).sum();
    z += insert_by_extra_mileage(d, &mut edges, &mut visited);

    let mut tour =
        Tour::from_edges(n, &edges).expect("crossover repair always yields a single cycle");
    if n < 750 {
        z += twoopt_refinement(inst, &mut tour, &Stopwatch::unlimited());
    }
    Member { tour, z }
}

/// Run the genetic engine: keep a population of `n` tours, breed `k` children per generation
/// from uniformly drawn parent pairs, and keep the best `n` of the enlarged pool. Instances
/// with at least 750 nodes get a final long 2-opt refinement on the winner.
pub fn genetic<R: Rng + ?Sized>(inst: &Instance, rng: &mut R, sw: &Stopwatch) -> Solution {
    let n = inst.num_nodes();
    if n < 8 {
        // the splice is meaningless on tiny tours; one refined pass settles them
        let mut tour = Tour::identity(n);
        let mut z = tour.cost(inst.distances());
        z += twoopt_refinement(inst, &mut tour, sw);
        return Solution::new(Model::Genetic, tour, z);
    }

    let (psize, nchildren) = population_sizes(n);
    let breeding_sw = if n >= 750 { sw.fraction(0.9) } else { *sw };
    let mut tracker = Tracker::new();

    let mut population: Vec<Member> = (0..psize).map(|_| random_member(inst, rng)).collect();
    debug!("population of {psize} created");

    let mut generations = 0;
    loop {
        if breeding_sw.expired() {
            break;
        }
        if breeding_sw.remaining().is_none() && generations >= GENERATIONS_WITHOUT_DEADLINE {
            break;
        }

        // breed children from the current generation only
        let parents = population.len();
        for _ in 0..nchildren {
            let p1 = rng.gen_range(0..parents);
            let mut p2 = rng.gen_range(0..parents);
            while p2 == p1 {
                p2 = rng.gen_range(0..parents);
            }
            let child = crossover(inst, &population[p1].tour, &population[p2].tour);
            trace!("child of {p1} and {p2}: {}", child.z);
            population.push(child);
        }

        // survival of the fittest: keep the best psize members
        population.sort_by_key(|m| NotNan::new(m.z).unwrap());
        population.truncate(psize);
        tracker.add(sw.elapsed_ms(), population[0].z);
        generations += 1;
        debug!("generation {generations}: best {}", population[0].z);
    }

    population.sort_by_key(|m| NotNan::new(m.z).unwrap());
    let mut best = population.swap_remove(0);

    // on very large instances nobody was refined yet: spend the reserved budget now
    if n >= 750 {
        best.z += twoopt_refinement(inst, &mut best.tour, &sw.fraction(0.1));
        tracker.add(sw.elapsed_ms(), best.z);
    }

    let mut sol = Solution::new(Model::Genetic, best.tour, best.z);
    sol.tracker = tracker;
    sol
}
