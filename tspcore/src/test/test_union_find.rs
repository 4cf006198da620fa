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

use crate::union_find::UnionFind;

#[test]
fn discrete_partition() {
    let mut uf = UnionFind::new(5);
    assert_eq!(uf.num_sets(), 5);
    for i in 0..5 {
        assert_eq!(uf.find(i), i);
        assert_eq!(uf.set_size(i), 1);
        assert_eq!(uf.set_members(i), vec![i]);
    }
}

#[test]
fn union_merges_sizes_and_count() {
    let mut uf = UnionFind::new(6);
    uf.union_set(0, 1);
    uf.union_set(2, 3);
    assert_eq!(uf.num_sets(), 4);
    assert!(uf.same_set(0, 1));
    assert!(!uf.same_set(1, 2));
    assert_eq!(uf.set_size(0), 2);

    uf.union_set(1, 3);
    assert_eq!(uf.num_sets(), 3);
    assert!(uf.same_set(0, 2));
    assert_eq!(uf.set_size(3), 4);

    // joining twice changes nothing
    uf.union_set(0, 2);
    assert_eq!(uf.num_sets(), 3);
    assert_eq!(uf.set_size(3), 4);
}

#[test]
fn next_cycle_enumerates_each_set() {
    let mut uf = UnionFind::new(8);
    uf.union_set(0, 4);
    uf.union_set(4, 2);
    uf.union_set(6, 7);

    let mut members = uf.set_members(2);
    members.sort_unstable();
    assert_eq!(members, vec![0, 2, 4]);

    let mut members = uf.set_members(7);
    members.sort_unstable();
    assert_eq!(members, vec![6, 7]);

    assert_eq!(uf.set_members(5), vec![5]);
}

#[test]
fn next_cycle_survives_random_union_sequences() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        let n = 32;
        let mut uf = UnionFind::new(n);
        for _ in 0..40 {
            uf.union_set(rng.gen_range(0..n), rng.gen_range(0..n));
        }
        // every element enumerates its own set: correct size, no duplicates,
        // and all members agree on the representative
        for i in 0..n {
            let members = uf.set_members(i);
            assert_eq!(members.len(), uf.set_size(i));
            let root = uf.find(i);
            let mut sorted = members.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), members.len());
            assert!(members.iter().all(|&m| uf.find(m) == root));
        }
    }
}
