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

use crate::tracker::Tracker;

#[test]
fn only_strict_improvements_are_recorded() {
    let mut t = Tracker::new();
    t.add(1.0, 100.0);
    t.add(2.0, 90.0);
    t.add(3.0, 90.0); // no improvement
    t.add(4.0, 95.0); // worse
    t.add(5.0, 80.0);
    assert_eq!(t.len(), 3);
    assert_eq!(
        t.iter().collect::<Vec<_>>(),
        vec![(1.0, 100.0), (2.0, 90.0), (5.0, 80.0)]
    );
    assert_eq!(t.last_obj(), Some(80.0));
}

#[test]
fn find_returns_the_earliest_time_reaching_an_objective() {
    let mut t = Tracker::new();
    t.add(10.0, 100.0);
    t.add(20.0, 90.0);
    t.add(40.0, 70.0);
    assert_eq!(t.find(100.0), Some(10.0));
    assert_eq!(t.find(95.0), Some(20.0));
    assert_eq!(t.find(90.0), Some(20.0));
    assert_eq!(t.find(75.0), Some(40.0));
    assert_eq!(t.find(69.0), None);
}

#[test]
fn empty_tracker() {
    let t = Tracker::new();
    assert!(t.is_empty());
    assert_eq!(t.find(1e9), None);
    assert_eq!(t.last_obj(), None);
}
