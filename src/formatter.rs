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

//! Human-readable rendering of tours and solutions, in the 1-indexed convention of the input
//! format.

use std::fmt::Write;

use tspcore::prelude::*;

use crate::solvers::Solution;

/// Render solver artifacts with the instance as naming context.
pub trait InstanceFormatter {
    /// A human-readable, 1-indexed rendering.
    fn fmt(&self, inst: &Instance) -> String;
}

impl InstanceFormatter for Tour {
    fn fmt(&self, _inst: &Instance) -> String {
        let mut out = String::new();
        for (i, j) in self.edges() {
            let _ = writeln!(out, "x({}, {}) = 1", i + 1, j + 1);
        }
        out
    }
}

impl InstanceFormatter for Solution {
    fn fmt(&self, inst: &Instance) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "--- solution of {} ---", inst.name());
        let _ = writeln!(out, "model: {}", self.model);
        let _ = writeln!(out, "objective: {:.6}", self.zstar);
        let _ = writeln!(out, "distance time: {:.0} ms", self.distance_time_ms);
        let _ = writeln!(out, "solve time: {:.0} ms", self.solve_time_ms);
        if !self.tracker.is_empty() {
            let _ = writeln!(out, "improvements:");
            for (time_ms, obj) in self.tracker.iter() {
                let _ = writeln!(out, "\t{time_ms:10.1} ms  {obj:.6}");
            }
        }
        out.push_str(&self.tour.fmt(inst));
        out.push_str("--- ---\n");
        out
    }
}
