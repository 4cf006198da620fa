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

//! The time-stamped incumbent trajectory recorded by every run.

use ordered_float::NotNan;

use crate::types::EPSILON;

/// A growing series of `(time_ms, objective)` pairs, one per strict incumbent improvement.
/// Within a single run the recorded objectives are strictly decreasing.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tracker {
    /// Milliseconds since the start of the run.
    times: Vec<f64>,
    /// The incumbent objective at that time.
    objs: Vec<NotNan<f64>>,
}

impl Tracker {
    /// Create an empty trajectory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an incumbent. The pair is appended only if `obj` strictly improves on the last
    /// recorded objective.
    pub fn add(&mut self, time_ms: f64, obj: f64) {
        let obj = NotNan::new(obj).unwrap();
        if self.objs.last().map(|last| obj < *last).unwrap_or(true) {
            self.times.push(time_ms);
            self.objs.push(obj);
        }
    }

    /// The earliest time at which the incumbent reached `obj` (within tolerance), if it ever
    /// did.
    pub fn find(&self, obj: f64) -> Option<f64> {
        self.objs
            .iter()
            .position(|o| o.into_inner() <= obj + EPSILON)
            .map(|i| self.times[i])
    }

    /// The number of recorded improvements.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The last recorded objective.
    pub fn last_obj(&self) -> Option<f64> {
        self.objs.last().map(|o| o.into_inner())
    }

    /// Iterate over the recorded `(time_ms, objective)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times
            .iter()
            .zip(self.objs.iter())
            .map(|(&t, &o)| (t, o.into_inner()))
    }
}
