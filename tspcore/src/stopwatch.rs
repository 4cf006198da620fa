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

//! The cooperative time budget passed to every long-running primitive.
//!
//! There is no preemption anywhere in the solvers: pickers and outer loops check the stopwatch
//! at their suspension points and return the best result found so far when the budget is spent.
//! The stopwatch is a plain value carried through the call chain; it is never global state.

use std::time::{Duration, Instant};

/// A started clock together with an optional deadline.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
    deadline: Option<Instant>,
}

impl Stopwatch {
    /// Start a stopwatch with a budget of `seconds`. A non-finite or non-positive budget means
    /// no deadline at all.
    pub fn with_budget(seconds: f64) -> Self {
        let start = Instant::now();
        let deadline = (seconds.is_finite() && seconds > 0.0)
            .then(|| start + Duration::from_secs_f64(seconds));
        Self { start, deadline }
    }

    /// Start a stopwatch without a deadline.
    pub fn unlimited() -> Self {
        Self {
            start: Instant::now(),
            deadline: None,
        }
    }

    /// Start a fresh stopwatch whose budget is a fraction of this one's *total* budget. Used to
    /// reserve a final share of the run time (e.g. one last refinement pass).
    pub fn fraction(&self, frac: f64) -> Self {
        match self.deadline {
            Some(d) => Self::with_budget(d.duration_since(self.start).as_secs_f64() * frac),
            None => Self::unlimited(),
        }
    }

    /// Whether the deadline has passed.
    pub fn expired(&self) -> bool {
        self.deadline.map(|d| Instant::now() >= d).unwrap_or(false)
    }

    /// Milliseconds elapsed since the stopwatch was started.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// The remaining budget, or `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::unlimited()
    }
}
