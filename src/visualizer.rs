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

//! Graphviz rendering of instances and tours.
//!
//! Emits an undirected `graph` document with the sites pinned at their (scaled) coordinates,
//! one overlay per solution, meant for `neato -n`. Instances without display coordinates are
//! rendered without positions and left to the layout engine.

use std::fmt::Write;
use std::fs;
use std::path::Path;

use tspcore::prelude::*;

use crate::solvers::Solution;

/// Side length of the box the coordinates are scaled into.
const BOX_SIZE: f64 = 20.0;

/// Colors of the solution overlays beyond the first.
const OVERLAY_COLORS: [&str; 3] = ["red", "blue", "forestgreen"];

/// Render the instance and any number of solution overlays as a Graphviz document. The first
/// solution is drawn in black, later ones in distinct colors.
pub fn render_dot(inst: &Instance, sols: &[&Solution]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "graph {} {{", inst.name().replace('-', "_"));
    let _ = writeln!(out, "\tnode [shape=circle fillcolor=white]");

    if !inst.nodes().is_empty() {
        let max_coord = inst
            .nodes()
            .iter()
            .flat_map(|n| [n.x.abs(), n.y.abs()])
            .fold(f64::MIN_POSITIVE, f64::max);
        for (i, node) in inst.nodes().iter().enumerate() {
            let x = node.x / max_coord * BOX_SIZE;
            let y = node.y / max_coord * BOX_SIZE;
            let _ = writeln!(out, "\t{i} [ pos = \"{x},{y}!\"]");
        }
    } else {
        for i in 0..inst.num_nodes() {
            let _ = writeln!(out, "\t{i}");
        }
    }
    out.push('\n');

    for (k, sol) in sols.iter().enumerate() {
        for (i, j) in sol.tour.edges() {
            let _ = write!(out, "\t{i} -- {j}");
            if k > 0 {
                let color = OVERLAY_COLORS[(k - 1) % OVERLAY_COLORS.len()];
                let _ = write!(out, " [color = {color}]");
            }
            out.push('\n');
        }
    }
    out.push_str("}\n");
    out
}

/// Write the Graphviz rendering to a file.
pub fn write_dot(path: &Path, inst: &Instance, sols: &[&Solution]) -> Result<(), TspError> {
    fs::write(path, render_dot(inst, sols))?;
    Ok(())
}
