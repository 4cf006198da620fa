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

//! The lower-triangular distance matrix and the metric functions filling it.
//!
//! Distances are computed once per instance and answered in O(1) afterwards. None of the
//! algorithms built on top assume the triangle inequality; the matrix is only required to be
//! symmetric and non-negative with a zero diagonal.

use crate::instance::{CostKind, Node, WeightKind};
use crate::types::NodeId;

/// Earth radius of the TSPLIB geographical metric, in kilometers.
const GEO_RRR: f64 = 6378.388;

/// A symmetric distance matrix, stored as its lower triangle (diagonal included).
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    /// Row `i` holds the distances to all `j <= i`.
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Compute the matrix for a coordinate-based metric.
    pub(crate) fn compute(nodes: &[Node], weight: WeightKind, cost: CostKind) -> Self {
        let rows = nodes
            .iter()
            .enumerate()
            .map(|(i, a)| {
                (0..=i)
                    .map(|j| {
                        if i == j {
                            0.0
                        } else {
                            match weight {
                                WeightKind::Euc2d => euc_2d(a, &nodes[j], cost),
                                WeightKind::Att => att(a, &nodes[j], cost),
                                WeightKind::Geo => geo(a, &nodes[j], cost),
                                // the explicit matrix never goes through `compute`
                                WeightKind::Explicit => 0.0,
                            }
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Wrap the rows of an explicit `LOWER_DIAG_ROW` weight section.
    pub(crate) fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Number of nodes covered by the matrix.
    pub fn num_nodes(&self) -> usize {
        self.rows.len()
    }

    /// The distance between `i` and `j`. The single public accessor; O(1).
    #[inline]
    pub fn dist(&self, i: NodeId, j: NodeId) -> f64 {
        if i >= j {
            self.rows[i][j]
        } else {
            self.rows[j][i]
        }
    }
}

/// Euclidean distance; the integer variant rounds to the nearest integer.
fn euc_2d(a: &Node, b: &Node, cost: CostKind) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let d = (dx * dx + dy * dy).sqrt();
    match cost {
        CostKind::Real => d,
        CostKind::Integer => (d + 0.5).floor(),
    }
}

/// Pseudo-Euclidean distance of the `ATT` instances: scaled by sqrt(10), rounded *up* to the
/// next integer whenever plain rounding falls short.
fn att(a: &Node, b: &Node, cost: CostKind) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let r = ((dx * dx + dy * dy) / 10.0).sqrt();
    match cost {
        CostKind::Real => r,
        CostKind::Integer => {
            let t = (r + 0.5).floor();
            if t < r {
                t + 1.0
            } else {
                t
            }
        }
    }
}

/// Convert a TSPLIB `DDD.MM` coordinate (degrees and minutes) to radians.
fn geo_radians(coord: f64) -> f64 {
    let deg = coord.trunc();
    let min = coord - deg;
    std::f64::consts::PI * (deg + 5.0 * min / 3.0) / 180.0
}

/// Great-circle distance on the idealized sphere of the `GEO` instances. The x coordinate is
/// the latitude, y the longitude.
fn geo(a: &Node, b: &Node, cost: CostKind) -> f64 {
    let lat_a = geo_radians(a.x);
    let lon_a = geo_radians(a.y);
    let lat_b = geo_radians(b.x);
    let lon_b = geo_radians(b.y);

    let q1 = (lon_a - lon_b).cos();
    let q2 = (lat_a - lat_b).cos();
    let q3 = (lat_a + lat_b).cos();
    let d = GEO_RRR * (0.5 * ((1.0 + q1) * q2 - (1.0 - q1) * q3)).acos();

    match cost {
        CostKind::Real => d,
        CostKind::Integer => (d + 1.0).trunc(),
    }
}
