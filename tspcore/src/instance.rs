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

//! The problem instance: a set of planar sites, a metric, and the distance oracle.

use std::fmt;
use std::sync::OnceLock;

use log::debug;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};

use crate::distance::DistanceMatrix;
use crate::types::{NodeId, TspError};

/// A planar point with a stable index given by its position in [`Instance::nodes`]. Immutable
/// after load.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// The x coordinate (the latitude for geographical instances).
    pub x: f64,
    /// The y coordinate (the longitude for geographical instances).
    pub y: f64,
}

/// The `EDGE_WEIGHT_TYPE` of the instance, fixed once per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeightKind {
    /// Plain Euclidean distance in the plane.
    Euc2d,
    /// Pseudo-Euclidean distance (scaled, rounded up) of the classic `att` instances.
    Att,
    /// Great-circle distance with coordinates given as degrees and minutes.
    Geo,
    /// The distances are given verbatim as a lower-triangular matrix.
    Explicit,
}

impl fmt::Display for WeightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Euc2d => write!(f, "EUC_2D"),
            Self::Att => write!(f, "ATT"),
            Self::Geo => write!(f, "GEO"),
            Self::Explicit => write!(f, "EXPLICIT"),
        }
    }
}

/// Whether computed distances are kept as real numbers or rounded to integers following the
/// convention of the selected [`WeightKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostKind {
    /// Keep distances as real numbers.
    #[default]
    Real,
    /// Round distances to integers.
    Integer,
}

/// A problem instance. Owns the sites and the metric, and materializes the distance matrix
/// lazily, exactly once; the matrix is then shared (read-only) by all runs on this instance.
#[derive(Debug)]
pub struct Instance {
    /// Name of the instance (the TSPLIB `NAME`, or a generated one).
    name: String,
    /// The TSPLIB `COMMENT`, if any.
    comment: Option<String>,
    /// The sites, indexed by [`NodeId`]. Empty for explicit instances without display data.
    nodes: Vec<Node>,
    /// The metric.
    weight: WeightKind,
    /// Real or rounded-integer costs.
    cost: CostKind,
    /// The number of nodes (kept separately: explicit instances may have no coordinates).
    num_nodes: usize,
    /// Verbatim weight rows for explicit instances.
    explicit_rows: Option<Vec<Vec<f64>>>,
    /// The lazily computed distance matrix.
    matrix: OnceLock<DistanceMatrix>,
}

impl Instance {
    /// Create an instance from node coordinates. Fails with
    /// [`TspError::IllegalMetric`] if the metric is [`WeightKind::Explicit`] (which carries no
    /// coordinates; use [`Instance::explicit`]) or if no nodes are given.
    pub fn new(
        name: impl Into<String>,
        nodes: Vec<Node>,
        weight: WeightKind,
        cost: CostKind,
    ) -> Result<Self, TspError> {
        if weight == WeightKind::Explicit {
            return Err(TspError::IllegalMetric(weight.to_string()));
        }
        if nodes.is_empty() {
            return Err(TspError::InvalidInput("instance without nodes".to_string()));
        }
        let num_nodes = nodes.len();
        Ok(Self {
            name: name.into(),
            comment: None,
            nodes,
            weight,
            cost,
            num_nodes,
            explicit_rows: None,
            matrix: OnceLock::new(),
        })
    }

    /// Create an instance from an explicit lower-triangular weight matrix (diagonal included),
    /// with optional display coordinates. Fails if the rows do not form a lower triangle.
    pub fn explicit(
        name: impl Into<String>,
        rows: Vec<Vec<f64>>,
        display: Option<Vec<Node>>,
    ) -> Result<Self, TspError> {
        let n = rows.len();
        if n == 0 || rows.iter().enumerate().any(|(i, r)| r.len() != i + 1) {
            return Err(TspError::IllegalMetric(WeightKind::Explicit.to_string()));
        }
        if display.as_ref().map(|d| d.len() != n).unwrap_or(false) {
            return Err(TspError::InvalidInput(
                "display data does not match the dimension".to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            comment: None,
            nodes: display.unwrap_or_default(),
            weight: WeightKind::Explicit,
            cost: CostKind::Real,
            num_nodes: n,
            explicit_rows: Some(rows),
            matrix: OnceLock::new(),
        })
    }

    /// Attach the TSPLIB comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }

    /// The name of the instance.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The TSPLIB comment, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// The number of nodes N.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// The sites. May be empty for explicit instances without display data.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The metric of the instance.
    pub fn weight_kind(&self) -> WeightKind {
        self.weight
    }

    /// Whether costs are real or rounded.
    pub fn cost_kind(&self) -> CostKind {
        self.cost
    }

    /// The distance oracle. The matrix is built on the first call and reused afterwards.
    pub fn distances(&self) -> &DistanceMatrix {
        self.matrix.get_or_init(|| {
            debug!("materializing the distance matrix of {}", self.name);
            match &self.explicit_rows {
                Some(rows) => DistanceMatrix::from_rows(rows.clone()),
                None => DistanceMatrix::compute(&self.nodes, self.weight, self.cost),
            }
        })
    }

    /// The distance between nodes `i` and `j`; O(1) after the first call.
    #[inline]
    pub fn dist(&self, i: NodeId, j: NodeId) -> f64 {
        self.distances().dist(i, j)
    }

    /// Generate an instance with `n` sites placed uniformly at random in the square
    /// `[0, max_coord]²`, under the real Euclidean metric.
    pub fn random_uniform<R: Rng + ?Sized>(
        name: impl Into<String>,
        n: usize,
        max_coord: f64,
        rng: &mut R,
    ) -> Result<Self, TspError> {
        let nodes = (0..n)
            .map(|_| Node {
                x: rng.gen::<f64>() * max_coord,
                y: rng.gen::<f64>() * max_coord,
            })
            .collect();
        Self::new(name, nodes, WeightKind::Euc2d, CostKind::Real)
    }

    /// Generate an instance with `n` sites grouped around `num_clusters` uniformly placed
    /// centers, normally distributed with the given standard deviation.
    pub fn random_clustered<R: Rng + ?Sized>(
        name: impl Into<String>,
        n: usize,
        num_clusters: usize,
        max_coord: f64,
        std_dev: f64,
        rng: &mut R,
    ) -> Result<Self, TspError> {
        let num_clusters = num_clusters.max(1);
        let centers: Vec<Node> = (0..num_clusters)
            .map(|_| Node {
                x: rng.gen::<f64>() * max_coord,
                y: rng.gen::<f64>() * max_coord,
            })
            .collect();
        let spread = Normal::new(0.0, std_dev)
            .map_err(|e| TspError::InvalidInput(format!("bad cluster deviation: {e}")))?;
        let nodes = (0..n)
            .map(|i| {
                let c = centers[i % num_clusters];
                Node {
                    x: c.x + spread.sample(rng),
                    y: c.y + spread.sample(rng),
                }
            })
            .collect();
        Self::new(name, nodes, WeightKind::Euc2d, CostKind::Real)
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} nodes, {}{})",
            self.name,
            self.num_nodes,
            self.weight,
            match self.cost {
                CostKind::Real => "",
                CostKind::Integer => ", integer costs",
            }
        )
    }
}
