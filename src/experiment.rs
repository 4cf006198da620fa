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

//! Random instance batteries and aggregation of comparative runs.
//!
//! A battery is a set of generated instances on which a suite of models is compared. The
//! instances of a battery are independent, so the suite runs them in parallel; the distance
//! matrix of each instance is built once and shared read-only, while tours, heaps, and
//! trackers stay private to their run.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::info;
use rand::prelude::*;
use rayon::prelude::*;

use tspcore::prelude::*;

use crate::solvers::{solve, Model, RunParams, SolverError};

/// The outcome of one model on one instance.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModelRun {
    /// The model.
    pub model: Model,
    /// The objective it reached.
    pub zstar: f64,
    /// Its wall-clock time in milliseconds.
    pub solve_time_ms: f64,
}

/// All model outcomes on one instance of the battery.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BatteryRow {
    /// Name of the instance.
    pub instance: String,
    /// One entry per model of the suite, in suite order.
    pub runs: Vec<ModelRun>,
}

/// Generate `count` random instances of `num_nodes` sites each. Uniform placement by default;
/// `clustered` groups the sites around a handful of centers instead.
pub fn generate_battery<R: Rng + ?Sized>(
    count: usize,
    num_nodes: usize,
    max_coord: f64,
    clustered: bool,
    rng: &mut R,
) -> Result<Vec<Instance>, TspError> {
    (0..count)
        .map(|i| {
            if clustered {
                Instance::random_clustered(
                    format!("clust{num_nodes}-{i}"),
                    num_nodes,
                    (num_nodes / 50).max(2),
                    max_coord,
                    max_coord / 20.0,
                    rng,
                )
            } else {
                Instance::random_uniform(format!("rand{num_nodes}-{i}"), num_nodes, max_coord, rng)
            }
        })
        .collect()
}

/// Run every model of the suite on every instance. Instances are processed in parallel on a
/// pool of `params.threads` workers; the models of one instance run sequentially so their
/// timings stay comparable.
pub fn run_suite(
    instances: &[Instance],
    models: &[Model],
    params: &RunParams,
) -> Result<Vec<BatteryRow>, SolverError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.threads)
        .build()
        .map_err(|e| SolverError::Resolution(e.to_string()))?;

    pool.install(|| {
        instances
            .par_iter()
            .map(|inst| {
                let runs = models
                    .iter()
                    .map(|&model| {
                        let sol = solve(inst, model, params)?;
                        info!("{}: {} -> {:.2}", inst.name(), model, sol.zstar);
                        Ok(ModelRun {
                            model,
                            zstar: sol.zstar,
                            solve_time_ms: sol.solve_time_ms,
                        })
                    })
                    .collect::<Result<Vec<_>, SolverError>>()?;
                Ok(BatteryRow {
                    instance: inst.name().to_string(),
                    runs,
                })
            })
            .collect()
    })
}

/// Aggregate the battery into a CSV table: one line per instance, two columns (objective and
/// time) per model.
pub fn render_results_csv(rows: &[BatteryRow]) -> String {
    let mut out = String::new();
    if let Some(first) = rows.first() {
        out.push_str("instance");
        for run in &first.runs {
            let _ = write!(out, ",{} z,{} ms", run.model, run.model);
        }
        out.push('\n');
    }
    for row in rows {
        out.push_str(&row.instance);
        for run in &row.runs {
            let _ = write!(out, ",{:.6},{:.1}", run.zstar, run.solve_time_ms);
        }
        out.push('\n');
    }
    out
}

/// Write the CSV aggregation to a file.
pub fn save_results_csv(path: &Path, rows: &[BatteryRow]) -> Result<(), TspError> {
    fs::write(path, render_results_csv(rows))?;
    Ok(())
}

/// Export the battery results to a JSON file, including all metadata.
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub fn write_json(path: &Path, rows: &[BatteryRow]) -> Result<(), TspError> {
    let text = serde_json::to_string_pretty(rows)
        .map_err(|e| TspError::InvalidInput(e.to_string()))?;
    fs::write(path, text)?;
    Ok(())
}
