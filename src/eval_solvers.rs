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

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;

use tspcore::instance::CostKind;
use tspcore::tsplib;

use magellan::experiment::{generate_battery, run_suite, save_results_csv};
use magellan::solvers::{Model, RunParams};

/// Evaluate the solver portfolio on reproducible instance sets.
#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a set of random instances and store them as `.tsp` files.
    Prepare {
        /// How many instances to generate.
        count: usize,
        /// Directory to store the generated files in.
        outdir: PathBuf,
        /// Number of sites per instance.
        #[clap(short, long, default_value = "100")]
        nodes: usize,
        /// Group the sites in clusters instead of placing them uniformly.
        #[clap(short, long)]
        clustered: bool,
        /// Seed of the generator.
        #[clap(short, long, default_value = "0")]
        seed: u64,
    },

    /// Run a model suite over previously prepared instances and store the CSV aggregation.
    Run {
        /// Directory containing the `.tsp` files (as written by `prepare`).
        dir: PathBuf,
        /// Output file for the generated CSV.
        output: PathBuf,
        /// The models to compare.
        #[clap(short, long, value_delimiter = ',', default_value = "greedy,grasp,vns,tabu")]
        models: Vec<Model>,
        /// Wall-clock budget per run, in seconds.
        #[clap(short, long, default_value = "10")]
        time_limit: f64,
        /// Seed for every randomized decision.
        #[clap(short, long)]
        seed: Option<u64>,
        /// Number of parallel workers (instances run independently).
        #[clap(short = 'T', long)]
        threads: Option<usize>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_timed();
    let cli = Cli::parse();

    match cli.command {
        Command::Prepare {
            count,
            outdir,
            nodes,
            clustered,
            seed,
        } => prepare(count, outdir, nodes, clustered, seed),
        Command::Run {
            dir,
            output,
            models,
            time_limit,
            seed,
            threads,
        } => run(dir, output, models, time_limit, seed, threads),
    }
}

/// Generate the instance files of a battery.
fn prepare(
    count: usize,
    outdir: PathBuf,
    nodes: usize,
    clustered: bool,
    seed: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    use rand::prelude::*;
    fs::create_dir_all(&outdir)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let instances = generate_battery(count, nodes, 1000.0, clustered, &mut rng)?;
    for inst in &instances {
        let path = outdir.join(format!("{}.tsp", inst.name()));
        tsplib::write_instance(&path, inst)?;
        info!("wrote {}", path.display());
    }
    println!("prepared {count} instances in {}", outdir.display());
    Ok(())
}

/// Compare the models on every instance of the directory.
fn run(
    dir: PathBuf,
    output: PathBuf,
    models: Vec<Model>,
    time_limit: f64,
    seed: Option<u64>,
    threads: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().map(|x| x == "tsp").unwrap_or(false))
        .collect();
    paths.sort();
    if paths.is_empty() {
        return Err(format!("no .tsp files found in {}", dir.display()).into());
    }

    let instances = paths
        .iter()
        .map(|p| tsplib::parse_instance(p, CostKind::Real))
        .collect::<Result<Vec<_>, _>>()?;
    info!("parsed {} instances", instances.len());

    let params = RunParams {
        time_limit,
        seed,
        threads: threads.unwrap_or_else(num_cpus::get),
        memory_mb: 4096,
    };
    let rows = run_suite(&instances, &models, &params)?;
    save_results_csv(&output, &rows)?;
    println!("results saved to {}", output.display());
    Ok(())
}
