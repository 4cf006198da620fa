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

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use tspcore::instance::CostKind;
use tspcore::tsplib;

use magellan::experiment::{generate_battery, run_suite, save_results_csv};
use magellan::formatter::InstanceFormatter;
use magellan::solvers::{solve, Model, RunParams};
use magellan::visualizer;

/// Number of sites of the generated battery instances.
const BATTERY_NUM_NODES: usize = 50;

/// Coordinate range of the generated battery instances.
const BATTERY_MAX_COORD: f64 = 20.0;

/// Per-run budget used in a battery when no time limit is given.
const BATTERY_FALLBACK_BUDGET: f64 = 5.0;

/// Solve TSPLIB instances with a portfolio of heuristic and exact models.
#[derive(Debug, Parser)]
struct Cli {
    /// Instance to solve: a path to a `.tsp` file, or a name resolved as
    /// `data/<name>/<name>.tsp`. Without it, a battery of random instances is run.
    #[clap(long = "model-name", short = 'm')]
    model_name: Option<String>,
    /// The model to run on the instance.
    #[clap(long, short = 's', default_value = "vns")]
    solver: Model,
    /// Wall-clock budget in seconds.
    #[clap(long = "time-limit", short = 't')]
    time_limit: Option<f64>,
    /// Seed for every randomized decision (including the external solver's).
    #[clap(long)]
    seed: Option<u64>,
    /// Maximum number of threads for the external solver and battery runs.
    #[clap(long, short = 'T')]
    threads: Option<usize>,
    /// Memory budget in MB granted to the external solver.
    #[clap(long, short = 'M', default_value = "4096")]
    memory: usize,
    /// Round distances to integers following the metric's convention.
    #[clap(long = "integer-costs", short = 'i')]
    integer_costs: bool,
    /// Display more information.
    #[clap(short, long)]
    verbose: bool,
    /// Generate and solve this many random instances with the whole model suite.
    #[clap(long = "battery-test", short = 'b')]
    battery_test: Option<usize>,
    /// Write a Graphviz rendering of the solution next to the input file.
    #[clap(long, short = 'p')]
    plot: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    if args.verbose && std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "debug");
    }
    pretty_env_logger::init_timed();

    let params = RunParams {
        time_limit: args.time_limit.unwrap_or(f64::INFINITY),
        seed: args.seed,
        threads: args.threads.unwrap_or_else(num_cpus::get),
        memory_mb: args.memory,
    };
    let cost = if args.integer_costs {
        CostKind::Integer
    } else {
        CostKind::Real
    };

    match &args.model_name {
        Some(name) => run_single(name, &args, params, cost),
        None => run_battery(&args, params),
    }
}

/// Resolve the instance argument: an existing path wins, otherwise the name is looked up in
/// the `data/` tree.
fn resolve_input(name: &str) -> PathBuf {
    let direct = PathBuf::from(name);
    if direct.exists() {
        direct
    } else {
        PathBuf::from(format!("data/{name}/{name}.tsp"))
    }
}

/// Parse and solve a single instance, report the solution, and write the companion files.
fn run_single(
    name: &str,
    args: &Cli,
    params: RunParams,
    cost: CostKind,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = resolve_input(name);
    let inst = tsplib::parse_instance(&path, cost)?;
    info!("parsed {}", inst);

    let sol = solve(&inst, args.solver, &params)?;
    print!("{}", sol.fmt(&inst));

    // keep the tour on disk, next to the input
    let tour_path = path.with_extension(format!("{}.tour", sol.model));
    tsplib::write_tour(&tour_path, inst.name(), &sol.tour)?;

    // report the gap whenever the optimal tour ships with the instance
    let opt_path = path.with_extension("opt.tour");
    if opt_path.exists() {
        let opt = tsplib::parse_tour(&opt_path, inst.num_nodes())?;
        let zopt = opt.cost(inst.distances());
        println!(
            "optimal tour known: {:.6} (gap {:.3}%)",
            zopt,
            100.0 * sol.gap(zopt)
        );
    }

    if args.plot {
        let dot_path = path.with_extension(format!("{}.dot", sol.model));
        visualizer::write_dot(&dot_path, &inst, &[&sol])?;
        info!("graphviz rendering written to {}", dot_path.display());
    }
    Ok(())
}

/// Generate a battery of random instances and compare the heuristic suite on them.
fn run_battery(args: &Cli, mut params: RunParams) -> Result<(), Box<dyn std::error::Error>> {
    let count = args.battery_test.unwrap_or(1).max(1);
    if !params.time_limit.is_finite() {
        warn!("battery without a time limit, falling back to {BATTERY_FALLBACK_BUDGET}s per run");
        params.time_limit = BATTERY_FALLBACK_BUDGET;
    }

    let mut rng = params.rng();
    println!("generating {count} instances of {BATTERY_NUM_NODES} nodes");
    let instances = generate_battery(count, BATTERY_NUM_NODES, BATTERY_MAX_COORD, false, &mut rng)?;

    let models = [
        Model::Greedy,
        Model::Grasp,
        Model::ExtraMileage,
        Model::SpanningTree,
        Model::TwoOpt,
        Model::Vns,
        Model::Tabu,
        Model::Genetic,
    ];
    let rows = run_suite(&instances, &models, &params)?;

    for row in &rows {
        println!("{}:", row.instance);
        for run in &row.runs {
            println!(
                "\t{:>14}: {:>12.4} in {:>8.1} ms",
                run.model.to_string(),
                run.zstar,
                run.solve_time_ms
            );
        }
    }

    let out = PathBuf::from("results.csv");
    save_results_csv(&out, &rows)?;
    println!("results saved to {}", out.display());
    Ok(())
}
