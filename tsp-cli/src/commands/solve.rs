#[cfg(test)]
#[path = "../../tests/unit/commands/solve_test.rs"]
mod solve_test;

use super::*;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tsp_cli::extensions::import::import_matrix;
use tsp_cli::extensions::solve::config::*;
use tsp_cli::extensions::solve::formats::write_solution_json;
use tsp_core::prelude::*;
use tsp_scientific::tsplib::TsplibTour;

const FORMAT_ARG_NAME: &str = "FORMAT";
const PROBLEM_ARG_NAME: &str = "PROBLEM";
const SYMMETRIC_ARG_NAME: &str = "symmetric";
const LAZY_ARG_NAME: &str = "lazy";
const HEURISTIC_WARMSTART_ARG_NAME: &str = "heuristic-warmstart";
const NO_CLUSTERING_ARG_NAME: &str = "no-clustering";
const TIME_LIMIT_ARG_NAME: &str = "time-limit";
const POOL_SIZE_ARG_NAME: &str = "pool-size";
const CONFIG_ARG_NAME: &str = "config";
const LOG_ARG_NAME: &str = "log";
const OUT_RESULT_ARG_NAME: &str = "out-result";
const OUT_TOUR_ARG_NAME: &str = "out-tour";

fn get_formats() -> Vec<&'static str> {
    if cfg!(feature = "csv-format") { vec!["tsplib", "csv"] } else { vec!["tsplib"] }
}

pub fn get_solve_app() -> Command {
    Command::new("solve")
        .about("Solves Travelling Salesman Problem exactly")
        .arg(
            Arg::new(FORMAT_ARG_NAME)
                .help("Specifies the problem type")
                .required(true)
                .value_parser(get_formats())
                .index(1),
        )
        .arg(Arg::new(PROBLEM_ARG_NAME).help("Sets the problem file to use").required(true).index(2))
        .arg(
            Arg::new(SYMMETRIC_ARG_NAME)
                .help("Forces symmetric or directed formulation, detected from the cost matrix if not set")
                .long(SYMMETRIC_ARG_NAME)
                .required(false)
                .value_parser(value_parser!(bool)),
        )
        .arg(
            Arg::new(LAZY_ARG_NAME)
                .help("Eliminates subtours with lazy constraints inside optimizer's search")
                .long(LAZY_ARG_NAME)
                .required(false)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(HEURISTIC_WARMSTART_ARG_NAME)
                .help("Seeds optimizer with a heuristic tour")
                .long(HEURISTIC_WARMSTART_ARG_NAME)
                .required(false)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(NO_CLUSTERING_ARG_NAME)
                .help("Disables clustering warm start")
                .long(NO_CLUSTERING_ARG_NAME)
                .required(false)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(TIME_LIMIT_ARG_NAME)
                .help("Specifies time limit in seconds for a single optimizer call")
                .short('t')
                .long(TIME_LIMIT_ARG_NAME)
                .required(false)
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new(POOL_SIZE_ARG_NAME)
                .help("Specifies amount of equally good solutions analyzed per optimizer call")
                .long(POOL_SIZE_ARG_NAME)
                .required(false)
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("Specifies path to solver configuration file")
                .short('c')
                .long(CONFIG_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(LOG_ARG_NAME)
                .help("Specifies whether default logging is enabled")
                .long(LOG_ARG_NAME)
                .required(false)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to file for result output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(OUT_TOUR_ARG_NAME)
                .help("Specifies path to file for tour output in tsplib format")
                .long(OUT_TOUR_ARG_NAME)
                .required(false),
        )
}

/// Runs solver commands.
pub fn run_solve(
    matches: &ArgMatches,
    out_writer_func: fn(Option<File>) -> BufWriter<Box<dyn Write>>,
) -> Result<(), GenericError> {
    // required
    let problem_path = matches.get_one::<String>(PROBLEM_ARG_NAME).ok_or("problem path is not specified")?;
    let problem_format = matches.get_one::<String>(FORMAT_ARG_NAME).ok_or("problem format is not specified")?;
    let problem_file = open_file(problem_path, "problem")?;

    let default_name = Path::new(problem_path).file_stem().and_then(|stem| stem.to_str()).unwrap_or("problem");
    let (name, matrix) = import_matrix(problem_format, BufReader::new(problem_file), default_name)
        .map_err(|err| format!("cannot read {problem_format} problem from '{problem_path}': '{err}'"))?;

    let builder = Builder::new(matrix)
        .with_optimizer(Arc::new(BranchAndBoundOptimizer::default()))
        .with_telemetry(TelemetryMode::OnlyMetrics);

    let builder = match matches.get_one::<String>(CONFIG_ARG_NAME) {
        Some(path) => create_builder_from_config_file(builder, BufReader::new(open_file(path, "config")?))
            .map_err(|err| format!("cannot read config: '{err}'"))?,
        None => builder,
    };

    let builder = configure_from_args(builder, matches);

    let (solution, metrics) = builder
        .build()
        .and_then(|solver| solver.solve())
        .map_err(|err| format!("cannot find solution: '{err}'"))?;

    if let Some(path) = matches.get_one::<String>(OUT_TOUR_ARG_NAME) {
        let writer = BufWriter::new(create_file(path, "out tour")?);
        (&solution, name.as_str()).write_tsplib(writer)?;
    }

    let out_result =
        matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result")).transpose()?;

    write_solution_json(out_writer_func(out_result), &solution, metrics)
}

/// Applies command line arguments on top of configuration file settings.
fn configure_from_args(builder: Builder, matches: &ArgMatches) -> Builder {
    let mut builder = builder;

    if matches.get_flag(LOG_ARG_NAME) {
        builder = builder.with_telemetry(TelemetryMode::All { logger: get_default_logger() });
    }

    if let Some(is_symmetric) = matches.get_one::<bool>(SYMMETRIC_ARG_NAME) {
        builder = builder.with_symmetric(Some(*is_symmetric));
    }

    if matches.get_flag(LAZY_ARG_NAME) {
        builder = builder.with_lazy_constraints(true);
    }

    if matches.get_flag(HEURISTIC_WARMSTART_ARG_NAME) {
        builder = builder.with_heuristic_warmstart(true);
    }

    if matches.get_flag(NO_CLUSTERING_ARG_NAME) {
        builder = builder.with_clustering(ClusteringConfig { is_enabled: false, ..ClusteringConfig::default() });
    }

    if let Some(time_limit) = matches.get_one::<f64>(TIME_LIMIT_ARG_NAME) {
        builder = builder.with_time_limit(Some(*time_limit));
    }

    if let Some(pool_size) = matches.get_one::<usize>(POOL_SIZE_ARG_NAME) {
        builder = builder.with_solution_pool_size(*pool_size);
    }

    builder
}
