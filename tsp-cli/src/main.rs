//! A command line interface to *Travelling Salesman Problem* exact solver.
//!
//! ## Usage
//!
//! - solve a problem from TSPLIB95 set using lazy constraints and writing the tour in tsplib format
//!
//!     `tsp-cli solve tsplib att48.tsp --lazy --out-tour att48.tour`
//!
//! - solve a problem given by csv cost matrix with time limit and logging
//!
//!     `tsp-cli solve csv matrix.csv --time-limit 60 --log`
//!
//! For more details, simply run
//!
//!     tsp-cli --help

mod commands;

use clap::Command;
use commands::solve::{get_solve_app, run_solve};
use commands::create_write_buffer;
use std::process;

fn main() {
    let matches = Command::new("Travelling Salesman Problem Solver")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A command line interface to exact Travelling Salesman Problem solver")
        .subcommand(get_solve_app())
        .get_matches();

    let result = match matches.subcommand() {
        Some(("solve", solve_matches)) => run_solve(solve_matches, create_write_buffer),
        _ => Err("no subcommand was used. Use -h to print help information.".into()),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(1);
    }
}
