// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use binstretch_solver::{
    config::{BackendKind, ConfigError, MemoSetting, SolverConfig},
    solver::Solver,
};
use clap::{ArgAction, Parser};
use std::{path::PathBuf, process::ExitCode};

/// Finds the largest stretching factor an adversary can force in online
/// bin stretching with the given number of bins.
#[derive(Parser, Debug)]
#[command(name = "binstretch", version, about)]
struct Cli {
    /// Bin capacity (items of size 1, 2, ..., CAPACITY are allowed)
    capacity: i64,

    /// Number of bins
    bins: usize,

    /// Offer only a random subset of N sizes from 1..=CAPACITY
    #[arg(short = 'r', long = "random", value_name = "N")]
    random: Option<usize>,

    /// Seed for the random subset
    #[arg(long)]
    seed: Option<u64>,

    /// Exact feasibility backend
    #[arg(long, value_enum)]
    backend: Option<BackendKind>,

    /// Load the search starts to improve on [default: floor(4 * CAPACITY / 3)]
    #[arg(long, value_name = "L")]
    lower_bound: Option<i64>,

    /// Upper end of the search window [default: 2 * CAPACITY]
    #[arg(long, value_name = "U")]
    ceiling: Option<i64>,

    /// Memoization policy
    #[arg(long, value_enum)]
    memo: Option<MemoSetting>,

    /// Write the explored decision tree as Graphviz DOT
    #[arg(long, value_name = "FILE")]
    dot: Option<PathBuf>,

    /// JSON configuration file; command line flags take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seconds between progress lines
    #[arg(long, value_name = "SECS")]
    log_interval: Option<u64>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> Result<SolverConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SolverConfig::from_json_file(path)?,
            None => SolverConfig::default(),
        };
        config.capacity = self.capacity;
        config.num_bins = self.bins;
        if self.random.is_some() {
            config.random_weights = self.random;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if self.lower_bound.is_some() {
            config.lower_bound = self.lower_bound;
        }
        if self.ceiling.is_some() {
            config.ceiling = self.ceiling;
        }
        if let Some(memo) = self.memo {
            config.memo = memo;
        }
        if self.dot.is_some() {
            config.dot = self.dot;
        }
        if let Some(secs) = self.log_interval {
            config.log_interval_secs = secs;
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match Solver::new(config).run() {
        Ok(report) => {
            println!("{report}");
            if verbose > 0 {
                println!();
                print!("{}", report.outcome().statistics());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
