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

//! # Adversary search driver
//!
//! Turns a `SolverConfig` into one adversary search run and a printable
//! report.
//!
//! ## Highlights
//!
//! - Weight universe: all of `1..=capacity`, or a seeded random subsample.
//!   The seed is reported so a run can be repeated.
//! - Backend: instantiated from `BackendKind` and injected into the search.
//! - Monitors: a `LogMonitor` for periodic progress, plus a `TreeRecorder`
//!   when a DOT file is requested, fanned out by a `CompositeMonitor`.
//! - Report: stretching factor, oracle call counts, time spent verifying
//!   feasibility, node count and total time.

use crate::{
    backend::make_backend,
    config::SolverConfig,
    error::SolverError,
};
use binstretch_model::weights::WeightUniverse;
use binstretch_oracle::backend::FeasibilityBackend;
use binstretch_search::{
    adversary::AdversarySolver,
    monitor::{composite::CompositeMonitor, log::LogMonitor, tree::TreeRecorder},
    result::StretchOutcome,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::{
    io::{BufWriter, Write},
    path::Path,
    time::Duration,
};

/// Runs the adversary search described by a configuration.
#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    #[inline]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns the weight universe in increasing order, and the seed used
    /// to draw it if it was sampled.
    pub fn weights(&self) -> (Vec<i64>, Option<u64>) {
        let capacity = self.config.capacity;
        match self.config.random_weights {
            Some(count) => {
                let seed = self.config.seed.unwrap_or_else(rand::random);
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let universe = WeightUniverse::sample(capacity, count, &mut rng);
                let mut weights = universe.weights().to_vec();
                weights.sort_unstable();
                (weights, Some(seed))
            }
            None => ((1..=capacity).collect(), None),
        }
    }

    /// Runs the search.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the backend is not
    /// available, the search fails, or the DOT file cannot be written.
    pub fn run(&self) -> Result<SolverReport, SolverError> {
        self.config.validate()?;

        let (weights, seed) = self.weights();
        let backend = make_backend(self.config.backend)?;
        let backend_name = backend.name().to_string();
        let lower_bound = self.config.effective_lower_bound();

        let mut solver = AdversarySolver::new().with_memo_policy(self.config.memo.into());
        if let Some(ceiling) = self.config.ceiling {
            solver = solver.with_ceiling(ceiling);
        }

        log::info!(
            "Searching {} bins of capacity {} with {} weights from lower bound {} (backend: {}, memo: {})",
            self.config.num_bins,
            self.config.capacity,
            weights.len(),
            lower_bound,
            backend_name,
            solver.memo_policy()
        );

        let mut recorder = self.config.dot.as_ref().map(|_| TreeRecorder::new());
        let outcome = {
            let mut monitor = CompositeMonitor::with_capacity(2);
            monitor.add_monitor(LogMonitor::new(
                Duration::from_secs(self.config.log_interval_secs),
                4095,
            ));
            if let Some(recorder) = recorder.as_mut() {
                monitor.add_monitor(recorder);
            }
            solver.run(
                &weights,
                self.config.num_bins,
                self.config.capacity,
                Some(lower_bound),
                backend,
                monitor,
            )?
        };

        let mut tree_nodes = None;
        if let (Some(path), Some(recorder)) = (self.config.dot.as_ref(), recorder.as_ref()) {
            write_dot(path, recorder)?;
            log::info!(
                "Wrote {} search nodes to {}",
                recorder.len(),
                path.display()
            );
            tree_nodes = Some(recorder.len());
        }

        Ok(SolverReport {
            backend: backend_name,
            seed,
            weights,
            outcome,
            tree_nodes,
        })
    }
}

fn write_dot(path: &Path, recorder: &TreeRecorder<i64>) -> Result<(), SolverError> {
    let mut writer = BufWriter::new(std::fs::File::create(path)?);
    recorder.write_dot(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct SolverReport {
    backend: String,
    seed: Option<u64>,
    weights: Vec<i64>,
    outcome: StretchOutcome<i64>,
    tree_nodes: Option<usize>,
}

impl SolverReport {
    #[inline]
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Returns the seed of the sampled weight universe.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[inline]
    pub fn weights(&self) -> &[i64] {
        &self.weights
    }

    #[inline]
    pub fn outcome(&self) -> &StretchOutcome<i64> {
        &self.outcome
    }

    /// Returns the number of nodes written to the DOT file, if one was
    /// requested.
    #[inline]
    pub fn tree_nodes(&self) -> Option<usize> {
        self.tree_nodes
    }
}

impl std::fmt::Display for SolverReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let outcome = &self.outcome;
        let statistics = outcome.statistics();

        writeln!(f, "Backend used = {}", self.backend)?;
        writeln!(f, "===========")?;
        writeln!(
            f,
            "Packing items of size 1 to {} into {} bins",
            outcome.capacity(),
            outcome.num_bins()
        )?;
        writeln!(f, "Weights = {:?}", self.weights)?;
        if let Some(seed) = self.seed {
            writeln!(f, "Seed = {}", seed)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", outcome)?;
        if let Some(weight) = outcome.first_weight() {
            writeln!(f, "First item to offer:                {}", weight)?;
        }
        if outcome.reached_ceiling() {
            writeln!(
                f,
                "Ceiling {} reached; the value is a lower bound only",
                outcome.ceiling()
            )?;
        }
        writeln!(f, "Feasibility checks:                 {}", statistics.oracle.calls)?;
        writeln!(f, "Exact feasibility checks:           {}", statistics.oracle.exact_calls)?;
        writeln!(
            f,
            "Time spent verifying feasibility:   {:.3?}",
            statistics.oracle.time_total
        )?;
        writeln!(f, "#nodes:                             {}", statistics.nodes_explored)?;
        write!(f, "Total elapsed time:                 {:.3?}", statistics.time_total)
    }
}
