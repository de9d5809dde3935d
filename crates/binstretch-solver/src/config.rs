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

//! # Solver configuration
//!
//! `SolverConfig` gathers every knob of a run: the instance (capacity,
//! number of bins, weight universe), the search window, the memo policy, the
//! feasibility backend and the diagnostics. It is plain serde data, so a run
//! can be described by a JSON file and then adjusted from the command line.

use binstretch_search::memo::MemoPolicy;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Exact feasibility backend to inject into the oracle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Depth-first assignment search, always available.
    #[default]
    Search,
    /// 0/1 integer program, requires the `milp` feature.
    Milp,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Search => write!(f, "search"),
            BackendKind::Milp => write!(f, "milp"),
        }
    }
}

/// Memoization policy of the adversary search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MemoSetting {
    #[default]
    Overwrite,
    Merge,
    Disabled,
}

impl From<MemoSetting> for MemoPolicy {
    fn from(setting: MemoSetting) -> Self {
        match setting {
            MemoSetting::Overwrite => MemoPolicy::Overwrite,
            MemoSetting::Merge => MemoPolicy::Merge,
            MemoSetting::Disabled => MemoPolicy::Disabled,
        }
    }
}

/// Everything needed to run the adversary search once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Capacity of every bin. The weight universe is `1..=capacity`.
    pub capacity: i64,
    pub num_bins: usize,
    /// Use a random subsample of this many weights instead of all of them.
    pub random_weights: Option<usize>,
    /// Seed for the weight subsample. Drawn at random when absent.
    pub seed: Option<u64>,
    pub backend: BackendKind,
    /// Starting lower bound. Defaults to `floor(4 * capacity / 3)`.
    pub lower_bound: Option<i64>,
    /// Upper end of the search window. Defaults to `2 * capacity`.
    pub ceiling: Option<i64>,
    pub memo: MemoSetting,
    /// Write the explored decision tree as Graphviz DOT to this file.
    pub dot: Option<PathBuf>,
    /// Seconds between progress lines.
    pub log_interval_secs: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            num_bins: 3,
            random_weights: None,
            seed: None,
            backend: BackendKind::default(),
            lower_bound: None,
            ceiling: None,
            memo: MemoSetting::default(),
            dot: None,
            log_interval_secs: 1,
        }
    }
}

impl SolverConfig {
    /// Parses a configuration from JSON text. Missing fields take their
    /// default values.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a configuration from a JSON file.
    pub fn from_json_file<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the lower bound the search starts from: the configured one,
    /// or `floor(4 * capacity / 3)`.
    #[inline]
    pub fn effective_lower_bound(&self) -> i64 {
        self.lower_bound
            .unwrap_or_else(|| self.capacity.saturating_mul(4) / 3)
    }

    /// Checks the instance before any work is done.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity <= 0 {
            return Err(ConfigError::Invalid(format!(
                "capacity must be positive, got {}",
                self.capacity
            )));
        }
        if self.num_bins == 0 {
            return Err(ConfigError::Invalid(
                "number of bins must be positive".to_string(),
            ));
        }
        if self.random_weights == Some(0) {
            return Err(ConfigError::Invalid(
                "random weight count must be positive".to_string(),
            ));
        }
        let lower = self.effective_lower_bound();
        match self.ceiling {
            Some(ceiling) if ceiling <= lower => Err(ConfigError::Invalid(format!(
                "ceiling {} must exceed the lower bound {}",
                ceiling, lower
            ))),
            _ => Ok(()),
        }
    }
}

/// Errors raised while loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Invalid(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
