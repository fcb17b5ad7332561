use std::env;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use scheduler::{Policy, ProcessDefinition};

/// The quantum used when neither the workload nor `QUANTUM` sets one.
pub const DEFAULT_QUANTUM: i64 = 2;

/// The workload read when no path is given on the command line.
pub const DEFAULT_WORKLOAD: &str = "workloads/sample.toml";

/// A batch of processes read from a TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Workload {
    /// Round-Robin quantum.
    #[serde(default)]
    pub quantum: Option<i64>,

    #[serde(rename = "process", default)]
    pub processes: Vec<ProcessDefinition>,
}

impl Workload {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("malformed workload")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read workload {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }
}

/// How reports are printed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Runtime settings resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub policies: Vec<Policy>,
    pub quantum: i64,
    pub output: OutputFormat,
}

impl Settings {
    /// Reads `POLICY`, `QUANTUM` and `OUTPUT`.
    pub fn from_env(workload: &Workload) -> Result<Self> {
        Self::resolve(workload, |key| env::var(key).ok())
    }

    pub fn resolve<F>(workload: &Workload, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let policies = match lookup("POLICY").as_deref() {
            None | Some("all") => Policy::ALL.to_vec(),
            Some(policy) => vec![policy.parse()?],
        };

        let quantum = match lookup("QUANTUM") {
            Some(quantum) => quantum
                .parse::<i64>()
                .with_context(|| format!("QUANTUM must be an integer, got '{quantum}'"))?,
            None => workload.quantum.unwrap_or(DEFAULT_QUANTUM),
        };

        let output = match lookup("OUTPUT").as_deref() {
            None | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => bail!("OUTPUT must be 'text' or 'json', got '{other}'"),
        };

        Ok(Settings {
            policies,
            quantum,
            output,
        })
    }
}
