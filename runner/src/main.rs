use std::env;
use std::path::PathBuf;
use std::thread;

use anyhow::{anyhow, Result};
use log::info;

use processor::{format_report, Processor, Report};
use scheduler::{Policy, ProcessDefinition};

mod config;

use config::{OutputFormat, Settings, Workload, DEFAULT_WORKLOAD};

fn main() -> Result<()> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKLOAD));
    let workload = Workload::load(&path)?;
    let settings = Settings::from_env(&workload)?;
    info!(
        "{}: {} processes, policies {:?}, quantum {}",
        path.display(),
        workload.processes.len(),
        settings.policies,
        settings.quantum
    );

    let reports = compare(&workload.processes, &settings.policies, settings.quantum)?;

    match settings.output {
        OutputFormat::Text => print!("{}", format_report(&reports)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }
    Ok(())
}

/// Runs each policy over the same batch, one thread per policy.
///
/// Reports come back in the order of `policies`.
fn compare(processes: &[ProcessDefinition], policies: &[Policy], quantum: i64) -> Result<Vec<Report>> {
    let schedulers = policies
        .iter()
        .map(|policy| policy.build(quantum))
        .collect::<Result<Vec<_>, _>>()?;

    thread::scope(|s| {
        let handles: Vec<_> = schedulers
            .into_iter()
            .map(|scheduler| s.spawn(move || Processor::run(scheduler, processes)))
            .collect();

        handles
            .into_iter()
            .map(|handle| -> Result<Report> {
                let report = handle
                    .join()
                    .map_err(|_| anyhow!("simulation thread panicked"))??;
                Ok(report)
            })
            .collect()
    })
}

#[cfg(test)]
mod tests;
