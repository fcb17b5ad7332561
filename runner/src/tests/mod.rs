use scheduler::{Policy, ProcessDefinition};

use std::env;
use std::fs;

use processor::format_report;
use processor::{Processor, Report};


fn output_path(policy: Policy, folder: &str, name: &str) -> String {
    match policy {
        Policy::RoundRobin => {
            let quantum = arguments();
            format!("../outputs/{policy}/{folder}/{name}___{quantum}.log")
        }
        _ => format!("../outputs/{policy}/{folder}/{name}.log"),
    }
}

fn write_logs(policy: Policy, folder: &str, name: &str, logs: &str) {
    fs::create_dir_all(format!("../outputs/{policy}/{folder}")).unwrap();
    fs::write(output_path(policy, folder, name), logs).unwrap();
}

fn read_logs(policy: Policy, folder: &str, name: &str) -> String {
    fs::read_to_string(output_path(policy, folder, name)).unwrap()
}

/// Runs `processes` under every policy and compares each report with the
/// stored output.
fn run(folder: &str, name: &str, processes: &[ProcessDefinition]) {
    for policy in Policy::ALL {
        let report = simulate(policy, processes);
        let output = format_report(&[report]);

        if env::var("WRITE_OUTPUT").is_ok() {
            write_logs(policy, folder, name, &output);
        } else {
            let reference = read_logs(policy, folder, name);

            println!("\nleft = Correct Output\nright = Your Output\n");
            use pretty_assertions::assert_eq;
            assert_eq!(reference, output);
        }
    }
}

fn simulate(policy: Policy, processes: &[ProcessDefinition]) -> Report {
    let quantum = arguments();
    println!("Policy {policy}\nQuantum {quantum}");
    Processor::run(policy.build(quantum as i64).unwrap(), processes).unwrap()
}

fn arguments() -> usize {
    env::var("QUANTUM")
        .unwrap_or("2".to_string())
        .parse::<usize>()
        .unwrap()
}

/// Shorthand for a batch of `(arrival, burst)` pairs with ids in input order.
fn batch(processes: &[(i64, i64)]) -> Vec<ProcessDefinition> {
    processes
        .iter()
        .enumerate()
        .map(|(id, &(arrival, burst))| ProcessDefinition::new(id, arrival, burst))
        .collect()
}
