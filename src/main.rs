use dmxp_corebench::logging::init_logging;
use dmxp_corebench::{Coordinator, HarnessConfig};
use std::env;
use std::process::ExitCode;

const USAGE: &str = "Usage: dmxp-corebench [--quick] [--unpinned]\n\
    \n  --quick     divide all delays, timeouts and periods by 10\
    \n  --unpinned  let every worker run on any cpu";

fn main() -> ExitCode {
    init_logging();

    let mut config = HarnessConfig::default();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--quick" => config = config.time_scaled(10),
            "--unpinned" => config = config.unpinned(),
            "-h" | "--help" => {
                println!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("Unknown argument: {other}\n{USAGE}");
                return ExitCode::from(2);
            }
        }
    }

    tracing::info!(?config, "starting benchmark");

    match Coordinator::new(config).run() {
        Ok(report) => {
            tracing::info!(
                sent = report.producer.sent,
                received = report.consumer.latency.count,
                "benchmark finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "benchmark failed");
            ExitCode::FAILURE
        }
    }
}
