use clap::Parser;
use dhcp_monitor::{
    config::read_descriptors, error::error_chain, exposition, Args, Collector, Mode, MonitorError,
};
use std::{process::ExitCode, sync::Arc};
use tracing_subscriber::EnvFilter;

async fn run(args: Args) -> Result<(), MonitorError> {
    // Backend descriptors arrive on stdin, e.g. `dhcp-monitor < backends.yaml`.
    let descriptors = read_descriptors(std::io::stdin().lock())?;
    tracing::info!("Loaded {} backend descriptor(s)", descriptors.len());

    let collector = Arc::new(Collector::with_options(
        descriptors,
        args.collector_options(),
    ));
    exposition::run(Mode::from_listen(args.listen), collector).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Stdout carries the one-shot dump, so diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}
