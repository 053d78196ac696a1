//! Lease exposition
//!
//! Collected leases leave the process in one of two ways, chosen once at
//! startup:
//! - One-shot: a single collection pass dumped as YAML on standard output
//! - Serving: a Prometheus endpoint that collects on every scrape

pub mod dump;
pub mod metrics;
pub mod server;

use crate::{collector::Collector, error::MonitorError};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    OneShot,
    Serving { listen: String },
}

impl Mode {
    /// Serving when a listen address was given, one-shot otherwise.
    pub fn from_listen(listen: Option<String>) -> Self {
        match listen {
            Some(listen) => Mode::Serving { listen },
            None => Mode::OneShot,
        }
    }
}

/// Runs the selected mode to completion.
///
/// One-shot returns after the dump is written. Serving only returns on error.
pub async fn run(mode: Mode, collector: Arc<Collector>) -> Result<(), MonitorError> {
    match mode {
        Mode::OneShot => {
            tracing::debug!("One-shot mode, dumping leases to stdout");
            dump::run(&collector, std::io::stdout()).await
        }
        Mode::Serving { listen } => server::serve(&listen, collector).await,
    }
}
