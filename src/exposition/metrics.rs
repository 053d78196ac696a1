//! Prometheus rendering of collected leases
//!
//! Every call renders into its own registry, so concurrent scrapes never see
//! each other's samples.

use crate::lease::Lease;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

pub const EXPIRATION_METRIC: &str = "dhcp_expiration_time";
const EXPIRATION_HELP: &str = "Time, when the lease expires";
const EXPIRATION_LABELS: [&str; 3] = ["mac", "ip", "name"];

/// Renders one `dhcp_expiration_time` sample per lease in the text format.
///
/// Leases sharing the same MAC, IP and hostname collapse into one series;
/// the last one in collection order wins.
pub fn render(leases: &[Lease]) -> Result<String, prometheus::Error> {
    let registry = Registry::new();
    let expiration = GaugeVec::new(
        Opts::new(EXPIRATION_METRIC, EXPIRATION_HELP),
        &EXPIRATION_LABELS,
    )?;
    registry.register(Box::new(expiration.clone()))?;

    for lease in leases {
        expiration
            .with_label_values(&[
                lease.mac.as_str(),
                lease.ip.as_str(),
                lease.hostname.as_str(),
            ])
            .set(lease.expiration_time as f64);
    }

    let mut buffer = String::new();
    TextEncoder::new().encode_utf8(&registry.gather(), &mut buffer)?;
    Ok(buffer)
}

/// The `Content-Type` of [`render`]'s output.
pub fn content_type() -> String {
    TextEncoder::new().format_type().to_string()
}
