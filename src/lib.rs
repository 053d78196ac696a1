//! # dhcp-monitor - DHCP Lease Collection and Export
//!
//! dhcp-monitor polls one or more DHCP lease sources, normalizes their lease
//! records, and either prints them once as YAML or serves them as Prometheus
//! metrics, collecting afresh on every scrape.
//!
//! ## Features
//!
//! - Pluggable lease backends (currently dnsmasq, read through any command)
//! - Best-effort parsing: malformed lines degrade instead of failing
//! - One broken backend never hides the others
//! - Optional command timeout and scrape cache
//!
//! ## Example
//!
//! ```rust,no_run
//! use dhcp_monitor::{BackendDescriptor, Collector};
//!
//! #[tokio::main]
//! async fn main() {
//!     let descriptors = vec![BackendDescriptor::new(
//!         "dnsmasq",
//!         "localhost",
//!         vec!["cat".to_string(), "/var/lib/misc/dnsmasq.leases".to_string()],
//!     )];
//!     let collector = Collector::new(descriptors);
//!     for lease in collector.collect().await {
//!         println!("{} {} {}", lease.ip, lease.mac, lease.hostname);
//!     }
//! }
//! ```

pub mod backend;
pub mod collector;
pub mod config;
pub mod error;
pub mod exposition;
pub mod lease;
pub mod network;

pub use collector::Collector;
pub use config::{Args, BackendDescriptor, CollectorOptions};
pub use error::MonitorError;
pub use exposition::Mode;
pub use lease::Lease;
