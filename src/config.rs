use crate::error::MonitorError;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::{io::Read, time::Duration};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address to listen on for Prometheus scrapes (e.g., ':9967', '127.0.0.1:9967').
    /// Without it the leases are printed once as YAML.
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Abandon a backend command that has not finished after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub command_timeout: Option<u64>,

    /// Reuse a collection pass for this many seconds when serving scrapes
    #[arg(long, value_name = "SECONDS")]
    pub cache_ttl: Option<u64>,
}

impl Args {
    pub fn collector_options(&self) -> CollectorOptions {
        CollectorOptions {
            command_timeout: self.command_timeout.map(Duration::from_secs),
            cache_ttl: self.cache_ttl.map(Duration::from_secs),
        }
    }
}

/// One configured lease source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendDescriptor {
    /// Selects the backend implementation, e.g. `dnsmasq`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Informational only.
    #[serde(default)]
    pub host: String,
    /// Program followed by its arguments.
    #[serde(default)]
    pub command: Vec<String>,
}

impl BackendDescriptor {
    pub fn new(kind: impl Into<String>, host: impl Into<String>, command: Vec<String>) -> Self {
        Self {
            kind: kind.into(),
            host: host.into(),
            command,
        }
    }
}

/// Tuning knobs for a [`Collector`](crate::collector::Collector).
///
/// Both are off by default: every pass runs every backend to completion, and
/// every scrape gets a fresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectorOptions {
    pub command_timeout: Option<Duration>,
    pub cache_ttl: Option<Duration>,
}

/// Parses a YAML sequence of backend descriptors.
///
/// Whitespace-only input is an empty configuration.
pub fn parse_descriptors(input: &str) -> Result<Vec<BackendDescriptor>, MonitorError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(input).map_err(MonitorError::Config)
}

/// Reads the whole stream and parses it with [`parse_descriptors`].
pub fn read_descriptors<R: Read>(mut reader: R) -> Result<Vec<BackendDescriptor>, MonitorError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_descriptors(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_descriptors() {
        let input = r#"
- type: dnsmasq
  host: router.lan
  command: ["ssh", "router.lan", "cat", "/var/lib/misc/dnsmasq.leases"]
- type: kea
  host: dhcp1
"#;
        let descriptors = parse_descriptors(input).unwrap();

        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].kind, "dnsmasq");
        assert_eq!(descriptors[0].host, "router.lan");
        assert_eq!(descriptors[0].command.len(), 4);
        assert_eq!(descriptors[1].kind, "kea");
        assert!(descriptors[1].command.is_empty());
    }

    #[test]
    fn test_empty_input_is_empty_configuration() {
        assert!(parse_descriptors("").unwrap().is_empty());
        assert!(parse_descriptors(" \n\t\n").unwrap().is_empty());
        assert!(parse_descriptors("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        let err = parse_descriptors("type: dnsmasq\ncommand: [cat").unwrap_err();
        assert!(matches!(err, MonitorError::Config(_)));

        // A mapping where a sequence is expected is just as fatal.
        assert!(parse_descriptors("type: dnsmasq").is_err());
    }

    #[test]
    fn test_missing_type_is_an_error() {
        assert!(parse_descriptors("- host: router.lan").is_err());
    }

    #[test]
    fn test_read_descriptors_from_reader() {
        let input = "- type: dnsmasq\n  command: [cat, /tmp/leases]\n";
        let descriptors = read_descriptors(input.as_bytes()).unwrap();

        assert_eq!(
            descriptors,
            vec![BackendDescriptor::new(
                "dnsmasq",
                "",
                vec!["cat".to_string(), "/tmp/leases".to_string()]
            )]
        );
    }

    #[test]
    fn test_collector_options_from_args() {
        let args = Args::parse_from(["dhcp-monitor", "--command-timeout", "30"]);
        let options = args.collector_options();

        assert!(args.listen.is_none());
        assert_eq!(options.command_timeout, Some(Duration::from_secs(30)));
        assert_eq!(options.cache_ttl, None);
    }

    #[test]
    fn test_listen_flag() {
        let args = Args::parse_from(["dhcp-monitor", "-l", ":9967", "--cache-ttl", "5"]);

        assert_eq!(args.listen.as_deref(), Some(":9967"));
        assert_eq!(args.log_level, "info");
        assert_eq!(args.collector_options().cache_ttl, Some(Duration::from_secs(5)));
    }
}
