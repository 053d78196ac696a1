//! Normalized lease records
//!
//! Every backend turns its native output into [`Lease`] values. A lease is a
//! plain value: two leases with the same fields are the same lease, and no
//! deduplication happens anywhere in the pipeline.

use serde::{Deserialize, Serialize};

/// A single DHCP lease as reported by a backend.
///
/// The serialized field names are the ones the one-shot dump has always used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    /// Expiration time in seconds since the epoch, `0` when unknown.
    #[serde(rename = "ExpirationTime")]
    pub expiration_time: i64,
    #[serde(rename = "MAC")]
    pub mac: String,
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "Hostname")]
    pub hostname: String,
    #[serde(rename = "ClientIdentifier")]
    pub client_identifier: String,
}

/// Parses one line of a dnsmasq leases file.
///
/// The expected layout is five whitespace-separated fields:
/// `expiration_time mac ip hostname client_identifier`.
///
/// Parsing never fails. Fields are filled from left to right and filling stops
/// at the first field that is missing or has the wrong type, leaving the rest
/// zero or empty. Anything past the fifth field is ignored.
pub fn parse_dnsmasq_line(line: &str) -> Lease {
    let mut lease = Lease::default();
    let mut fields = line.split_whitespace();

    match fields.next().map(str::parse::<i64>) {
        Some(Ok(expiration_time)) => lease.expiration_time = expiration_time,
        _ => return lease,
    }

    let slots = [
        &mut lease.mac,
        &mut lease.ip,
        &mut lease.hostname,
        &mut lease.client_identifier,
    ];
    for slot in slots {
        match fields.next() {
            Some(field) => *slot = field.to_string(),
            None => break,
        }
    }

    lease
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_complete_line() {
        let lease =
            parse_dnsmasq_line("1700000000 aa:bb:cc:dd:ee:ff 192.168.1.50 myhost 01:aa:bb:cc:dd:ee:ff");

        assert_eq!(
            lease,
            Lease {
                expiration_time: 1700000000,
                mac: "aa:bb:cc:dd:ee:ff".to_string(),
                ip: "192.168.1.50".to_string(),
                hostname: "myhost".to_string(),
                client_identifier: "01:aa:bb:cc:dd:ee:ff".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        let lease = parse_dnsmasq_line("  42\taa:bb:cc:dd:ee:ff   10.0.0.2 * *  ");

        assert_eq!(lease.expiration_time, 42);
        assert_eq!(lease.mac, "aa:bb:cc:dd:ee:ff");
        assert_eq!(lease.ip, "10.0.0.2");
        assert_eq!(lease.hostname, "*");
        assert_eq!(lease.client_identifier, "*");
    }

    #[test]
    fn test_parse_short_line_keeps_leading_fields() {
        let lease = parse_dnsmasq_line("1700000000 aa:bb:cc:dd:ee:ff 192.168.1.50");

        assert_eq!(lease.expiration_time, 1700000000);
        assert_eq!(lease.mac, "aa:bb:cc:dd:ee:ff");
        assert_eq!(lease.ip, "192.168.1.50");
        assert!(lease.hostname.is_empty());
        assert!(lease.client_identifier.is_empty());
    }

    #[test]
    fn test_parse_non_numeric_expiration_yields_empty_lease() {
        let lease = parse_dnsmasq_line("never aa:bb:cc:dd:ee:ff 192.168.1.50 myhost *");
        assert_eq!(lease, Lease::default());
    }

    #[test]
    fn test_parse_blank_line_yields_empty_lease() {
        assert_eq!(parse_dnsmasq_line(""), Lease::default());
        assert_eq!(parse_dnsmasq_line("   "), Lease::default());
    }

    #[test]
    fn test_parse_ignores_trailing_fields() {
        let lease = parse_dnsmasq_line("1 mac ip host id extra stuff");
        assert_eq!(lease.client_identifier, "id");
    }

    #[test]
    fn test_serialized_field_names() {
        let yaml = serde_yaml::to_string(&parse_dnsmasq_line("7 m i h c")).unwrap();

        assert!(yaml.contains("ExpirationTime: 7"));
        assert!(yaml.contains("MAC: m"));
        assert!(yaml.contains("IP: i"));
        assert!(yaml.contains("Hostname: h"));
        assert!(yaml.contains("ClientIdentifier: c"));
    }
}
