//! dnsmasq backend
//!
//! Runs the configured command and reads a dnsmasq leases file from its
//! standard output, one lease per line. The command is typically `cat` on the
//! local leases file or `ssh` to the router.

use super::{BackendError, LeaseBackend};
use crate::{
    config::BackendDescriptor,
    lease::{parse_dnsmasq_line, Lease},
};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    process::Command,
};

pub const KIND: &str = "dnsmasq";

pub struct Dnsmasq;

#[async_trait]
impl LeaseBackend for Dnsmasq {
    fn kind(&self) -> &'static str {
        KIND
    }

    async fn fetch(
        &self,
        descriptor: &BackendDescriptor,
        leases: &mut Vec<Lease>,
    ) -> Result<(), BackendError> {
        let Some((program, args)) = descriptor.command.split_first() else {
            return Err(BackendError::EmptyCommand {
                kind: KIND,
                host: descriptor.host.clone(),
            });
        };

        tracing::debug!("Spawning {:?} for host '{}'", descriptor.command, descriptor.host);

        // The child is killed if this future is dropped before it exits,
        // e.g. on timeout or when a scrape is abandoned.
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BackendError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BackendError::MissingStdout(program.clone()))?;

        let first = leases.len();
        let mut reader = BufReader::new(stdout);
        let mut line = Vec::new();
        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .await
                .map_err(|source| BackendError::Read {
                    program: program.clone(),
                    source,
                })?;
            if read == 0 {
                break;
            }
            leases.push(parse_dnsmasq_line(&String::from_utf8_lossy(strip_newline(
                &line,
            ))));
        }

        let status = child.wait().await.map_err(|source| BackendError::Wait {
            program: program.clone(),
            source,
        })?;
        if !status.success() {
            return Err(BackendError::Exit {
                program: program.clone(),
                status,
            });
        }

        tracing::debug!(
            "{} produced {} lease line(s) for host '{}'",
            program,
            leases.len() - first,
            descriptor.host
        );
        Ok(())
    }
}

/// Drops a trailing `\n` or `\r\n`.
fn strip_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
