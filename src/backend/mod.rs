//! Lease source backends
//!
//! This module contains the pluggable lease sources:
//! - The [`LeaseBackend`] trait every source implements
//! - Dispatch from a descriptor's `type` to its implementation
//! - The per-descriptor error type

pub mod dnsmasq;


pub use dnsmasq::Dnsmasq;

use crate::{config::BackendDescriptor, lease::Lease};
use async_trait::async_trait;
use std::{io, process::ExitStatus, time::Duration};
use thiserror::Error;

/// Failures confined to a single descriptor.
///
/// The collector logs these and moves on to the next descriptor.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("No command configured for {kind} backend on host '{host}'")]
    EmptyCommand { kind: &'static str, host: String },

    #[error("Failed to spawn '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Standard output of '{0}' was not captured")]
    MissingStdout(String),

    #[error("Failed to read output of '{program}'")]
    Read {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to wait for '{program}'")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited unsuccessfully: {status}")]
    Exit { program: String, status: ExitStatus },

    #[error("Backend on host '{host}' did not finish within {after:?}")]
    Timeout { host: String, after: Duration },
}

/// Common trait for every lease source.
#[async_trait]
pub trait LeaseBackend: Send + Sync {
    /// The descriptor `type` this backend answers to.
    fn kind(&self) -> &'static str;

    /// Appends the leases currently known to the source described by
    /// `descriptor`.
    ///
    /// On error `leases` may hold a partial scan; callers that need
    /// all-or-nothing semantics pass a scratch buffer.
    async fn fetch(
        &self,
        descriptor: &BackendDescriptor,
        leases: &mut Vec<Lease>,
    ) -> Result<(), BackendError>;
}

/// Returns the backend for `kind`, or `None` when the kind is not supported.
pub fn lookup(kind: &str) -> Option<Box<dyn LeaseBackend>> {
    match kind {
        dnsmasq::KIND => Some(Box::new(Dnsmasq)),
        _ => None,
    }
}
