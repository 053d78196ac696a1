//! Lease collection
//!
//! This module drives one collection pass over every configured backend:
//! - Dispatching each descriptor to its backend
//! - Skipping unknown kinds and failed backends without aborting the pass
//! - Concatenating the results in configuration order

use crate::{
    backend::{self, BackendError, LeaseBackend},
    config::{BackendDescriptor, CollectorOptions},
    error::error_chain,
    lease::Lease,
};
use std::{sync::Arc, time::Duration};
use tokio::{sync::Mutex, time::Instant};

struct LeaseCache {
    ttl: Duration,
    slot: Mutex<Option<(Instant, Vec<Lease>)>>,
}

/// Collects leases from a fixed set of backends.
///
/// A `Collector` is built once at startup and shared by reference. It holds no
/// per-pass state, so any number of passes may run at the same time.
pub struct Collector {
    descriptors: Arc<[BackendDescriptor]>,
    options: CollectorOptions,
    cache: Option<LeaseCache>,
}

impl Collector {
    pub fn new(descriptors: Vec<BackendDescriptor>) -> Self {
        Self::with_options(descriptors, CollectorOptions::default())
    }

    pub fn with_options(descriptors: Vec<BackendDescriptor>, options: CollectorOptions) -> Self {
        let cache = options.cache_ttl.map(|ttl| LeaseCache {
            ttl,
            slot: Mutex::new(None),
        });

        Self {
            descriptors: descriptors.into(),
            options,
            cache,
        }
    }

    pub fn descriptors(&self) -> &[BackendDescriptor] {
        &self.descriptors
    }

    /// Runs every backend once and returns all leases in configuration order.
    ///
    /// Unknown kinds and failing backends are logged and contribute nothing;
    /// the pass itself never fails.
    pub async fn collect(&self) -> Vec<Lease> {
        let mut leases = Vec::new();

        for descriptor in self.descriptors.iter() {
            let Some(backend) = backend::lookup(&descriptor.kind) else {
                tracing::warn!("unknown DHCP type: {}", descriptor.kind);
                continue;
            };

            // A failing backend must not leave half of its output behind.
            let mut fetched = Vec::new();
            match self.fetch(backend.as_ref(), descriptor, &mut fetched).await {
                Ok(()) => leases.append(&mut fetched),
                Err(e) => tracing::warn!(
                    "Skipping {} backend on host '{}': {}",
                    backend.kind(),
                    descriptor.host,
                    error_chain(&e)
                ),
            }
        }

        tracing::debug!(
            "Collected {} lease(s) from {} backend(s)",
            leases.len(),
            self.descriptors.len()
        );
        leases
    }

    /// Like [`collect`](Self::collect), but reuses a recent pass when a cache
    /// TTL is configured.
    ///
    /// Concurrent callers wait for a single refresh instead of each running
    /// their own.
    pub async fn snapshot(&self) -> Vec<Lease> {
        let Some(cache) = &self.cache else {
            return self.collect().await;
        };

        let mut slot = cache.slot.lock().await;
        if let Some((taken, leases)) = slot.as_ref() {
            if taken.elapsed() < cache.ttl {
                tracing::debug!("Serving cached leases from {:?} ago", taken.elapsed());
                return leases.clone();
            }
        }

        let leases = self.collect().await;
        *slot = Some((Instant::now(), leases.clone()));
        leases
    }

    async fn fetch(
        &self,
        backend: &dyn LeaseBackend,
        descriptor: &BackendDescriptor,
        leases: &mut Vec<Lease>,
    ) -> Result<(), BackendError> {
        let fetch = backend.fetch(descriptor, leases);
        match self.options.command_timeout {
            Some(after) => tokio::time::timeout(after, fetch).await.map_err(|_| {
                BackendError::Timeout {
                    host: descriptor.host.clone(),
                    after,
                }
            })?,
            None => fetch.await,
        }
    }
}
