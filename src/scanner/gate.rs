//! Process-wide admission gate for expensive scans
//!
//! A single gate is created at startup and handed to the scanner manager. Every
//! detail scan holds one slot for its whole duration; the slot is returned when
//! the permit drops, which covers success, failure and cancellation alike.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Number of detail scans allowed to run at once
pub const DEFAULT_SCAN_SLOTS: usize = 2;

/// Counting admission control shared by every caller in the process
#[derive(Debug, Clone)]
pub struct ScanGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl Default for ScanGate {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_SLOTS)
    }
}

impl ScanGate {
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently held by running scans
    pub fn in_use(&self) -> usize {
        self.capacity - self.semaphore.available_permits()
    }

    /// Wait for a free slot
    ///
    /// Returns `None` only if the gate was closed, which never happens for a gate
    /// built with [`ScanGate::new`].
    pub async fn acquire(&self, operation: &str) -> Option<GatePermit> {
        log::debug!("Attempting to acquire scan slot for {}", operation);
        let permit = self.semaphore.clone().acquire_owned().await.ok()?;
        log::debug!("Scan slot acquired for {}", operation);

        Some(GatePermit {
            _permit: permit,
            operation: operation.to_string(),
        })
    }
}

/// A held slot; dropping it frees the slot
#[derive(Debug)]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
    operation: String,
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        log::debug!("Scan slot released for {}", self.operation);
    }
}
