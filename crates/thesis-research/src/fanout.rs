//! Concurrent fan-out with a full join barrier
//!
//! [`FanOut`] spawns every unit, bounds concurrent execution with a
//! semaphore, and waits for all of them; no result is observed until every
//! unit settles. Outputs come back in launch order regardless of completion
//! order, so downstream merges are deterministic.

use crate::error::{ResearchError, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, instrument};

/// Bounded-concurrency fan-out coordinator
#[derive(Debug, Clone)]
pub struct FanOut {
    semaphore: Arc<Semaphore>,
}

impl FanOut {
    /// Create a coordinator allowing `max_concurrent` units at once
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Run all units and return their outputs in launch order
    ///
    /// Every unit is spawned immediately; execution is throttled by the
    /// semaphore. The call returns only after all units have settled. A
    /// panicked unit surfaces as [`ResearchError::Join`].
    #[instrument(skip(self, units), fields(units = units.len()))]
    pub async fn run_all<F, O>(&self, units: Vec<F>) -> Result<Vec<O>>
    where
        F: Future<Output = O> + Send + 'static,
        O: Send + 'static,
    {
        let mut handles = Vec::with_capacity(units.len());
        for unit in units {
            let semaphore = Arc::clone(&self.semaphore);
            handles.push(tokio::spawn(async move {
                // Closed-semaphore errors cannot occur; we never close it
                let _permit = semaphore.acquire_owned().await;
                unit.await
            }));
        }

        // Join barrier: nothing is returned until every unit settles
        let joined = futures::future::join_all(handles).await;
        debug!(units = joined.len(), "All fan-out units settled");

        let mut outputs = Vec::with_capacity(joined.len());
        for result in joined {
            outputs.push(result.map_err(|e| ResearchError::Join(e.to_string()))?);
        }
        Ok(outputs)
    }
}
