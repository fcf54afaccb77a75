// File: limiter.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use futures::stream::{FuturesUnordered, StreamExt};
use governor::{clock::DefaultClock, state::InMemoryState, state::NotKeyed, Quota, RateLimiter};
use log::warn;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Bounded worker pool for one technique.
///
/// At most `pool_size` submitted futures run at once. Submissions are paced
/// so that two of them are at least `delay` apart, whatever the pool size.
pub struct Pool<T> {
    semaphore: Arc<Semaphore>,
    pool_size: usize,
    pacer: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    tasks: FuturesUnordered<JoinHandle<T>>,
}

impl<T: Send + 'static> Pool<T> {
    pub fn new(pool_size: usize, delay: Duration) -> Self {
        let pool_size = pool_size.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(pool_size)),
            pool_size,
            pacer: Quota::with_period(delay).map(RateLimiter::direct),
            tasks: FuturesUnordered::new(),
        }
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Waits for the pacing delay and a free slot, then spawns `work`.
    /// The slot is released when `work` finishes, panics included.
    pub async fn submit<F>(&mut self, work: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        if let Some(pacer) = &self.pacer {
            pacer.until_ready().await;
        }
        let permit = match Arc::clone(&self.semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                warn!("Pool closed, dropping submission: {}", e);
                return;
            }
        };
        self.tasks.push(tokio::spawn(async move {
            let _permit = permit;
            work.await
        }));
    }

    /// Barrier: waits for every submitted task and returns their outputs in
    /// completion order. Tasks that panicked are logged and left out.
    pub async fn drain(&mut self) -> Vec<T> {
        let mut outputs = Vec::with_capacity(self.tasks.len());
        while let Some(joined) = self.tasks.next().await {
            match joined {
                Ok(output) => outputs.push(output),
                Err(e) => warn!("Task failed: {}", e),
            }
        }
        outputs
    }
}
