// File: getstate.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Request counters shared by every task of a run.
#[derive(Debug, Default)]
pub struct GetState {
    total_requests: AtomicUsize,
    successful_requests: AtomicUsize,
    failed_requests: AtomicUsize,
    rejected_entries: AtomicUsize,
    start_time: Mutex<Option<DateTime<Utc>>>,
    end_time: Mutex<Option<DateTime<Utc>>>,
}

impl GetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_success(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.successful_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_failure(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Entries that never became a request. Not part of the request total.
    pub fn add_rejected(&self) {
        self.rejected_entries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_requests(&self) -> usize {
        self.total_requests.load(Ordering::Relaxed)
    }

    pub fn successful_requests(&self) -> usize {
        self.successful_requests.load(Ordering::Relaxed)
    }

    pub fn failed_requests(&self) -> usize {
        self.failed_requests.load(Ordering::Relaxed)
    }

    pub fn rejected_entries(&self) -> usize {
        self.rejected_entries.load(Ordering::Relaxed)
    }

    pub fn mark_start(&self) {
        if let Ok(mut start) = self.start_time.lock() {
            *start = Some(Utc::now());
        }
    }

    pub fn mark_end(&self) {
        if let Ok(mut end) = self.end_time.lock() {
            *end = Some(Utc::now());
        }
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time.lock().ok().and_then(|t| *t)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time.lock().ok().and_then(|t| *t)
    }

    pub fn summary(&self) -> String {
        let elapsed = match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => (end - start).num_milliseconds(),
            _ => 0,
        };
        format!(
            "{} requests in {} ms. Successful: {}. Failed: {}. Rejected entries: {}.",
            self.total_requests(),
            elapsed,
            self.successful_requests(),
            self.failed_requests(),
            self.rejected_entries()
        )
    }
}
