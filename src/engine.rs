// File: engine.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::candidate::Submission;
use crate::config::RunConfig;
use crate::errors::BypassError;
use crate::executor::Executor;
use crate::getstate::GetState;
use crate::limiter::Pool;
use crate::report::{ProbeResult, Report, ResultCollector};
use crate::techniques::{Technique, TechniqueHandler};
use crate::wordlist::Wordlists;
use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use log::{info, warn};
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

/// Drives techniques one after another against a single target.
pub struct Engine {
    config: Arc<RunConfig>,
    wordlists: Arc<Wordlists>,
    executor: Arc<dyn Executor>,
    state: Arc<GetState>,
}

impl Engine {
    pub fn new(config: RunConfig, wordlists: Wordlists, executor: Arc<dyn Executor>) -> Self {
        Self {
            config: Arc::new(config),
            wordlists: Arc::new(wordlists),
            executor,
            state: Arc::new(GetState::new()),
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn state(&self) -> Arc<GetState> {
        Arc::clone(&self.state)
    }

    /// Runs every technique of `handler` in order. Each one is fully drained
    /// and handed to `on_report` before the next one starts.
    pub async fn run<F>(&self, handler: &TechniqueHandler, mut on_report: F) -> Vec<Report>
    where
        F: FnMut(&Report),
    {
        self.state.mark_start();
        let mut reports = Vec::new();
        for technique in handler.iter() {
            let report = self.run_technique(technique).await;
            on_report(&report);
            reports.push(report);
        }
        self.state.mark_end();
        reports
    }

    pub async fn run_technique(&self, technique: &dyn Technique) -> Report {
        let submissions = match technique.submissions(&self.config, &self.wordlists) {
            Ok(submissions) => submissions,
            Err(e) => {
                warn!("Skipping {}: {}", technique.name(), e);
                return Report::new(technique.name(), technique.title(), Vec::new());
            }
        };
        info!(
            "Running {} with {} candidates",
            technique.name(),
            submissions.len()
        );

        let pb = self.progress_bar(submissions.len() as u64);
        let collector = ResultCollector::new();
        let deadline = Duration::from_secs(self.config.timeout());
        let mut pool = Pool::new(self.config.pool_size(), self.config.submission_delay());

        for submission in submissions {
            let executor = Arc::clone(&self.executor);
            let state = Arc::clone(&self.state);
            let collector = collector.clone();
            let pb = pb.clone();
            pool.submit(async move {
                let result = dispatch(executor.as_ref(), submission, deadline, &state).await;
                collector.push(result);
                pb.inc(1);
            })
            .await;
        }
        pool.drain().await;
        pb.finish_and_clear();

        let results = collector.take();
        info!("Finished {}: {} results", technique.name(), results.len());
        Report::new(technique.name(), technique.title(), results)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.progress() {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
        ) {
            pb.set_style(
                style
                    .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
                        let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                    })
                    .progress_chars("█▉▊▋▌▍▎▏  "),
            );
        }
        pb
    }
}

/// Sends one submission and turns whatever happens into a result. Failures
/// of any kind are recorded as status 0, length 0.
async fn dispatch(
    executor: &dyn Executor,
    submission: Submission,
    deadline: Duration,
    state: &GetState,
) -> ProbeResult {
    let candidate = match submission {
        Submission::Ready(candidate) => candidate,
        Submission::Rejected { label, error } => {
            warn!("{}", error);
            state.add_rejected();
            return ProbeResult::failed(label);
        }
    };

    let outcome = match tokio::time::timeout(deadline, executor.execute(&candidate)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(BypassError::Timeout(candidate.url.clone())),
    };

    match outcome {
        Ok(response) => {
            state.add_success();
            ProbeResult::new(candidate.label, response.status_code, response.content_length)
        }
        Err(e) => {
            warn!("{}: {}", candidate.label, e);
            state.add_failure();
            ProbeResult::failed(candidate.label)
        }
    }
}
