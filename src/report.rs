// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use colored::*;
use serde::Serialize;
use std::fmt::Write;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub label: String,
    pub status_code: u16,
    pub content_length: usize,
}

impl ProbeResult {
    pub fn new(label: impl Into<String>, status_code: u16, content_length: usize) -> Self {
        Self {
            label: label.into(),
            status_code,
            content_length,
        }
    }

    /// Recorded for candidates that never got a response.
    pub fn failed(label: impl Into<String>) -> Self {
        Self::new(label, 0, 0)
    }

    pub fn band(&self) -> Band {
        Band::classify(self.status_code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Success,
    Redirect,
    Blocked,
    ServerError,
    Unclassified,
}

impl Band {
    pub fn classify(status_code: u16) -> Self {
        match status_code {
            200..=299 => Self::Success,
            300..=399 => Self::Redirect,
            401..=408 | 413 | 429 => Self::Blocked,
            500..=505 | 511 => Self::ServerError,
            _ => Self::Unclassified,
        }
    }

    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            Self::Success => text.green(),
            Self::Redirect => text.yellow(),
            Self::Blocked => text.red(),
            Self::ServerError => text.magenta(),
            Self::Unclassified => text.normal(),
        }
    }
}

/// Shared, append-only result sink for the tasks of one technique.
#[derive(Debug, Clone, Default)]
pub struct ResultCollector {
    inner: Arc<Mutex<Vec<ProbeResult>>>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, result: ProbeResult) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result);
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes the collected results in append order.
    pub fn take(&self) -> Vec<ProbeResult> {
        std::mem::take(&mut *self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub status_code: u16,
    pub content_length: usize,
    pub label: String,
    pub band: Band,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub technique: String,
    pub title: String,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn new(technique: &str, title: &str, results: Vec<ProbeResult>) -> Self {
        let rows = results
            .into_iter()
            .map(|r| ReportRow {
                band: r.band(),
                status_code: r.status_code,
                content_length: r.content_length,
                label: r.label,
            })
            .collect();
        Self {
            technique: technique.to_string(),
            title: title.to_string(),
            rows,
        }
    }

    pub fn count(&self, band: Band) -> usize {
        self.rows.iter().filter(|row| row.band == band).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub struct ReportGenerator;

impl ReportGenerator {
    pub fn generate(report: &Report, format: ReportFormat, color: bool) -> String {
        match format {
            ReportFormat::Text => Self::generate_text(report, color),
            ReportFormat::Json => Self::generate_json(report),
        }
    }

    pub fn generate_text(report: &Report, color: bool) -> String {
        let mut out = String::new();
        let banner = format!("[####] {} [####]", report.title);
        if color {
            let _ = writeln!(out, "\n{}", banner.cyan());
        } else {
            let _ = writeln!(out, "\n{}", banner);
        }

        for row in &report.rows {
            let code = format!("{:<4}", row.status_code);
            let size = format!("{:>8} bytes", row.content_length);
            if color {
                let _ = writeln!(out, "{} {} {}", row.band.paint(&code), size.blue(), row.label);
            } else {
                let _ = writeln!(out, "{} {} {}", code, size, row.label);
            }
        }
        out
    }

    pub fn generate_json(report: &Report) -> String {
        serde_json::to_string(report).unwrap_or_else(|e| {
            format!("{{\"technique\":\"{}\",\"error\":\"{}\"}}", report.technique, e)
        })
    }
}
