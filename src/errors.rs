// File: errors.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum BypassError {
    InvalidTarget(String),
    InvalidProxy(String),
    InvalidHeader(String),
    Wordlist { path: PathBuf, source: std::io::Error },
    MalformedEntry(String),
    InvalidMethod(String),
    Transport(std::io::Error),
    Timeout(String),
    NoPathSegment(String),
    Configuration(String),
}

impl BypassError {
    /// Configuration problems abort the run. Everything else only costs
    /// the candidate it happened on.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidTarget(_)
                | Self::InvalidProxy(_)
                | Self::InvalidHeader(_)
                | Self::Wordlist { .. }
                | Self::Configuration(_)
        )
    }
}

impl fmt::Display for BypassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget(e) => write!(f, "Invalid target URI: {}", e),
            Self::InvalidProxy(e) => write!(f, "Invalid proxy: {}", e),
            Self::InvalidHeader(h) => write!(f, "Invalid header (expected name:value): {}", h),
            Self::Wordlist { path, source } => {
                write!(f, "Cannot read wordlist {}: {}", path.display(), source)
            }
            Self::MalformedEntry(line) => write!(f, "Malformed wordlist entry: {}", line),
            Self::InvalidMethod(m) => write!(f, "Invalid HTTP method: {}", m),
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::Timeout(url) => write!(f, "Request timed out: {}", url),
            Self::NoPathSegment(uri) => write!(f, "No path segment in {}", uri),
            Self::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for BypassError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wordlist { source, .. } => Some(source),
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BypassError {
    fn from(error: std::io::Error) -> Self {
        Self::Transport(error)
    }
}

impl From<url::ParseError> for BypassError {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidTarget(error.to_string())
    }
}

pub type BypassResult<T> = Result<T, BypassError>;
