// File: candidate.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::errors::{BypassError, BypassResult};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parses an operator supplied `name:value` header.
    pub fn parse_colon(raw: &str) -> BypassResult<Self> {
        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| BypassError::InvalidHeader(raw.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(BypassError::InvalidHeader(raw.to_string()));
        }
        Ok(Self::new(name, value.trim()))
    }

    /// Parses a simple-header wordlist line, `name value`.
    pub fn parse_simple(line: &str) -> BypassResult<Self> {
        let (name, value) = line
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| BypassError::MalformedEntry(line.to_string()))?;
        let name = name.trim_end_matches(':');
        let value = value.trim();
        if name.is_empty() || value.is_empty() {
            return Err(BypassError::MalformedEntry(line.to_string()));
        }
        Ok(Self::new(name, value))
    }

    pub fn label(&self) -> String {
        format!("{}: {}", self.name, self.value)
    }
}

/// One fully resolved request variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub label: String,
    pub method: String,
    pub url: String,
    pub headers: Vec<Header>,
}

impl Candidate {
    pub fn new(
        label: impl Into<String>,
        method: impl Into<String>,
        url: impl Into<String>,
        headers: Vec<Header>,
    ) -> Self {
        Self {
            label: label.into(),
            method: method.into(),
            url: url.into(),
            headers,
        }
    }
}

/// What a technique hands to the pool: a candidate ready to send, or a
/// wordlist entry that could not be turned into one.
#[derive(Debug)]
pub enum Submission {
    Ready(Candidate),
    Rejected { label: String, error: BypassError },
}

impl Submission {
    pub fn label(&self) -> &str {
        match self {
            Self::Ready(candidate) => &candidate.label,
            Self::Rejected { label, .. } => label,
        }
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            Self::Ready(candidate) => Some(candidate),
            Self::Rejected { .. } => None,
        }
    }
}
