// File: wordlist.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::errors::{BypassError, BypassResult};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const HTTP_METHODS: &str = "httpmethods";
pub const HEADERS: &str = "headers";
pub const IPS: &str = "ips";
pub const SIMPLE_HEADERS: &str = "simpleheaders";
pub const END_PATHS: &str = "endpaths";
pub const MID_PATHS: &str = "midpaths";

/// Reads `folder/name`, keeping non-blank lines in file order and byte for
/// byte apart from the line ending.
pub fn load(folder: &Path, name: &str) -> BypassResult<Vec<String>> {
    let path = folder.join(name);
    let file = File::open(&path).map_err(|source| BypassError::Wordlist {
        path: path.clone(),
        source,
    })?;

    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| BypassError::Wordlist {
            path: path.clone(),
            source,
        })?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    debug!("Loaded {} entries from {}", lines.len(), path.display());
    Ok(lines)
}

/// Every list a run consumes, loaded up front so a missing file fails the
/// run before the first request goes out.
#[derive(Debug, Clone, Default)]
pub struct Wordlists {
    pub http_methods: Vec<String>,
    pub headers: Vec<String>,
    pub ips: Vec<String>,
    pub simple_headers: Vec<String>,
    pub end_paths: Vec<String>,
    pub mid_paths: Vec<String>,
}

impl Wordlists {
    pub fn load_all(folder: &Path) -> BypassResult<Self> {
        Ok(Self {
            http_methods: load(folder, HTTP_METHODS)?,
            headers: load(folder, HEADERS)?,
            ips: load(folder, IPS)?,
            simple_headers: load(folder, SIMPLE_HEADERS)?,
            end_paths: load(folder, END_PATHS)?,
            mid_paths: load(folder, MID_PATHS)?,
        })
    }
}
