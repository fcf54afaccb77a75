// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

pub mod capitalization;
pub mod endpaths;
pub mod headers;
pub mod methods;
pub mod midpaths;

use crate::candidate::Submission;
use crate::config::RunConfig;
use crate::errors::BypassResult;
use crate::wordlist::Wordlists;

pub trait Technique: Send + Sync {
    /// Short name used on the command line.
    fn name(&self) -> &'static str;
    /// Banner printed above the report.
    fn title(&self) -> &'static str;
    fn submissions(&self, config: &RunConfig, wordlists: &Wordlists)
        -> BypassResult<Vec<Submission>>;
}

pub struct TechniqueHandler {
    techniques: Vec<Box<dyn Technique>>,
}

impl TechniqueHandler {
    pub fn new() -> Self {
        let mut handler = Self {
            techniques: Vec::new(),
        };
        handler.register_known_techniques();
        handler
    }

    /// Keeps only the named techniques, still in run order. Unknown names
    /// are returned so the caller can reject them.
    pub fn select(names: &[String]) -> Result<Self, Vec<String>> {
        let mut handler = Self::new();
        let unknown: Vec<String> = names
            .iter()
            .filter(|name| !handler.list().contains(&name.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(unknown);
        }
        handler
            .techniques
            .retain(|t| names.iter().any(|name| name == t.name()));
        Ok(handler)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Technique> {
        self.techniques.iter().map(|t| t.as_ref())
    }

    pub fn list(&self) -> Vec<&'static str> {
        self.techniques.iter().map(|t| t.name()).collect()
    }

    pub fn register_known_techniques(&mut self) {
        self.techniques.push(Box::new(methods::Methods));
        self.techniques.push(Box::new(headers::Headers));
        self.techniques.push(Box::new(endpaths::EndPaths));
        self.techniques.push(Box::new(midpaths::MidPaths));
        self.techniques.push(Box::new(capitalization::Capitalization));
    }
}

impl Default for TechniqueHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
