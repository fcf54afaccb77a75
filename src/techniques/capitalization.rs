// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use super::Technique;
use crate::candidate::{Candidate, Submission};
use crate::config::RunConfig;
use crate::errors::BypassResult;
use crate::paths::SplitPath;
use crate::wordlist::Wordlists;

/// Upper-cases one distinct character of the final segment at a time,
/// everywhere it occurs. Needs no wordlist.
pub struct Capitalization;

impl Technique for Capitalization {
    fn name(&self) -> &'static str {
        "capitalization"
    }

    fn title(&self) -> &'static str {
        "CAPITALIZATION"
    }

    fn submissions(
        &self,
        config: &RunConfig,
        _wordlists: &Wordlists,
    ) -> BypassResult<Vec<Submission>> {
        let split = SplitPath::parse(config.target())?;
        Ok(variants(split.last())
            .into_iter()
            .map(|segment| {
                let url = split.with_last(&segment);
                Submission::Ready(Candidate::new(
                    url.as_str(),
                    config.http_method(),
                    url.as_str(),
                    config.base_headers(),
                ))
            })
            .collect())
    }
}

/// One variant per distinct character, in order of first occurrence.
pub fn variants(segment: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for c in segment.chars() {
        if !seen.contains(&c) {
            seen.push(c);
        }
    }
    seen.into_iter()
        .map(|target| {
            segment
                .chars()
                .map(|c| {
                    if c == target {
                        c.to_uppercase().collect::<String>()
                    } else {
                        c.to_string()
                    }
                })
                .collect()
        })
        .collect()
}
