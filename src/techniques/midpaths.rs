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

/// Injects each entry right before the final path segment.
pub struct MidPaths;

impl Technique for MidPaths {
    fn name(&self) -> &'static str {
        "midpaths"
    }

    fn title(&self) -> &'static str {
        "MID PATHS"
    }

    fn submissions(
        &self,
        config: &RunConfig,
        wordlists: &Wordlists,
    ) -> BypassResult<Vec<Submission>> {
        let split = SplitPath::parse(config.target())?;
        Ok(wordlists
            .mid_paths
            .iter()
            .map(|entry| {
                let url = split.with_inserted(entry);
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
