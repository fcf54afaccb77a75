// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use super::Technique;
use crate::candidate::{Candidate, Submission};
use crate::config::RunConfig;
use crate::errors::BypassResult;
use crate::wordlist::Wordlists;

/// Appends each entry to the target as-is. Entries bring their own separator.
pub struct EndPaths;

impl Technique for EndPaths {
    fn name(&self) -> &'static str {
        "endpaths"
    }

    fn title(&self) -> &'static str {
        "CUSTOM PATHS"
    }

    fn submissions(
        &self,
        config: &RunConfig,
        wordlists: &Wordlists,
    ) -> BypassResult<Vec<Submission>> {
        Ok(wordlists
            .end_paths
            .iter()
            .map(|entry| {
                let url = format!("{}{}", config.target(), entry);
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
