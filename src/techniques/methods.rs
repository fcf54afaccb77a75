// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use super::Technique;
use crate::candidate::{Candidate, Submission};
use crate::config::RunConfig;
use crate::errors::BypassResult;
use crate::wordlist::Wordlists;

/// One request per verb in the wordlist. The method override does not apply.
pub struct Methods;

impl Technique for Methods {
    fn name(&self) -> &'static str {
        "methods"
    }

    fn title(&self) -> &'static str {
        "HTTP METHODS"
    }

    fn submissions(
        &self,
        config: &RunConfig,
        wordlists: &Wordlists,
    ) -> BypassResult<Vec<Submission>> {
        Ok(wordlists
            .http_methods
            .iter()
            .map(|verb| {
                Submission::Ready(Candidate::new(
                    verb.as_str(),
                    verb.as_str(),
                    config.target(),
                    config.base_headers(),
                ))
            })
            .collect())
    }
}
