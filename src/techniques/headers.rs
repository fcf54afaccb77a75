// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use super::Technique;
use crate::candidate::{Candidate, Header, Submission};
use crate::config::RunConfig;
use crate::errors::BypassResult;
use crate::wordlist::Wordlists;

/// Origin spoofing (every header name against every IP, or against the
/// operator's single IP) followed by the pre-formed simple headers.
pub struct Headers;

impl Technique for Headers {
    fn name(&self) -> &'static str {
        "headers"
    }

    fn title(&self) -> &'static str {
        "VERB TAMPERING"
    }

    fn submissions(
        &self,
        config: &RunConfig,
        wordlists: &Wordlists,
    ) -> BypassResult<Vec<Submission>> {
        let ips: Vec<&str> = match config.bypass_ip() {
            Some(ip) => vec![ip],
            None => wordlists.ips.iter().map(String::as_str).collect(),
        };

        let mut submissions = Vec::with_capacity(
            wordlists.headers.len() * ips.len() + wordlists.simple_headers.len(),
        );

        for name in &wordlists.headers {
            for ip in &ips {
                submissions.push(Submission::Ready(with_header(
                    config,
                    Header::new(name.as_str(), *ip),
                )));
            }
        }

        for line in &wordlists.simple_headers {
            let submission = match Header::parse_simple(line) {
                Ok(header) => Submission::Ready(with_header(config, header)),
                Err(error) => Submission::Rejected {
                    label: line.clone(),
                    error,
                },
            };
            submissions.push(submission);
        }

        Ok(submissions)
    }
}

fn with_header(config: &RunConfig, header: Header) -> Candidate {
    let mut headers = config.base_headers();
    let label = header.label();
    headers.push(header);
    Candidate::new(label, config.http_method(), config.target(), headers)
}
