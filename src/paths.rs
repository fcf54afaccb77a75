// File: paths.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::errors::{BypassError, BypassResult};

/// A target URI cut in front of its final path segment.
///
/// The cut is made by index on the path component, so a segment that also
/// shows up in the host name (`http://admin.x/admin`) is never confused
/// with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPath {
    base: String,
    last: String,
    trailing_slash: bool,
}

impl SplitPath {
    pub fn parse(uri: &str) -> BypassResult<Self> {
        let start = path_start(uri);
        let path = &uri[start..];
        let trailing_slash = path.ends_with('/');
        let trimmed = path.strip_suffix('/').unwrap_or(path);

        let sep = trimmed
            .rfind('/')
            .ok_or_else(|| BypassError::NoPathSegment(uri.to_string()))?;
        let last = &trimmed[sep + 1..];
        if last.is_empty() {
            return Err(BypassError::NoPathSegment(uri.to_string()));
        }

        let base_end = if trailing_slash {
            start + sep + 1
        } else {
            start + sep
        };

        Ok(Self {
            base: uri[..base_end].to_string(),
            last: last.to_string(),
            trailing_slash,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn last(&self) -> &str {
        &self.last
    }

    pub fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Rebuilds the URI with `segment` in place of the final segment.
    pub fn with_last(&self, segment: &str) -> String {
        if self.trailing_slash {
            format!("{}{}/", self.base, segment)
        } else {
            format!("{}/{}", self.base, segment)
        }
    }

    /// Rebuilds the URI with `injected` placed right before the final segment.
    pub fn with_inserted(&self, injected: &str) -> String {
        self.with_last(&format!("{}{}", injected, self.last))
    }

    /// Inverse of `parse`.
    pub fn rebuild(&self) -> String {
        self.with_last(&self.last)
    }
}

/// Appends a `/` to bare origins such as `http://host`.
pub fn normalize_target(uri: &str) -> String {
    if uri.split('/').count() < 4 {
        format!("{}/", uri)
    } else {
        uri.to_string()
    }
}

fn path_start(uri: &str) -> usize {
    let authority = uri.find("://").map_or(0, |i| i + 3);
    uri[authority..]
        .find('/')
        .map_or(uri.len(), |i| authority + i)
}
