// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::candidate::Header;
use crate::errors::{BypassError, BypassResult};
use crate::paths::normalize_target;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "dontgo403";
pub const DEFAULT_METHOD: &str = "GET";
pub const DEFAULT_POOL_SIZE: usize = 50;
pub const DEFAULT_TIMEOUT: u64 = 10;
pub const DEFAULT_WORDLIST_FOLDER: &str = "payloads";

#[derive(Debug, Clone)]
pub struct RunConfig {
    target: String,
    proxy: Option<Url>,
    user_agent: String,
    extra_headers: Vec<Header>,
    http_method: String,
    bypass_ip: Option<String>,
    pool_size: usize,
    submission_delay_ms: u64,
    timeout: u64,
    wordlist_folder: PathBuf,
    color: bool,
    progress: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl RunConfig {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            proxy: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            extra_headers: Vec::new(),
            http_method: DEFAULT_METHOD.to_string(),
            bypass_ip: None,
            pool_size: DEFAULT_POOL_SIZE,
            submission_delay_ms: 0,
            timeout: DEFAULT_TIMEOUT,
            wordlist_folder: PathBuf::from(DEFAULT_WORDLIST_FOLDER),
            color: true,
            progress: true,
        }
    }

    /// Checks the target and the numeric limits, then normalizes the target.
    /// Must run before the config is shared with the engine.
    pub fn validate(&mut self) -> BypassResult<()> {
        let parsed = Url::parse(&self.target)?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host().is_none() {
            return Err(BypassError::InvalidTarget(self.target.clone()));
        }
        if self.pool_size == 0 {
            return Err(BypassError::Configuration(
                "pool size must be at least 1".to_string(),
            ));
        }
        if self.timeout == 0 {
            return Err(BypassError::Configuration(
                "timeout must be at least 1 second".to_string(),
            ));
        }
        if self.http_method.trim().is_empty() {
            return Err(BypassError::Configuration(
                "HTTP method must not be empty".to_string(),
            ));
        }
        self.target = normalize_target(&self.target);
        Ok(())
    }

    /// `User-Agent` followed by the operator headers, in order.
    pub fn base_headers(&self) -> Vec<Header> {
        let mut headers = Vec::with_capacity(self.extra_headers.len() + 1);
        headers.push(Header::new("User-Agent", &self.user_agent));
        headers.extend(self.extra_headers.iter().cloned());
        headers
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn set_target(&mut self, target: &str) {
        self.target = target.to_string();
    }

    pub fn proxy(&self) -> Option<&Url> {
        self.proxy.as_ref()
    }

    /// Accepts `host:port` as well as full URLs; a missing scheme means `http://`.
    pub fn set_proxy(&mut self, proxy: &str) -> BypassResult<()> {
        let proxy = proxy.trim();
        if proxy.is_empty() {
            self.proxy = None;
            return Ok(());
        }
        let with_scheme = if proxy.contains("://") {
            proxy.to_string()
        } else {
            format!("http://{}", proxy)
        };
        let parsed =
            Url::parse(&with_scheme).map_err(|e| BypassError::InvalidProxy(e.to_string()))?;
        if parsed.host().is_none() {
            return Err(BypassError::InvalidProxy(with_scheme));
        }
        self.proxy = Some(parsed);
        Ok(())
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn set_user_agent(&mut self, user_agent: &str) {
        if !user_agent.is_empty() {
            self.user_agent = user_agent.to_string();
        }
    }

    pub fn extra_headers(&self) -> &[Header] {
        &self.extra_headers
    }

    pub fn add_header(&mut self, raw: &str) -> BypassResult<()> {
        self.extra_headers.push(Header::parse_colon(raw)?);
        Ok(())
    }

    pub fn http_method(&self) -> &str {
        &self.http_method
    }

    pub fn set_http_method(&mut self, method: &str) {
        self.http_method = method.to_uppercase();
    }

    pub fn bypass_ip(&self) -> Option<&str> {
        self.bypass_ip.as_deref()
    }

    pub fn set_bypass_ip(&mut self, ip: Option<String>) {
        self.bypass_ip = ip.filter(|ip| !ip.trim().is_empty());
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn set_pool_size(&mut self, pool_size: usize) {
        self.pool_size = pool_size;
    }

    pub fn submission_delay(&self) -> Duration {
        Duration::from_millis(self.submission_delay_ms)
    }

    pub fn set_submission_delay_ms(&mut self, delay: u64) {
        self.submission_delay_ms = delay;
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: u64) {
        self.timeout = timeout;
    }

    pub fn wordlist_folder(&self) -> &Path {
        &self.wordlist_folder
    }

    pub fn set_wordlist_folder(&mut self, folder: impl Into<PathBuf>) {
        self.wordlist_folder = folder.into();
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    pub fn progress(&self) -> bool {
        self.progress
    }

    pub fn set_progress(&mut self, progress: bool) {
        self.progress = progress;
    }
}
