// File: common/mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(dead_code)]

use async_trait::async_trait;
use dontgo403::candidate::Candidate;
use dontgo403::config::RunConfig;
use dontgo403::errors::{BypassError, BypassResult};
use dontgo403::executor::{Executor, ProbeResponse};
use std::collections::HashMap;
use std::fs;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Answers from a table keyed by candidate label and remembers what it saw.
pub struct StubExecutor {
    responses: HashMap<String, u16>,
    default_status: u16,
    fail_labels: Vec<String>,
    latency: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    seen: Mutex<Vec<Candidate>>,
}

impl StubExecutor {
    pub fn new(default_status: u16) -> Self {
        Self {
            responses: HashMap::new(),
            default_status,
            fail_labels: Vec::new(),
            latency: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(mut self, label: &str, status: u16) -> Self {
        self.responses.insert(label.to_string(), status);
        self
    }

    pub fn fail(mut self, label: &str) -> Self {
        self.fail_labels.push(label.to_string());
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<Candidate> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for StubExecutor {
    async fn execute(&self, candidate: &Candidate) -> BypassResult<ProbeResponse> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.seen.lock().unwrap().push(candidate.clone());

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_labels.contains(&candidate.label) {
            return Err(BypassError::Timeout(candidate.url.clone()));
        }
        let status = self
            .responses
            .get(&candidate.label)
            .copied()
            .unwrap_or(self.default_status);
        Ok(ProbeResponse {
            status_code: status,
            content_length: 100 + candidate.label.len(),
        })
    }
}

pub fn test_config(target: &str) -> RunConfig {
    let mut config = RunConfig::new(target);
    config.set_progress(false);
    config.validate().unwrap();
    config
}

/// Writes every wordlist file, empty unless listed in `entries`.
pub fn write_wordlists(entries: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in ["httpmethods", "headers", "ips", "simpleheaders", "endpaths", "midpaths"] {
        fs::write(dir.path().join(name), "").unwrap();
    }
    for (name, content) in entries {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

/// Plain TCP listener that records every request head byte for byte and
/// answers `200 OK`. Also stands in for a forward proxy.
pub struct RawServer {
    pub addr: SocketAddr,
    heads: Arc<Mutex<Vec<String>>>,
}

impl RawServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let heads = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&heads);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }
                    recorded
                        .lock()
                        .unwrap()
                        .push(String::from_utf8_lossy(&buf).into_owned());
                    let _ = socket
                        .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok")
                        .await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { addr, heads }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn heads(&self) -> Vec<String> {
        self.heads.lock().unwrap().clone()
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.heads()
            .iter()
            .map(|head| head.lines().next().unwrap_or_default().to_string())
            .collect()
    }
}
