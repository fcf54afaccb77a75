// File: executor.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::candidate::Candidate;
use crate::config::RunConfig;
use crate::errors::{BypassError, BypassResult};
use crate::wire::{self, RawResponse, RequestTarget};
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;
use std::io;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_native_tls::TlsConnector;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status_code: u16,
    /// Size of the whole response as it came off the wire: status line,
    /// headers and body.
    pub content_length: usize,
}

#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, candidate: &Candidate) -> BypassResult<ProbeResponse>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ProxyEndpoint {
    host: String,
    port: u16,
}

/// Sends each candidate once over a fresh connection. Redirects are never
/// followed and certificates are not verified.
#[derive(Clone)]
pub struct HttpExecutor {
    tls: TlsConnector,
    proxy: Option<ProxyEndpoint>,
    timeout: Duration,
}

impl HttpExecutor {
    pub fn new(config: &RunConfig) -> BypassResult<Self> {
        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .build()
            .map_err(|e| BypassError::Configuration(e.to_string()))?;

        let proxy = match config.proxy() {
            Some(url) => {
                let host = url
                    .host_str()
                    .ok_or_else(|| BypassError::InvalidProxy(url.to_string()))?;
                let port = url
                    .port_or_known_default()
                    .ok_or_else(|| BypassError::InvalidProxy(url.to_string()))?;
                Some(ProxyEndpoint {
                    host: host.to_string(),
                    port,
                })
            }
            None => None,
        };

        Ok(Self {
            tls: TlsConnector::from(tls),
            proxy,
            timeout: Duration::from_secs(config.timeout()),
        })
    }

    async fn send(
        &self,
        method: &Method,
        target: &RequestTarget,
        candidate: &Candidate,
    ) -> BypassResult<RawResponse> {
        let bodiless = *method == Method::HEAD;
        let mut stream = match &self.proxy {
            Some(proxy) => connect(&proxy.host, proxy.port).await?,
            None => connect(&target.host, target.port).await?,
        };

        if !target.tls {
            let request_target = match self.proxy {
                Some(_) => target.absolute_form(),
                None => target.path.clone(),
            };
            let request = wire::build_request(
                method.as_str(),
                &request_target,
                &target.authority,
                &candidate.headers,
            );
            return wire::exchange(&mut stream, &request, bodiless).await;
        }

        if self.proxy.is_some() {
            wire::open_tunnel(&mut stream, &target.tunnel_authority()).await?;
        }
        let mut stream = self
            .tls
            .connect(target.tls_domain(), stream)
            .await
            .map_err(|e| BypassError::Transport(io::Error::other(e)))?;
        let request = wire::build_request(
            method.as_str(),
            &target.path,
            &target.authority,
            &candidate.headers,
        );
        wire::exchange(&mut stream, &request, bodiless).await
    }
}

async fn connect(host: &str, port: u16) -> BypassResult<TcpStream> {
    let addr = format!("{}:{}", host, port);
    match tokio::time::timeout(CONNECT_TIMEOUT, TcpStream::connect(addr.as_str())).await {
        Ok(stream) => Ok(stream?),
        Err(_) => Err(BypassError::Timeout(addr)),
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn execute(&self, candidate: &Candidate) -> BypassResult<ProbeResponse> {
        let method = Method::from_bytes(candidate.method.as_bytes())
            .map_err(|_| BypassError::InvalidMethod(candidate.method.clone()))?;
        for header in &candidate.headers {
            HeaderName::from_bytes(header.name.as_bytes())
                .map_err(|_| BypassError::MalformedEntry(header.label()))?;
            HeaderValue::from_str(&header.value)
                .map_err(|_| BypassError::MalformedEntry(header.label()))?;
        }
        let target = RequestTarget::parse(&candidate.url)?;

        debug!("{} {} [{}]", candidate.method, candidate.url, candidate.label);
        let response = tokio::time::timeout(self.timeout, self.send(&method, &target, candidate))
            .await
            .map_err(|_| BypassError::Timeout(candidate.url.clone()))??;

        Ok(ProbeResponse {
            status_code: response.status_code,
            content_length: response.size(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Header;

    #[test]
    fn test_http_executor_reads_proxy() {
        let mut config = RunConfig::new("http://x/admin");
        config.set_proxy("127.0.0.1:8080").unwrap();
        let executor = HttpExecutor::new(&config).unwrap();
        assert_eq!(
            executor.proxy,
            Some(ProxyEndpoint {
                host: "127.0.0.1".to_string(),
                port: 8080,
            })
        );

        let executor = HttpExecutor::new(&RunConfig::new("http://x/admin")).unwrap();
        assert!(executor.proxy.is_none());
    }

    #[tokio::test]
    async fn test_header_with_newline_is_rejected() {
        let executor = HttpExecutor::new(&RunConfig::new("http://x/admin")).unwrap();
        let candidate = Candidate::new(
            "X-Evil",
            "GET",
            "http://127.0.0.1:1/admin",
            vec![Header::new("X-Evil", "a\r\nInjected: 1")],
        );
        let err = executor.execute(&candidate).await.unwrap_err();
        assert!(matches!(err, BypassError::MalformedEntry(_)));
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_per_candidate() {
        let executor = HttpExecutor::new(&RunConfig::new("http://x/admin")).unwrap();
        let candidate = Candidate::new("ftp", "GET", "ftp://x/admin", vec![]);
        let err = executor.execute(&candidate).await.unwrap_err();
        assert!(!err.is_fatal());
    }
}
