// File: wire.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

//! HTTP/1.1 framing written and read by hand.
//!
//! Candidate URLs carry payloads such as `%2e%2e/` or `/..` that a URL
//! parser would fold away, so the request-target goes on the wire exactly
//! as the candidate spells it.

use crate::candidate::Header;
use crate::errors::{BypassError, BypassResult};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

const MAX_HEADERS: usize = 128;
const MAX_HEAD_BYTES: usize = 64 * 1024;

/// Where a candidate URL points and what its request line carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub tls: bool,
    pub host: String,
    pub port: u16,
    /// Host header value, as written in the URL minus any userinfo.
    pub authority: String,
    /// Path and query, untouched.
    pub path: String,
    scheme: String,
}

impl RequestTarget {
    pub fn parse(url: &str) -> BypassResult<Self> {
        let malformed = || BypassError::MalformedEntry(url.to_string());

        let (scheme, rest) = url.split_once("://").ok_or_else(malformed)?;
        let scheme = scheme.to_ascii_lowercase();
        let tls = match scheme.as_str() {
            "http" => false,
            "https" => true,
            _ => return Err(malformed()),
        };

        let rest = rest.split('#').next().unwrap_or_default();
        let (authority, path) = match rest.find(|c: char| c == '/' || c == '?') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        let authority = authority.rsplit('@').next().unwrap_or_default();
        let path = match path.chars().next() {
            None => "/".to_string(),
            Some('?') => format!("/{}", path),
            Some(_) => path.to_string(),
        };

        let default_port = if tls { 443 } else { 80 };
        let (host, port) = if authority.starts_with('[') {
            let end = authority.find(']').ok_or_else(malformed)?;
            let port = match authority[end + 1..].strip_prefix(':') {
                Some(port) => port.parse().map_err(|_| malformed())?,
                None => default_port,
            };
            (&authority[..=end], port)
        } else {
            match authority.rsplit_once(':') {
                Some((host, port)) => (host, port.parse().map_err(|_| malformed())?),
                None => (authority, default_port),
            }
        };
        if host.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            tls,
            host: host.to_string(),
            port,
            authority: authority.to_string(),
            path,
            scheme,
        })
    }

    /// Request-target used when talking to a forward proxy.
    pub fn absolute_form(&self) -> String {
        format!("{}://{}{}", self.scheme, self.authority, self.path)
    }

    /// `host:port` for a CONNECT tunnel.
    pub fn tunnel_authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Host name for SNI and certificate checks, without IPv6 brackets.
    pub fn tls_domain(&self) -> &str {
        self.host.trim_start_matches('[').trim_end_matches(']')
    }
}

/// Serializes a request with no body. `Host` comes from the URL unless the
/// candidate already carries one.
pub fn build_request(
    method: &str,
    request_target: &str,
    authority: &str,
    headers: &[Header],
) -> Vec<u8> {
    let mut request = format!("{} {} HTTP/1.1\r\n", method, request_target);
    if !headers.iter().any(|h| h.name.eq_ignore_ascii_case("host")) {
        request.push_str(&format!("Host: {}\r\n", authority));
    }
    for header in headers {
        request.push_str(&format!("{}: {}\r\n", header.name, header.value));
    }
    request.push_str("Connection: close\r\n\r\n");
    request.into_bytes()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawResponse {
    pub status_code: u16,
    /// Status line and header block, final blank line included.
    pub head_len: usize,
    /// Body length after transfer decoding.
    pub body_len: usize,
}

impl RawResponse {
    pub fn size(&self) -> usize {
        self.head_len + self.body_len
    }
}

/// Tries to frame a complete response out of `buf`. Returns `None` while
/// more bytes are needed. Interim 1xx responses are skipped.
pub fn parse_response(
    buf: &[u8],
    eof: bool,
    bodiless: bool,
) -> BypassResult<Option<RawResponse>> {
    let mut offset = 0;
    loop {
        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
        let mut response = httparse::Response::new(&mut headers);
        let head_len = match response.parse(&buf[offset..]) {
            Ok(httparse::Status::Complete(len)) => len,
            Ok(httparse::Status::Partial) => return Ok(None),
            Err(e) => return Err(invalid_data(e.to_string())),
        };
        let status_code = response.code.unwrap_or_default();
        if (100..200).contains(&status_code) && status_code != 101 {
            offset += head_len;
            continue;
        }

        let body = &buf[offset + head_len..];
        let body_len = if bodiless || matches!(status_code, 101 | 204 | 304) {
            Some(0)
        } else if is_chunked(response.headers) {
            chunked_body_len(body)?
        } else if let Some(len) = content_length(response.headers)? {
            (body.len() >= len).then_some(len)
        } else if eof {
            Some(body.len())
        } else {
            None
        };

        return Ok(body_len.map(|body_len| RawResponse {
            status_code,
            head_len,
            body_len,
        }));
    }
}

fn header_str<'a>(headers: &'a [httparse::Header<'_>], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .and_then(|h| std::str::from_utf8(h.value).ok())
}

fn is_chunked(headers: &[httparse::Header<'_>]) -> bool {
    header_str(headers, "transfer-encoding")
        .is_some_and(|v| v.to_ascii_lowercase().contains("chunked"))
}

fn content_length(headers: &[httparse::Header<'_>]) -> BypassResult<Option<usize>> {
    match header_str(headers, "content-length") {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid_data(format!("bad content-length: {}", value))),
        None => Ok(None),
    }
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// Decoded length of a chunked body, or `None` if the terminating chunk
/// and trailers have not arrived yet.
fn chunked_body_len(body: &[u8]) -> BypassResult<Option<usize>> {
    let mut pos = 0;
    let mut total = 0;
    loop {
        let Some(line_len) = find_crlf(&body[pos..]) else {
            return Ok(None);
        };
        let line = String::from_utf8_lossy(&body[pos..pos + line_len]);
        let size_text = line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_text, 16)
            .map_err(|_| invalid_data(format!("bad chunk size: {}", size_text)))?;
        pos += line_len + 2;

        if size == 0 {
            loop {
                let Some(trailer_len) = find_crlf(&body[pos..]) else {
                    return Ok(None);
                };
                pos += trailer_len + 2;
                if trailer_len == 0 {
                    return Ok(Some(total));
                }
            }
        }

        if body.len() < pos + size + 2 {
            return Ok(None);
        }
        pos += size + 2;
        total += size;
    }
}

fn invalid_data(msg: String) -> BypassError {
    BypassError::Transport(io::Error::new(io::ErrorKind::InvalidData, msg))
}

/// Writes `request` and reads until one response is framed.
pub async fn exchange<S>(
    stream: &mut S,
    request: &[u8],
    bodiless: bool,
) -> BypassResult<RawResponse>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(request).await?;
    stream.flush().await?;

    let mut buf = Vec::with_capacity(4096);
    let mut chunk = [0u8; 4096];
    loop {
        let n = match stream.read(&mut chunk).await {
            Ok(n) => n,
            // TLS peers often close without close_notify
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => 0,
            Err(e) => return Err(e.into()),
        };
        buf.extend_from_slice(&chunk[..n]);
        if let Some(response) = parse_response(&buf, n == 0, bodiless)? {
            return Ok(response);
        }
        if n == 0 {
            return Err(BypassError::Transport(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed before the response was complete",
            )));
        }
    }
}

/// Asks a forward proxy for a CONNECT tunnel to `authority`.
pub async fn open_tunnel<S>(stream: &mut S, authority: &str) -> BypassResult<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let request = format!("CONNECT {0} HTTP/1.1\r\nHost: {0}\r\n\r\n", authority);
    stream.write_all(request.as_bytes()).await?;
    stream.flush().await?;

    // One byte at a time so nothing of the TLS handshake is swallowed.
    let mut head = Vec::new();
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        if stream.read(&mut byte).await? == 0 {
            return Err(BypassError::Transport(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "proxy closed the connection during CONNECT",
            )));
        }
        head.push(byte[0]);
        if head.len() > MAX_HEAD_BYTES {
            return Err(invalid_data("oversized CONNECT response".to_string()));
        }
    }

    let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut response = httparse::Response::new(&mut headers);
    response
        .parse(&head)
        .map_err(|e| invalid_data(e.to_string()))?;
    match response.code {
        Some(code) if (200..300).contains(&code) => Ok(()),
        code => Err(BypassError::Transport(io::Error::other(format!(
            "proxy refused tunnel to {}: {}",
            authority,
            code.unwrap_or_default()
        )))),
    }
}
