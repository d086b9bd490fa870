/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io::Write;
use std::str::{FromStr, Utf8Error};

use anyhow::anyhow;
use atoi::FromRadix10;
use http::{HeaderMap, Uri};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::config::OpentsdbExporterConfig;

pub(crate) const RSP_LINE_MAX_SIZE: usize = 4096;
pub(crate) const ERR_BODY_MAX_SIZE: usize = 4096;

#[derive(Debug, Error)]
pub(crate) enum HttpLineParseError {
    #[error("not long enough")]
    NotLongEnough,
    #[error("too long line (> {0})")]
    LineTooLong(usize),
    #[error("invalid utf-8 encoding: {0}")]
    InvalidUtf8Encoding(#[from] Utf8Error),
    #[error("no delimiter '{0}' found")]
    NoDelimiterFound(char),
    #[error("invalid version")]
    InvalidVersion,
    #[error("invalid status code")]
    InvalidStatusCode,
}

pub(crate) struct HttpStatusLine {
    pub(crate) code: u16,
}

impl HttpStatusLine {
    pub(crate) fn parse(buf: &[u8]) -> Result<HttpStatusLine, HttpLineParseError> {
        const MINIMAL_LENGTH: usize = 13; // HTTP/1.x XYZ\n

        if buf.len() < MINIMAL_LENGTH {
            return Err(HttpLineParseError::NotLongEnough);
        }

        let Some(p) = memchr::memchr(b' ', buf) else {
            return Err(HttpLineParseError::NoDelimiterFound(' '));
        };
        match &buf[0..p] {
            b"HTTP/1.0" | b"HTTP/1.1" => {}
            _ => return Err(HttpLineParseError::InvalidVersion),
        }

        let left = &buf[p + 1..];
        let (code, len) = u16::from_radix_10(left);
        if len < 3 {
            return Err(HttpLineParseError::InvalidStatusCode);
        }

        Ok(HttpStatusLine { code })
    }
}

pub(crate) struct HttpHeaderLine<'a> {
    pub(crate) name: &'a str,
    pub(crate) value: &'a str,
}

impl<'a> HttpHeaderLine<'a> {
    pub(crate) fn parse(buf: &'a [u8]) -> Result<HttpHeaderLine<'a>, HttpLineParseError> {
        let line = std::str::from_utf8(buf)?;
        let Some(p) = memchr::memchr(b':', line.as_bytes()) else {
            return Err(HttpLineParseError::NoDelimiterFound(':'));
        };

        let name = line[0..p].trim();
        let value = line[p + 1..].trim();

        Ok(HttpHeaderLine { name, value })
    }
}

/// Where one flush cycle delivers its batches: the configured base uri with
/// the fixed api path appended.
#[derive(Debug)]
pub(crate) struct HttpEndpoint {
    host: String,
    port: u16,
    path: String,
}

impl HttpEndpoint {
    pub(crate) fn resolve(uri: &str) -> anyhow::Result<Self> {
        let full = format!("{uri}/api/put");
        let parsed = Uri::from_str(&full).map_err(|e| {
            anyhow!(
                "malformed publishing endpoint, see '{}.uri': {e}",
                OpentsdbExporterConfig::PREFIX
            )
        })?;
        match parsed.scheme_str() {
            Some("http") => {}
            Some(scheme) => {
                return Err(anyhow!(
                    "malformed publishing endpoint, see '{}.uri': unsupported scheme {scheme}",
                    OpentsdbExporterConfig::PREFIX
                ));
            }
            None => {
                return Err(anyhow!(
                    "malformed publishing endpoint, see '{}.uri': no scheme set",
                    OpentsdbExporterConfig::PREFIX
                ));
            }
        }
        let Some(host) = parsed.host() else {
            return Err(anyhow!(
                "malformed publishing endpoint, see '{}.uri': no host set",
                OpentsdbExporterConfig::PREFIX
            ));
        };
        Ok(HttpEndpoint {
            host: host.to_string(),
            port: parsed.port_u16().unwrap_or(80),
            path: parsed.path().to_string(),
        })
    }

    pub(crate) fn peer(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub(crate) fn write_request_head(
        &self,
        buf: &mut Vec<u8>,
        content_length: usize,
        static_headers: &HeaderMap,
        extra_headers: &HeaderMap,
    ) {
        let _ = write!(buf, "POST {} HTTP/1.1\r\n", self.path);
        let _ = write!(buf, "Host: {}:{}\r\n", self.host, self.port);
        buf.extend_from_slice(b"Connection: close\r\n");
        for (name, value) in static_headers.iter().chain(extra_headers.iter()) {
            let _ = write!(buf, "{name}: ");
            buf.extend_from_slice(value.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }
        let _ = write!(buf, "Content-Length: {content_length}\r\n\r\n");
    }
}

pub(crate) struct HttpResponseHead {
    pub(crate) code: u16,
    pub(crate) content_length: Option<u64>,
}

/// Read and parse the status line and all header lines of a response.
/// Each line read is bounded by `max_line_size`.
pub(crate) async fn recv_response_head<R>(
    reader: &mut R,
    max_line_size: usize,
) -> anyhow::Result<HttpResponseHead>
where
    R: AsyncBufRead + Unpin,
{
    let mut line_buf = Vec::<u8>::with_capacity(256);

    read_line(reader, &mut line_buf, max_line_size).await?;
    let status = HttpStatusLine::parse(&line_buf)?;

    let mut content_length: Option<u64> = None;
    loop {
        read_line(reader, &mut line_buf, max_line_size).await?;
        if line_buf.as_slice() == b"\r\n" || line_buf.as_slice() == b"\n" {
            break;
        }

        let header = HttpHeaderLine::parse(&line_buf)?;
        if header.name.eq_ignore_ascii_case("content-length") {
            let len = u64::from_str(header.value)
                .map_err(|e| anyhow!("invalid content-length header value: {e}"))?;
            content_length = Some(len);
        }
    }

    Ok(HttpResponseHead {
        code: status.code,
        content_length,
    })
}

async fn read_line<R>(reader: &mut R, buf: &mut Vec<u8>, max_size: usize) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let mut limited = reader.take(max_size as u64);
    let nr = limited.read_until(b'\n', buf).await?;
    if nr == 0 {
        return Err(anyhow!("connection closed by peer"));
    }
    if buf.last() != Some(&b'\n') {
        if nr >= max_size {
            return Err(HttpLineParseError::LineTooLong(max_size).into());
        }
        return Err(anyhow!("connection closed by peer with partial line"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderValue, header};
    use tokio::io::BufReader;

    #[test]
    fn status_line() {
        let s = HttpStatusLine::parse(b"HTTP/1.1 200 OK\r\n").unwrap();
        assert_eq!(s.code, 200);

        let s = HttpStatusLine::parse(b"HTTP/1.0 404 Not Found\r\n").unwrap();
        assert_eq!(s.code, 404);

        assert!(HttpStatusLine::parse(b"HTTP/9.9 200 OK\r\n").is_err());
        assert!(HttpStatusLine::parse(b"200\r\n").is_err());
        assert!(HttpStatusLine::parse(b"HTTP/1.1 XY OK\r\n").is_err());
    }

    #[test]
    fn header_line() {
        let h = HttpHeaderLine::parse(b"Content-Length: 12\r\n").unwrap();
        assert_eq!(h.name, "Content-Length");
        assert_eq!(h.value, "12");

        assert!(HttpHeaderLine::parse(b"no colon here\r\n").is_err());
    }

    #[test]
    fn resolve_endpoint() {
        let e = HttpEndpoint::resolve("http://localhost:8086").unwrap();
        assert_eq!(e.peer(), "localhost:8086");
        assert_eq!(e.path, "/api/put");

        let e = HttpEndpoint::resolve("http://tsdb.example.net/db").unwrap();
        assert_eq!(e.peer(), "tsdb.example.net:80");
        assert_eq!(e.path, "/db/api/put");

        let err = HttpEndpoint::resolve("https://localhost:8086").unwrap_err();
        assert!(err.to_string().contains("'opentsdb.uri'"));

        let err = HttpEndpoint::resolve("localhost:8086 oops").unwrap_err();
        assert!(err.to_string().contains("'opentsdb.uri'"));
    }

    #[test]
    fn request_head() {
        let e = HttpEndpoint::resolve("http://127.0.0.1:4242").unwrap();
        let mut static_headers = HeaderMap::new();
        static_headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut extra_headers = HeaderMap::new();
        extra_headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));

        let mut buf = Vec::new();
        e.write_request_head(&mut buf, 42, &static_headers, &extra_headers);
        assert_eq!(
            std::str::from_utf8(&buf).unwrap(),
            "POST /api/put HTTP/1.1\r\n\
             Host: 127.0.0.1:4242\r\n\
             Connection: close\r\n\
             content-type: application/json\r\n\
             content-encoding: gzip\r\n\
             Content-Length: 42\r\n\r\n"
        );
    }

    #[tokio::test]
    async fn response_head() {
        let rsp = b"HTTP/1.1 204 No Content\r\nServer: test\r\nContent-Length: 0\r\n\r\n";
        let mut reader = BufReader::new(&rsp[..]);
        let head = recv_response_head(&mut reader, RSP_LINE_MAX_SIZE).await.unwrap();
        assert_eq!(head.code, 204);
        assert_eq!(head.content_length, Some(0));
    }

    #[tokio::test]
    async fn response_head_no_length() {
        let rsp = b"HTTP/1.1 400 Bad Request\r\n\r\nbody";
        let mut reader = BufReader::new(&rsp[..]);
        let head = recv_response_head(&mut reader, RSP_LINE_MAX_SIZE).await.unwrap();
        assert_eq!(head.code, 400);
        assert_eq!(head.content_length, None);
    }

    #[tokio::test]
    async fn response_head_truncated() {
        let rsp = b"HTTP/1.1 200 OK\r\nServer: test";
        let mut reader = BufReader::new(&rsp[..]);
        assert!(
            recv_response_head(&mut reader, RSP_LINE_MAX_SIZE)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn response_line_too_long() {
        let mut rsp = b"HTTP/1.1 200 OK\r\nX-Filler: ".to_vec();
        rsp.resize(rsp.len() + 64, b'a');
        let mut reader = BufReader::new(&rsp[..]);
        assert!(recv_response_head(&mut reader, 32).await.is_err());
    }
}
