/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io::{self, Write};

use ::http::{HeaderMap, HeaderValue, header};
use anyhow::{Context, anyhow};
use flate2::Compression;
use flate2::write::GzEncoder;
use log::{Level, debug, error, log_enabled, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::batch;
use crate::config::OpentsdbExporterConfig;
use crate::convert;
use crate::naming::{NamingConvention, OpentsdbNamingConvention};
use crate::types::{ArcClock, ArcMeterSource, Meter};

mod auth;
pub use auth::{AuthenticateRequest, BasicAuth};

mod http;
use self::http::{ERR_BODY_MAX_SIZE, HttpEndpoint, RSP_LINE_MAX_SIZE, recv_response_head};

/// Pushes the current values of all meters from a [`crate::types::MeterSource`]
/// to an OpenTSDB server over its http put api.
///
/// Each flush cycle splits the meter snapshot into batches and delivers each
/// batch on a fresh connection. A failed batch is logged and skipped, so one
/// unreachable or rejecting server round never blocks the rest of the cycle.
pub struct OpentsdbExporter {
    config: OpentsdbExporterConfig,
    source: ArcMeterSource,
    clock: ArcClock,
    convention: Box<dyn NamingConvention + Send + Sync>,
    auth_hook: Option<Box<dyn AuthenticateRequest + Send + Sync>>,
    static_headers: HeaderMap,
}

impl OpentsdbExporter {
    pub fn new(config: OpentsdbExporterConfig, source: ArcMeterSource, clock: ArcClock) -> Self {
        let mut static_headers = HeaderMap::new();
        static_headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        static_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        OpentsdbExporter {
            config,
            source,
            clock,
            convention: Box::new(OpentsdbNamingConvention),
            auth_hook: None,
            static_headers,
        }
    }

    pub fn with_naming_convention<C>(mut self, convention: C) -> Self
    where
        C: NamingConvention + Send + Sync + 'static,
    {
        self.convention = Box::new(convention);
        self
    }

    pub fn with_auth_hook<H>(mut self, hook: H) -> Self
    where
        H: AuthenticateRequest + Send + Sync + 'static,
    {
        self.auth_hook = Some(Box::new(hook));
        self
    }

    /// Export one snapshot of all meters now.
    ///
    /// Only a malformed endpoint uri fails the whole cycle. Everything else,
    /// from connect errors to error status codes, is contained to its batch
    /// and logged.
    pub async fn flush(&self) -> anyhow::Result<()> {
        let endpoint = HttpEndpoint::resolve(&self.config.uri)?;
        let meters = self.source.meters();
        for batch in batch::partition(&meters, self.config.batch_size) {
            if let Err(e) = self.send_batch(&endpoint, batch).await {
                error!("failed to send metrics to opentsdb: {e:?}");
            }
        }
        Ok(())
    }

    /// Flush on every step interval until the task is dropped.
    pub async fn into_running(self) {
        let mut interval = tokio::time::interval(self.config.step);
        loop {
            interval.tick().await;
            if let Err(e) = self.flush().await {
                error!("failed to flush metrics: {e:?}");
            }
        }
    }

    fn encode_batch(&self, meters: &[Meter]) -> Vec<u8> {
        let mut body = Vec::<u8>::with_capacity(4096);
        body.push(b'[');
        for meter in meters {
            let wall_time = self.clock.wall_time();
            for point in convert::meter_points(meter, wall_time) {
                if body.len() > 1 {
                    body.push(b',');
                }
                let v = point.to_json(self.convention.as_ref());
                let _ = write!(&mut body, "{v}");
            }
        }
        body.push(b']');
        body
    }

    async fn send_batch(&self, endpoint: &HttpEndpoint, meters: &[Meter]) -> anyhow::Result<()> {
        let raw_body = self.encode_batch(meters);

        let mut extra_headers = HeaderMap::new();
        let body = if self.config.compressed {
            match gzip_payload(&raw_body) {
                Ok(compressed) => {
                    extra_headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
                    compressed
                }
                Err(e) => {
                    warn!("failed to gzip payload, will send uncompressed: {e}");
                    raw_body
                }
            }
        } else {
            raw_body
        };

        if let Some(hook) = &self.auth_hook
            && self.config.user_name.is_some()
            && self.config.password.is_some()
        {
            hook.authenticate_request(&mut extra_headers, &self.config);
        }

        let mut head = Vec::<u8>::with_capacity(256);
        endpoint.write_request_head(&mut head, body.len(), &self.static_headers, &extra_headers);

        let peer = endpoint.peer();
        let mut stream = match tokio::time::timeout(
            self.config.connect_timeout,
            TcpStream::connect(&peer),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(anyhow!("failed to connect to {peer}: {e}")),
            Err(_) => return Err(anyhow!("timeout to connect to {peer}")),
        };

        match tokio::time::timeout(
            self.config.read_timeout,
            self.exchange(&mut stream, &head, &body, meters.len()),
        )
        .await
        {
            Ok(r) => r?,
            Err(_) => return Err(anyhow!("timeout to wait response from {peer}")),
        }

        let _ = stream.shutdown().await;
        Ok(())
    }

    async fn exchange(
        &self,
        stream: &mut TcpStream,
        head: &[u8],
        body: &[u8],
        meter_count: usize,
    ) -> anyhow::Result<()> {
        stream
            .write_all(head)
            .await
            .map_err(|e| anyhow!("failed to send request: {e}"))?;
        stream
            .write_all(body)
            .await
            .map_err(|e| anyhow!("failed to send request: {e}"))?;
        stream
            .flush()
            .await
            .map_err(|e| anyhow!("failed to send request: {e}"))?;

        let mut reader = BufReader::new(stream);
        let rsp = recv_response_head(&mut reader, RSP_LINE_MAX_SIZE)
            .await
            .context("failed to recv response")?;

        match rsp.code {
            200..=299 => debug!("successfully sent {meter_count} meters to opentsdb"),
            code if code >= 400 => {
                if log_enabled!(Level::Error) {
                    let cap = rsp
                        .content_length
                        .unwrap_or(ERR_BODY_MAX_SIZE as u64)
                        .min(ERR_BODY_MAX_SIZE as u64);
                    let mut body_buf = Vec::with_capacity(cap as usize);
                    let _ = (&mut reader).take(cap).read_to_end(&mut body_buf).await;
                    match std::str::from_utf8(&body_buf) {
                        Ok(s) if !s.is_empty() => error!("failed to send metrics: {s}"),
                        _ => error!("failed to send metrics: http {code}"),
                    }
                }
            }
            code => error!("failed to send metrics: http {code}"),
        }
        Ok(())
    }
}

fn gzip_payload(raw: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(
        Vec::with_capacity(raw.len() >> 1),
        Compression::default(),
    );
    encoder.write_all(raw)?;
    encoder.finish()
}
