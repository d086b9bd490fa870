/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::num::NonZeroUsize;
use std::time::Duration;

mod yaml;

const DEFAULT_URI: &str = "http://localhost:8086";
const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(10000).unwrap();

/// Config for one OpenTSDB exporter.
///
/// `batch_size` bounds the number of meters per HTTP request. `step` is the
/// interval between flushes when the exporter drives itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpentsdbExporterConfig {
    pub uri: String,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub compressed: bool,
    pub batch_size: NonZeroUsize,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub step: Duration,
}

impl Default for OpentsdbExporterConfig {
    fn default() -> Self {
        OpentsdbExporterConfig {
            uri: DEFAULT_URI.to_string(),
            user_name: None,
            password: None,
            compressed: true,
            batch_size: DEFAULT_BATCH_SIZE,
            connect_timeout: Duration::from_secs(1),
            read_timeout: Duration::from_secs(10),
            step: Duration::from_secs(60),
        }
    }
}

impl OpentsdbExporterConfig {
    pub const PREFIX: &'static str = "opentsdb";
}
