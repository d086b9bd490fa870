/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use base64::prelude::*;
use http::{HeaderMap, HeaderValue, header};

use crate::config::OpentsdbExporterConfig;

/// Hook to mutate the headers of an outgoing request before it is sent.
///
/// The exporter only calls it when both a user name and a password are
/// configured.
pub trait AuthenticateRequest {
    fn authenticate_request(&self, headers: &mut HeaderMap, config: &OpentsdbExporterConfig);
}

/// Sets `Authorization` to the Basic scheme built from the configured
/// user name and password.
#[derive(Default)]
pub struct BasicAuth;

impl AuthenticateRequest for BasicAuth {
    fn authenticate_request(&self, headers: &mut HeaderMap, config: &OpentsdbExporterConfig) {
        let (Some(user), Some(pass)) = (&config.user_name, &config.password) else {
            return;
        };
        let token = BASE64_STANDARD.encode(format!("{user}:{pass}"));
        if let Ok(v) = HeaderValue::from_str(&format!("Basic {token}")) {
            headers.insert(header::AUTHORIZATION, v);
        }
    }
}
