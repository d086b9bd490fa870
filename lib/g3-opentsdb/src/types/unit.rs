/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

/// Unit of the duration statistics supplied by the host.
///
/// All duration values are converted to milliseconds before they are sent,
/// that is the base time unit of this backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
}

impl TimeUnit {
    pub fn to_millis(&self, v: f64) -> f64 {
        match self {
            TimeUnit::Nanoseconds => v / 1_000_000.0,
            TimeUnit::Microseconds => v / 1_000.0,
            TimeUnit::Milliseconds => v,
            TimeUnit::Seconds => v * 1_000.0,
        }
    }
}
