/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Wall clock used to timestamp data points, in unix epoch milliseconds.
pub trait Clock {
    fn wall_time(&self) -> i64;
}

pub type ArcClock = Arc<dyn Clock + Send + Sync>;

#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn wall_time(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to. Test helper.
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(millis: i64) -> Self {
        ManualClock {
            millis: AtomicI64::new(millis),
        }
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn wall_time(&self) -> i64 {
        self.millis.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual() {
        let clock = ManualClock::new(1000);
        assert_eq!(clock.wall_time(), 1000);
        clock.set(2000);
        assert_eq!(clock.wall_time(), 2000);
    }

    #[test]
    fn system() {
        assert!(SystemClock.wall_time() > 0);
    }
}
