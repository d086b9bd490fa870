/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

mod value;
pub use value::MetricValue;

mod statistic;
pub use statistic::Statistic;

mod unit;
pub use unit::TimeUnit;

mod id;
pub use id::{MeterId, MeterKind, MetricTag};

mod clock;
pub use clock::{ArcClock, Clock, ManualClock, SystemClock};

/// One raw statistic of a fallback meter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub statistic: Statistic,
    pub value: f64,
}

impl Measurement {
    pub fn new(statistic: Statistic, value: f64) -> Self {
        Measurement { statistic, value }
    }
}

/// Statistic values of one meter at snapshot time.
///
/// Duration statistics carry the unit the host sampled them in, conversion
/// to the backend base unit happens during point conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum MeterData {
    Timer {
        count: u64,
        sum: f64,
        mean: f64,
        max: f64,
        unit: TimeUnit,
    },
    DistributionSummary {
        count: u64,
        sum: f64,
        mean: f64,
        max: f64,
    },
    FunctionTimer {
        count: f64,
        sum: f64,
        mean: f64,
        unit: TimeUnit,
    },
    TimeGauge {
        value: f64,
        unit: TimeUnit,
    },
    Gauge {
        value: f64,
    },
    FunctionCounter {
        count: f64,
    },
    Counter {
        count: f64,
    },
    LongTaskTimer {
        active_tasks: u64,
        duration: f64,
        unit: TimeUnit,
    },
    Other {
        measurements: Vec<Measurement>,
    },
}

/// An owned snapshot of one host meter taken at flush time.
#[derive(Debug, Clone, PartialEq)]
pub struct Meter {
    pub id: MeterId,
    pub data: MeterData,
}

impl Meter {
    pub fn new(id: MeterId, data: MeterData) -> Self {
        Meter { id, data }
    }
}

/// The host side of the export pipeline. Each flush asks for a fresh
/// snapshot of all registered meters.
pub trait MeterSource {
    fn meters(&self) -> Vec<Meter>;
}

pub type ArcMeterSource = Arc<dyn MeterSource + Send + Sync>;
