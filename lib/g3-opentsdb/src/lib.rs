/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod batch;
mod convert;

mod types;
pub use types::{
    ArcClock, ArcMeterSource, Clock, ManualClock, Measurement, Meter, MeterData, MeterId,
    MeterKind, MeterSource, MetricTag, MetricValue, Statistic, SystemClock, TimeUnit,
};

mod naming;
pub use naming::{NamingConvention, OpentsdbNamingConvention};

mod point;
pub use point::{DataPoint, DataPointBuilder, SeriesType};

mod config;
pub use config::OpentsdbExporterConfig;

mod export;
pub use export::{AuthenticateRequest, BasicAuth, OpentsdbExporter};
