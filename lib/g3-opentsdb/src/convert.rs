/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use smallvec::SmallVec;

use crate::point::{DataPoint, SeriesType};
use crate::types::{Meter, MeterData, MeterId, MetricValue};

fn point(id: &MeterId, wall_time: i64, value: MetricValue, series_type: SeriesType) -> DataPoint {
    let mut builder = DataPoint::builder(id.name())
        .timestamp(wall_time)
        .value(value)
        .series_type(series_type);
    for tag in id.tags() {
        builder = builder.with_tag(tag.key(), tag.value());
    }
    builder.build()
}

/// Convert one meter snapshot into its data points, all sharing `wall_time`.
///
/// Timers and distribution summaries expand to four histogram points
/// (`sum`, `count`, `mean`, `upper`), function timers to three (no maximum
/// is tracked for them), long task timers to `active_tasks` plus `duration`.
/// Gauges and counters map to one unsuffixed point, with NaN gauge readings
/// dropped. Every other meter emits one point per raw measurement, suffixed
/// by the snake_case statistic name.
pub(crate) fn meter_points(meter: &Meter, wall_time: i64) -> SmallVec<[DataPoint; 4]> {
    let id = &meter.id;
    let mut points = SmallVec::new();
    match &meter.data {
        MeterData::Timer {
            count,
            sum,
            mean,
            max,
            unit,
        } => {
            points.push(point(
                &id.with_suffix("sum"),
                wall_time,
                MetricValue::Double(unit.to_millis(*sum)),
                SeriesType::Histogram,
            ));
            points.push(point(
                &id.with_suffix("count"),
                wall_time,
                MetricValue::Unsigned(*count),
                SeriesType::Histogram,
            ));
            points.push(point(
                &id.with_suffix("mean"),
                wall_time,
                MetricValue::Double(unit.to_millis(*mean)),
                SeriesType::Histogram,
            ));
            points.push(point(
                &id.with_suffix("upper"),
                wall_time,
                MetricValue::Double(unit.to_millis(*max)),
                SeriesType::Histogram,
            ));
        }
        MeterData::DistributionSummary {
            count,
            sum,
            mean,
            max,
        } => {
            points.push(point(
                &id.with_suffix("sum"),
                wall_time,
                MetricValue::Double(*sum),
                SeriesType::Histogram,
            ));
            points.push(point(
                &id.with_suffix("count"),
                wall_time,
                MetricValue::Unsigned(*count),
                SeriesType::Histogram,
            ));
            points.push(point(
                &id.with_suffix("mean"),
                wall_time,
                MetricValue::Double(*mean),
                SeriesType::Histogram,
            ));
            points.push(point(
                &id.with_suffix("upper"),
                wall_time,
                MetricValue::Double(*max),
                SeriesType::Histogram,
            ));
        }
        MeterData::FunctionTimer {
            count,
            sum,
            mean,
            unit,
        } => {
            points.push(point(
                &id.with_suffix("sum"),
                wall_time,
                MetricValue::Double(unit.to_millis(*sum)),
                SeriesType::Histogram,
            ));
            points.push(point(
                &id.with_suffix("count"),
                wall_time,
                MetricValue::Double(*count),
                SeriesType::Histogram,
            ));
            points.push(point(
                &id.with_suffix("mean"),
                wall_time,
                MetricValue::Double(unit.to_millis(*mean)),
                SeriesType::Histogram,
            ));
        }
        MeterData::TimeGauge { value, unit } => {
            let v = unit.to_millis(*value);
            if !v.is_nan() {
                points.push(point(id, wall_time, MetricValue::Double(v), SeriesType::Gauge));
            }
        }
        MeterData::Gauge { value } => {
            if !value.is_nan() {
                points.push(point(
                    id,
                    wall_time,
                    MetricValue::Double(*value),
                    SeriesType::Gauge,
                ));
            }
        }
        MeterData::FunctionCounter { count } | MeterData::Counter { count } => {
            points.push(point(
                id,
                wall_time,
                MetricValue::Double(*count),
                SeriesType::Counter,
            ));
        }
        MeterData::LongTaskTimer {
            active_tasks,
            duration,
            unit,
        } => {
            points.push(point(
                &id.with_suffix("active_tasks"),
                wall_time,
                MetricValue::Unsigned(*active_tasks),
                SeriesType::LongTaskTimer,
            ));
            points.push(point(
                &id.with_suffix("duration"),
                wall_time,
                MetricValue::Double(unit.to_millis(*duration)),
                SeriesType::LongTaskTimer,
            ));
        }
        MeterData::Other { measurements } => {
            for m in measurements {
                points.push(point(
                    &id.with_suffix(&m.statistic.suffix()),
                    wall_time,
                    MetricValue::Double(m.value),
                    SeriesType::Unknown,
                ));
            }
        }
    }
    points
}
