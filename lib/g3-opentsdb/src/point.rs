/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use serde_json::{Map, Number, Value};

use crate::naming::NamingConvention;
use crate::types::{MeterKind, MetricTag, MetricValue};

/// Kind of time series a data point belongs to. Metadata only, it is not
/// part of the wire object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesType {
    Counter,
    Gauge,
    Histogram,
    LongTaskTimer,
    Unknown,
}

impl SeriesType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesType::Counter => "counter",
            SeriesType::Gauge => "gauge",
            SeriesType::Histogram => "histogram",
            SeriesType::LongTaskTimer => "long_task_timer",
            SeriesType::Unknown => "unknown",
        }
    }
}

/// One timestamped sample ready for serialization. Names and tags are kept
/// raw, the naming convention is applied when the point is serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    metric: String,
    timestamp: i64,
    value: MetricValue,
    tags: Vec<MetricTag>,
    series_type: SeriesType,
}

impl DataPoint {
    pub fn builder(metric: impl Into<String>) -> DataPointBuilder {
        DataPointBuilder {
            metric: metric.into(),
            timestamp: 0,
            value: MetricValue::Unsigned(0),
            tags: Vec::new(),
            series_type: SeriesType::Unknown,
        }
    }

    #[inline]
    pub fn metric(&self) -> &str {
        &self.metric
    }

    #[inline]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    #[inline]
    pub fn value(&self) -> MetricValue {
        self.value
    }

    #[inline]
    pub fn tags(&self) -> &[MetricTag] {
        &self.tags
    }

    #[inline]
    pub fn series_type(&self) -> SeriesType {
        self.series_type
    }

    /// Build the wire object for this point. Key order is fixed to
    /// metric / timestamp / value / tags, tags keep their insertion order,
    /// and the value is always a JSON string.
    pub fn to_json(&self, convention: &dyn NamingConvention) -> Value {
        let mut map = Map::with_capacity(4);
        map.insert(
            "metric".to_string(),
            Value::String(convention.name(&self.metric, MeterKind::Other)),
        );
        map.insert(
            "timestamp".to_string(),
            Value::Number(Number::from(self.timestamp)),
        );
        map.insert("value".to_string(), Value::String(self.value.to_string()));

        let mut tags = Map::with_capacity(self.tags.len());
        for tag in &self.tags {
            tags.insert(
                convention.tag_key(tag.key()),
                Value::String(convention.tag_value(tag.value())),
            );
        }
        map.insert("tags".to_string(), Value::Object(tags));

        Value::Object(map)
    }
}

pub struct DataPointBuilder {
    metric: String,
    timestamp: i64,
    value: MetricValue,
    tags: Vec<MetricTag>,
    series_type: SeriesType,
}

impl DataPointBuilder {
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn value(mut self, value: MetricValue) -> Self {
        self.value = value;
        self
    }

    pub fn series_type(mut self, series_type: SeriesType) -> Self {
        self.series_type = series_type;
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(MetricTag::new(key, value));
        self
    }

    pub fn build(self) -> DataPoint {
        DataPoint {
            metric: self.metric,
            timestamp: self.timestamp,
            value: self.value,
            tags: self.tags,
            series_type: self.series_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::OpentsdbNamingConvention;

    #[test]
    fn wire_shape() {
        let point = DataPoint::builder("a.b")
            .timestamp(1000)
            .value(MetricValue::Double(3.5))
            .series_type(SeriesType::Gauge)
            .with_tag("host", "x")
            .build();
        let v = point.to_json(&OpentsdbNamingConvention);
        assert_eq!(
            v.to_string(),
            r#"{"metric":"a.b","timestamp":1000,"value":"3.5","tags":{"host":"x"}}"#
        );
    }

    #[test]
    fn infinite_value() {
        let point = DataPoint::builder("inf")
            .timestamp(1000)
            .value(MetricValue::Double(f64::INFINITY))
            .build();
        let v = point.to_json(&OpentsdbNamingConvention);
        assert_eq!(
            v.to_string(),
            r#"{"metric":"inf","timestamp":1000,"value":"1E400","tags":{}}"#
        );

        let point = DataPoint::builder("inf")
            .timestamp(1000)
            .value(MetricValue::Double(f64::NEG_INFINITY))
            .build();
        let v = point.to_json(&OpentsdbNamingConvention);
        assert_eq!(
            v.to_string(),
            r#"{"metric":"inf","timestamp":1000,"value":"-1E400","tags":{}}"#
        );
    }

    #[test]
    fn convention_and_escaping() {
        let point = DataPoint::builder("queue size")
            .timestamp(42)
            .value(MetricValue::Unsigned(7))
            .with_tag("path", "a=b")
            .with_tag("note", "say \"hi\"")
            .build();
        let v = point.to_json(&OpentsdbNamingConvention);
        assert_eq!(
            v.to_string(),
            r#"{"metric":"queue-size","timestamp":42,"value":"7","tags":{"path":"a-b","note":"say \"hi\""}}"#
        );
    }

    #[test]
    fn tag_insertion_order() {
        let point = DataPoint::builder("m")
            .timestamp(1)
            .value(MetricValue::Unsigned(1))
            .with_tag("z", "1")
            .with_tag("a", "2")
            .build();
        let v = point.to_json(&OpentsdbNamingConvention);
        assert_eq!(
            v.to_string(),
            r#"{"metric":"m","timestamp":1,"value":"1","tags":{"z":"1","a":"2"}}"#
        );
    }
}
