/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterKind {
    Counter,
    Gauge,
    Timer,
    DistributionSummary,
    LongTaskTimer,
    FunctionCounter,
    FunctionTimer,
    TimeGauge,
    Other,
}

/// One key/value pair attached to a meter. Pairs keep their insertion order
/// all the way to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTag {
    key: String,
    value: String,
}

impl MetricTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        MetricTag {
            key: key.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Identity of a host meter: name, ordered tags, optional base unit and
/// description, and the declared kind. The export pipeline only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterId {
    name: String,
    tags: Vec<MetricTag>,
    unit: Option<String>,
    description: Option<String>,
    kind: MeterKind,
}

impl MeterId {
    pub fn new(name: impl Into<String>, kind: MeterKind) -> Self {
        MeterId {
            name: name.into(),
            tags: Vec::new(),
            unit: None,
            description: None,
            kind,
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(MetricTag::new(key, value));
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn tags(&self) -> &[MetricTag] {
        &self.tags
    }

    #[inline]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    pub fn kind(&self) -> MeterKind {
        self.kind
    }

    /// Copy tags, unit, description and kind, but append `.suffix` to the
    /// name. The derived id only lives for the duration of one conversion.
    pub(crate) fn with_suffix(&self, suffix: &str) -> MeterId {
        MeterId {
            name: format!("{}.{suffix}", self.name),
            tags: self.tags.clone(),
            unit: self.unit.clone(),
            description: self.description.clone(),
            kind: self.kind,
        }
    }
}
