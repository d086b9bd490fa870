/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

/// The statistic a raw measurement reports, for meters that don't match any
/// of the well known kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Total,
    TotalTime,
    Count,
    Max,
    Value,
    ActiveTasks,
    Duration,
    Unknown,
}

impl Statistic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Statistic::Total => "total",
            Statistic::TotalTime => "totalTime",
            Statistic::Count => "count",
            Statistic::Max => "max",
            Statistic::Value => "value",
            Statistic::ActiveTasks => "activeTasks",
            Statistic::Duration => "duration",
            Statistic::Unknown => "unknown",
        }
    }

    /// The metric name suffix for this statistic: the camelCase display name
    /// with an underscore inserted before each upper-case letter, all
    /// lower-cased. This is part of the wire contract for fallback meters.
    pub fn suffix(&self) -> String {
        let s = self.as_str();
        let mut r = String::with_capacity(s.len() + 2);
        for c in s.chars() {
            if c.is_ascii_uppercase() {
                if !r.is_empty() {
                    r.push('_');
                }
                r.push(c.to_ascii_lowercase());
            } else {
                r.push(c);
            }
        }
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix() {
        assert_eq!(Statistic::Total.suffix(), "total");
        assert_eq!(Statistic::TotalTime.suffix(), "total_time");
        assert_eq!(Statistic::Count.suffix(), "count");
        assert_eq!(Statistic::ActiveTasks.suffix(), "active_tasks");
        assert_eq!(Statistic::Unknown.suffix(), "unknown");
    }
}
