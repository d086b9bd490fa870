/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;

/// A single sample value as sent on the wire.
///
/// OpenTSDB has no token for non-finite numbers, so the Display impl
/// substitutes the `1E400` / `-1E400` sentinels for infinities and keeps
/// `NaN` as plain text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Double(f64),
    Signed(i64),
    Unsigned(u64),
}

impl MetricValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Double(f) => *f,
            MetricValue::Signed(i) => *i as f64,
            MetricValue::Unsigned(u) => *u as f64,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Unsigned(u) => f.write_str(itoa::Buffer::new().format(*u)),
            MetricValue::Signed(i) => f.write_str(itoa::Buffer::new().format(*i)),
            MetricValue::Double(v) => {
                if v.is_nan() {
                    f.write_str("NaN")
                } else if v.is_infinite() {
                    if v.is_sign_positive() {
                        f.write_str("1E400")
                    } else {
                        f.write_str("-1E400")
                    }
                } else {
                    f.write_str(ryu::Buffer::new().format(*v))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let v = MetricValue::Unsigned(10);
        assert_eq!(v.to_string(), "10");

        let v = MetricValue::Signed(-10);
        assert_eq!(v.to_string(), "-10");

        let v = MetricValue::Double(3.5);
        assert_eq!(v.to_string(), "3.5");
    }

    #[test]
    fn display_non_finite() {
        let v = MetricValue::Double(f64::INFINITY);
        assert_eq!(v.to_string(), "1E400");

        let v = MetricValue::Double(f64::NEG_INFINITY);
        assert_eq!(v.to_string(), "-1E400");

        let v = MetricValue::Double(f64::NAN);
        assert_eq!(v.to_string(), "NaN");
    }

    #[test]
    fn as_f64() {
        assert_eq!(MetricValue::Unsigned(3).as_f64(), 3.0);
        assert_eq!(MetricValue::Signed(-3).as_f64(), -3.0);
        assert_eq!(MetricValue::Double(1.5).as_f64(), 1.5);
    }
}
