/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use crate::types::MeterKind;

/// Maps raw metric and tag names to strings the backend accepts.
///
/// Implementations must be pure: the same input always maps to the same
/// output, with no side effects. Sanitizing here and JSON escaping during
/// serialization are two independent passes, both always applied.
pub trait NamingConvention {
    fn name(&self, name: &str, kind: MeterKind) -> String;

    fn tag_key(&self, key: &str) -> String;

    fn tag_value(&self, value: &str) -> String;
}

/// The default convention: `=`, `,` and space are each replaced by `-`,
/// one replacement per character. Everything else passes through.
#[derive(Default)]
pub struct OpentsdbNamingConvention;

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '=' | ',' | ' ' => '-',
            _ => c,
        })
        .collect()
}

impl NamingConvention for OpentsdbNamingConvention {
    fn name(&self, name: &str, _kind: MeterKind) -> String {
        sanitize(name)
    }

    fn tag_key(&self, key: &str) -> String {
        sanitize(key)
    }

    fn tag_value(&self, value: &str) -> String {
        sanitize(value)
    }
}
