/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::num::NonZeroUsize;
use std::slice::Chunks;

/// Split the meter set into contiguous windows of `batch_size`, each sent in
/// its own HTTP request. The last window holds the remainder.
pub(crate) fn partition<T>(all: &[T], batch_size: NonZeroUsize) -> Chunks<'_, T> {
    all.chunks(batch_size.get())
}
