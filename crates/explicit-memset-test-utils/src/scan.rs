// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Raw memory scanning.
//!
//! Every load is volatile: the scanned region is stack memory the compiler
//! considers dead (or in use by another frame), so ordinary reads could be
//! folded away or reordered.

use std::ptr;

/// Finds the first occurrence of `needle` in `[base, base + len)`.
///
/// Returns `None` for an empty needle or one longer than the region.
///
/// # Safety
///
/// `[base, base + len)` must be readable for the duration of the call.
pub unsafe fn find_pattern(base: *const u8, len: usize, needle: &[u8]) -> Option<*const u8> {
    let (&first, _) = needle.split_first()?;
    let last_start = len.checked_sub(needle.len())?;

    (0..=last_start)
        .map(|offset| unsafe { base.add(offset) })
        .find(|&at| unsafe { ptr::read_volatile(at) == first && matches_at(at, needle) })
}

/// Whether the bytes at `at` equal `needle`.
///
/// # Safety
///
/// `at` must be readable for `needle.len()` bytes.
pub(crate) unsafe fn matches_at(at: *const u8, needle: &[u8]) -> bool {
    needle
        .iter()
        .enumerate()
        .all(|(i, &byte)| unsafe { ptr::read_volatile(at.add(i)) } == byte)
}
