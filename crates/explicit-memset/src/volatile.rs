// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Strategy 5: the portable fallback.

use core::sync::atomic::{Ordering, compiler_fence};

/// Writes every byte with `write_volatile`.
///
/// Volatile stores cannot be elided, merged or reordered against each other
/// by the compiler, on any target. Slower than `write_bytes` since each byte
/// is a separate store.
///
/// # Safety
///
/// `ptr` must be valid for writes of `len` bytes.
#[inline(never)]
pub(crate) unsafe fn volatile_fill(ptr: *mut u8, byte: u8, len: usize) {
    for i in 0..len {
        unsafe {
            core::ptr::write_volatile(ptr.add(i), byte);
        }
    }

    // Keep later non-volatile accesses from being hoisted above the fill
    compiler_fence(Ordering::SeqCst);
}
