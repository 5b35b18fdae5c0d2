// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! C ABI export.

use core::ffi::{c_int, c_void};

/// `memset`-shaped C entry point for [`secure_clear`](crate::secure_clear).
///
/// ```c
/// void *explicit_memset_secure_clear(void *dst, int c, size_t n);
/// ```
///
/// # Safety
///
/// Same contract as [`secure_clear`](crate::secure_clear): `dst` must be
/// valid for writes of `n` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn explicit_memset_secure_clear(
    dst: *mut c_void,
    c: c_int,
    n: usize,
) -> *mut c_void {
    unsafe { crate::secure_clear(dst.cast(), c, n).cast() }
}
