// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! libc primitives that are specified to never be optimized away.

use core::ffi::c_void;
#[cfg(any(clear_strategy = "explicit_memset", clear_strategy = "memset_s"))]
use core::ffi::c_int;

unsafe extern "C" {
    #[cfg(clear_strategy = "explicit_memset")]
    #[link_name = "explicit_memset"]
    fn sys_explicit_memset(b: *mut c_void, c: c_int, len: usize) -> *mut c_void;

    #[cfg(clear_strategy = "memset_s")]
    #[link_name = "memset_s"]
    fn sys_memset_s(s: *mut c_void, smax: usize, c: c_int, n: usize) -> c_int;

    #[cfg(has_explicit_bzero)]
    #[link_name = "explicit_bzero"]
    fn sys_explicit_bzero(s: *mut c_void, len: usize);
}

/// Strategy 1: NetBSD `explicit_memset(3)`.
///
/// # Safety
///
/// `ptr` must be valid for writes of `len` bytes.
#[cfg(clear_strategy = "explicit_memset")]
#[inline(always)]
pub(crate) unsafe fn explicit_memset(ptr: *mut u8, byte: u8, len: usize) {
    unsafe {
        sys_explicit_memset(ptr.cast(), c_int::from(byte), len);
    }
}

/// Strategy 2: C11 Annex K `memset_s(3)`.
///
/// `smax == n`, so the only failures are a null `s` or `n > RSIZE_MAX`,
/// both excluded by the caller contract. The return code carries nothing.
///
/// # Safety
///
/// `ptr` must be valid for writes of `len` bytes.
#[cfg(clear_strategy = "memset_s")]
#[inline(always)]
pub(crate) unsafe fn memset_s(ptr: *mut u8, byte: u8, len: usize) {
    let _ = unsafe { sys_memset_s(ptr.cast(), len, c_int::from(byte), len) };
}

/// Strategy 3: `explicit_bzero(3)`, zero fills only.
///
/// # Safety
///
/// `ptr` must be valid for writes of `len` bytes.
#[cfg(has_explicit_bzero)]
#[inline(always)]
pub(crate) unsafe fn explicit_bzero(ptr: *mut u8, len: usize) {
    unsafe { sys_explicit_bzero(ptr.cast(), len) }
}
