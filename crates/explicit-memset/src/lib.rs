// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! explicit_memset - A memory fill the optimizer is not allowed to elide.
//!
//! Clearing a secret with an ordinary fill right before the buffer is freed
//! or goes out of scope is a dead store: the compiler can prove nobody reads
//! it again and remove it, leaving the secret in memory. [`secure_clear`]
//! performs the same fill as `memset` but guarantees the bytes are written.
//!
//! ## Strategy selection
//!
//! The build script picks exactly one strategy per target, in priority order:
//!
//! 1. `explicit_memset(3)` (NetBSD)
//! 2. `memset_s(3)` with `smax == n` (Apple platforms)
//! 3. `explicit_bzero(3)` for zero fills only (Linux glibc/musl, FreeBSD,
//!    OpenBSD, DragonFly, illumos). Non-zero fills use 4 or 5.
//! 4. `write_bytes` followed by the optional clear hook and an empty `asm!`
//!    barrier that may touch all memory
//! 5. a byte-wise `write_volatile` loop
//!
//! The compiled-in choice is exposed as [`STRATEGY`] and [`ZERO_STRATEGY`].
//!
//! ## Features
//!
//! - `portable`: always use the volatile loop
//! - `no-platform`: skip libc primitives (strategies 1-3)
//! - `ffi`: export `explicit_memset_secure_clear` with the C ABI
//!
//! ## Example
//!
//! ```
//! use explicit_memset::{secure_clear_slice, secure_zero};
//!
//! let mut key = [0x42u8; 32];
//! secure_zero(&mut key);
//! assert!(key.iter().all(|&b| b == 0));
//!
//! let mut scratch = [0u8; 16];
//! secure_clear_slice(&mut scratch, 0xA5);
//! assert!(scratch.iter().all(|&b| b == 0xA5));
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

#[cfg(clear_strategy = "fill_with_barrier")]
mod barrier;
#[cfg(feature = "ffi")]
mod ffi;
#[cfg(has_clear_hook)]
mod hook;
#[cfg(any(
    clear_strategy = "explicit_memset",
    clear_strategy = "memset_s",
    has_explicit_bzero
))]
mod platform;
mod strategy;
#[cfg_attr(
    any(
        clear_strategy = "explicit_memset",
        clear_strategy = "memset_s",
        clear_strategy = "fill_with_barrier"
    ),
    allow(dead_code)
)]
mod volatile;

use core::ffi::c_int;

#[cfg(feature = "ffi")]
pub use ffi::explicit_memset_secure_clear;
#[cfg(has_clear_hook)]
#[doc(hidden)]
pub use hook::{ClearHook, set_clear_hook};
pub use strategy::{STRATEGY, Strategy, ZERO_STRATEGY, strategy_for};

#[cfg(clear_strategy = "explicit_memset")]
use platform::explicit_memset as fill;
#[cfg(clear_strategy = "memset_s")]
use platform::memset_s as fill;
#[cfg(clear_strategy = "fill_with_barrier")]
use barrier::fill_with_barrier as fill;
#[cfg(not(any(
    clear_strategy = "explicit_memset",
    clear_strategy = "memset_s",
    clear_strategy = "fill_with_barrier"
)))]
use volatile::volatile_fill as fill;

/// Writes `len` bytes of `value` (converted to `u8`) starting at `ptr`,
/// guaranteed not to be optimized away.
///
/// Same parameter order and meaning as `memset`: `value` is an `int` whose
/// low 8 bits are used, and `ptr` is returned unchanged. The write happens
/// even if the compiler can prove the buffer is never read again (about to be
/// freed or go out of scope).
///
/// A zero `len` performs no writes.
///
/// # Safety
///
/// - `ptr` must be valid for writes of `len` bytes. It may be null or
///   dangling only when `len == 0`.
/// - No other thread may access `[ptr, ptr + len)` concurrently.
///
/// As with `memset`, violating these is undefined behavior; nothing is
/// checked in release builds.
///
/// # Example
///
/// ```
/// use explicit_memset::secure_clear;
///
/// let mut password = *b"hunter2\0";
/// let ptr = password.as_mut_ptr();
///
/// let ret = unsafe { secure_clear(ptr, 0, password.len()) };
///
/// assert_eq!(ret, ptr);
/// assert_eq!(password, [0u8; 8]);
/// ```
#[inline]
pub unsafe fn secure_clear(ptr: *mut u8, value: c_int, len: usize) -> *mut u8 {
    if len == 0 {
        return ptr;
    }

    debug_assert!(!ptr.is_null(), "secure_clear: null pointer with len {len}");

    let byte = value as u8;

    // SAFETY: the caller guarantees `ptr` is valid for `len` writable bytes.
    unsafe {
        #[cfg(has_explicit_bzero)]
        if byte == 0 {
            platform::explicit_bzero(ptr, len);
            return ptr;
        }

        fill(ptr, byte, len);
    }

    ptr
}

/// Fills `buf` with `value` using [`secure_clear`] and returns it.
///
/// # Example
///
/// ```
/// use explicit_memset::secure_clear_slice;
///
/// let mut buf = [1u8, 2, 3, 4];
/// let cleared = secure_clear_slice(&mut buf, 0xFF);
/// assert_eq!(cleared, &[0xFF; 4]);
/// ```
#[inline]
pub fn secure_clear_slice(buf: &mut [u8], value: u8) -> &mut [u8] {
    // SAFETY: a unique borrow covers exactly `buf.len()` writable bytes.
    unsafe {
        secure_clear(buf.as_mut_ptr(), c_int::from(value), buf.len());
    }

    buf
}

/// Zeroes `buf` using [`secure_clear`].
///
/// # Example
///
/// ```
/// use explicit_memset::secure_zero;
///
/// let mut nonce = vec![0x24u8; 24];
/// secure_zero(&mut nonce);
/// assert!(nonce.iter().all(|&b| b == 0));
/// ```
#[inline]
pub fn secure_zero(buf: &mut [u8]) {
    secure_clear_slice(buf, 0);
}
