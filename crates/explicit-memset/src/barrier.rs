// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Strategy 4: plain fill, then make the filled bytes observable.

/// Fills with `write_bytes`, passes the buffer to the clear hook (if any) and
/// ends with [`memory_barrier`].
///
/// `write_bytes` lowers to `memset`, so large buffers keep the vectorized
/// fill. Both follow-ups leave the compiler unable to prove the fill dead.
///
/// # Safety
///
/// `ptr` must be valid for writes of `len` bytes.
#[inline(always)]
pub(crate) unsafe fn fill_with_barrier(ptr: *mut u8, byte: u8, len: usize) {
    unsafe {
        core::ptr::write_bytes(ptr, byte, len);
    }

    #[cfg(has_clear_hook)]
    crate::hook::notify(ptr, len);

    memory_barrier(ptr);
}

/// Empty `asm!` with `ptr` as an input operand.
///
/// No `nomem`/`readonly` option: the compiler must assume the block reads
/// and writes any memory, including everything reachable through `ptr`.
#[inline(always)]
pub(crate) fn memory_barrier(ptr: *mut u8) {
    // SAFETY: the template is a comment; no instructions are emitted.
    unsafe {
        core::arch::asm!("/* {0} */", in(reg) ptr, options(nostack, preserves_flags));
    }
}
