// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Optional clear hook.
//!
//! Stable Rust has no weak linkage, so the "maybe somebody observes this
//! buffer" deterrent is a process-global slot instead: it is public and
//! atomic, so the compiler can never prove it empty at the fill site.
//! Nothing in this crate depends on what the hook does.

use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

/// Callback invoked with `(ptr, len)` right after a strategy-4 fill.
///
/// Called from whatever context `secure_clear` runs in, including signal
/// handlers, so it must not allocate or lock.
pub type ClearHook = fn(ptr: *const u8, len: usize);

static CLEAR_HOOK: AtomicPtr<()> = AtomicPtr::new(ptr::null_mut());

/// Installs (or with `None`, removes) the clear hook and returns the
/// previous one.
///
/// Only fills that go through `write_bytes` + barrier report to the hook.
/// Platform primitives and the volatile fallback do not.
pub fn set_clear_hook(hook: Option<ClearHook>) -> Option<ClearHook> {
    let raw = hook.map_or(ptr::null_mut(), |f| f as *mut ());
    let previous = CLEAR_HOOK.swap(raw, Ordering::AcqRel);

    // SAFETY: the slot only ever holds null or a `ClearHook`.
    unsafe { from_raw(previous) }
}

#[inline(always)]
pub(crate) fn notify(ptr: *const u8, len: usize) {
    let raw = CLEAR_HOOK.load(Ordering::Acquire);

    // SAFETY: the slot only ever holds null or a `ClearHook`.
    if let Some(hook) = unsafe { from_raw(raw) } {
        hook(ptr, len);
    }
}

/// # Safety
///
/// `raw` must be null or a `ClearHook` cast to `*mut ()`.
#[inline(always)]
unsafe fn from_raw(raw: *mut ()) -> Option<ClearHook> {
    if raw.is_null() {
        None
    } else {
        Some(unsafe { core::mem::transmute::<*mut (), ClearHook>(raw) })
    }
}
