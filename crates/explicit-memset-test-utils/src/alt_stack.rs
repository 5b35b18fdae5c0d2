// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Alternate signal stack and running a handler on it.

use std::io;
use std::mem::{self, MaybeUninit};
use std::ptr::{self, NonNull};

use crate::error::{HarnessError, check, check_errno};
use crate::secret::SECRET_BYTES;

/// Usable stack for the handler, on top of room for one secret buffer.
///
/// Well above `SIGSTKSZ` so unoptimized handler frames fit.
pub const ALT_STACK_SIZE: usize = 64 * 1024;

/// A heap region installed as the calling thread's alternate signal stack.
///
/// The previous alternate stack (std installs one per thread) is restored
/// on drop. Not `Send`: `sigaltstack` state is per thread.
pub struct AltStack {
    base: NonNull<u8>,
    len: usize,
    previous: libc::stack_t,
}

impl AltStack {
    /// Allocates `ALT_STACK_SIZE + SECRET_BYTES` bytes and installs them.
    pub fn new() -> Result<Self, HarnessError> {
        let len = ALT_STACK_SIZE + SECRET_BYTES;
        let region: &mut [u8] = Box::leak(vec![0u8; len].into_boxed_slice());
        let base = NonNull::from(region).cast::<u8>();

        let stack = libc::stack_t {
            ss_sp: base.as_ptr().cast(),
            ss_flags: 0,
            ss_size: len,
        };
        let mut previous = MaybeUninit::<libc::stack_t>::uninit();

        let rc = unsafe { libc::sigaltstack(&stack, previous.as_mut_ptr()) };
        if let Err(e) = check("sigaltstack", rc) {
            // SAFETY: `base`/`len` come from the leaked box above.
            unsafe { free_region(base, len) };
            return Err(e);
        }

        Ok(Self {
            base,
            len,
            // SAFETY: sigaltstack succeeded and filled `previous`.
            previous: unsafe { previous.assume_init() },
        })
    }

    /// Base address and length of the region.
    pub fn region(&self) -> (*const u8, usize) {
        (self.base.as_ptr(), self.len)
    }

    /// Zeroes the whole region. Call before running a handler so leftovers
    /// from earlier runs cannot be mistaken for new ones.
    pub fn wipe(&self) {
        // SAFETY: we own the region and nothing is executing on it.
        unsafe { ptr::write_bytes(self.base.as_ptr(), 0, self.len) };
    }
}

impl Drop for AltStack {
    fn drop(&mut self) {
        unsafe {
            libc::sigaltstack(&self.previous, ptr::null_mut());
            free_region(self.base, self.len);
        }
    }
}

/// # Safety
///
/// `base`/`len` must come from a leaked `Box<[u8]>` of exactly `len` bytes.
unsafe fn free_region(base: NonNull<u8>, len: usize) {
    let slice = ptr::slice_from_raw_parts_mut(base.as_ptr(), len);
    drop(unsafe { Box::from_raw(slice) });
}

fn query_alt_stack() -> Result<libc::stack_t, HarnessError> {
    let mut current = MaybeUninit::<libc::stack_t>::uninit();
    check("sigaltstack", unsafe {
        libc::sigaltstack(ptr::null(), current.as_mut_ptr())
    })?;

    // SAFETY: sigaltstack succeeded and filled `current`.
    Ok(unsafe { current.assume_init() })
}

/// Base address and size of the calling thread's alternate signal stack.
pub fn current_alt_stack() -> Result<(*const u8, usize), HarnessError> {
    let current = query_alt_stack()?;

    if current.ss_flags & libc::SS_DISABLE != 0 {
        return Err(HarnessError::NoAltStack);
    }

    Ok((current.ss_sp as *const u8, current.ss_size))
}

/// Whether the calling code is executing on the alternate signal stack.
pub fn is_on_alt_stack() -> bool {
    query_alt_stack()
        .map(|s| s.ss_flags & (libc::SS_DISABLE | libc::SS_ONSTACK) == libc::SS_ONSTACK)
        .unwrap_or(false)
}

/// `Err(NotOnAltStack)` unless executing on the alternate signal stack.
pub fn assert_on_alt_stack() -> Result<(), HarnessError> {
    if is_on_alt_stack() {
        Ok(())
    } else {
        Err(HarnessError::NotOnAltStack)
    }
}

/// Restores the thread signal mask on drop.
struct MaskGuard(libc::sigset_t);

impl Drop for MaskGuard {
    fn drop(&mut self) {
        unsafe {
            libc::pthread_sigmask(libc::SIG_SETMASK, &self.0, ptr::null_mut());
        }
    }
}

/// Restores the `SIGUSR1` disposition on drop.
struct ActionGuard(libc::sigaction);

impl Drop for ActionGuard {
    fn drop(&mut self) {
        unsafe {
            libc::sigaction(libc::SIGUSR1, &self.0, ptr::null_mut());
        }
    }
}

/// Runs `handler` once, synchronously, on the alternate signal stack.
///
/// All signals are blocked, `handler` is installed for `SIGUSR1` with
/// `SA_ONSTACK`, `SIGUSR1` is raised and then delivered by `sigsuspend`
/// with only `SIGUSR1` unblocked. Starting from a fully blocked mask avoids
/// flaky runs caused by inherited masks or dispositions. The previous
/// disposition and mask are restored before returning, also on error.
///
/// The disposition is process-wide: callers running in parallel must be
/// serialized (e.g. `#[serial]`).
pub fn call_on_alt_stack(handler: extern "C" fn(libc::c_int)) -> Result<(), HarnessError> {
    // SAFETY: zeroed sigset_t/sigaction are valid inputs to the libc setters
    // and valid output buffers.
    let mut blocked: libc::sigset_t = unsafe { mem::zeroed() };
    let mut previous_mask: libc::sigset_t = unsafe { mem::zeroed() };

    check("sigfillset", unsafe { libc::sigfillset(&mut blocked) })?;
    check_errno("pthread_sigmask", unsafe {
        libc::pthread_sigmask(libc::SIG_BLOCK, &blocked, &mut previous_mask)
    })?;
    let _mask_guard = MaskGuard(previous_mask);

    let mut action: libc::sigaction = unsafe { mem::zeroed() };
    let mut previous_action: libc::sigaction = unsafe { mem::zeroed() };
    action.sa_sigaction = handler as libc::sighandler_t;
    action.sa_flags = libc::SA_ONSTACK;

    check("sigemptyset", unsafe { libc::sigemptyset(&mut action.sa_mask) })?;
    check("sigaction", unsafe {
        libc::sigaction(libc::SIGUSR1, &action, &mut previous_action)
    })?;
    let _action_guard = ActionGuard(previous_action);

    // Stays pending until sigsuspend unblocks it
    if unsafe { libc::raise(libc::SIGUSR1) } != 0 {
        return Err(HarnessError::last_os_error("raise"));
    }

    let mut wait_mask = blocked;
    check("sigdelset", unsafe {
        libc::sigdelset(&mut wait_mask, libc::SIGUSR1)
    })?;

    unsafe { libc::sigsuspend(&wait_mask) };
    let interrupted = io::Error::last_os_error();

    if interrupted.raw_os_error() == Some(libc::EINTR) {
        Ok(())
    } else {
        Err(HarnessError::Syscall {
            call: "sigsuspend",
            source: interrupted,
        })
    }
}
