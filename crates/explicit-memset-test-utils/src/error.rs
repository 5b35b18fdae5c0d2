// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for explicit-memset-test-utils.
use std::io;

use thiserror::Error;

/// Errors from the signal-stack harness.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A libc call failed; `source` carries `errno`.
    #[error("{call} failed: {source}")]
    Syscall {
        /// Name of the failing call.
        call: &'static str,
        /// `errno` at the time of failure.
        source: io::Error,
    },

    /// `read`/`write` moved fewer bytes than requested.
    #[error("{call} transferred {actual} of {expected} bytes")]
    ShortTransfer {
        /// Name of the call.
        call: &'static str,
        /// Bytes requested.
        expected: usize,
        /// Bytes moved.
        actual: usize,
    },

    /// No alternate signal stack is installed on this thread.
    #[error("no alternate signal stack installed")]
    NoAltStack,

    /// Code expected to run on the alternate stack is running elsewhere.
    #[error("not running on the alternate signal stack")]
    NotOnAltStack,
}

impl HarnessError {
    /// Captures `errno` for a failed libc call.
    pub(crate) fn last_os_error(call: &'static str) -> Self {
        Self::Syscall {
            call,
            source: io::Error::last_os_error(),
        }
    }
}

/// Maps a libc `int` return code to `Result`, capturing `errno` on `-1`.
pub(crate) fn check(call: &'static str, rc: libc::c_int) -> Result<(), HarnessError> {
    if rc == -1 {
        Err(HarnessError::last_os_error(call))
    } else {
        Ok(())
    }
}

/// Maps a pthread-style return code (`0` or an error number) to `Result`.
pub(crate) fn check_errno(call: &'static str, rc: libc::c_int) -> Result<(), HarnessError> {
    if rc == 0 {
        Ok(())
    } else {
        Err(HarnessError::Syscall {
            call,
            source: io::Error::from_raw_os_error(rc),
        })
    }
}
