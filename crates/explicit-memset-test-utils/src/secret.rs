// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! The marker secret and how it gets onto the stack.

use crate::error::{HarnessError, check};
use crate::scan::matches_at;

/// 128 bits of random data.
pub const SECRET: [u8; 16] = [
    0xa0, 0x6c, 0x0c, 0x81, 0xba, 0xd8, 0x5b, 0x0c, 0xb0, 0xd6, 0xd4, 0xe3, 0xeb, 0x52, 0x5f, 0x96,
];

/// Copies of [`SECRET`] in one secret buffer.
pub const SECRET_COUNT: usize = 64;

/// Size of one secret buffer.
pub const SECRET_BYTES: usize = SECRET_COUNT * SECRET.len();

/// Both ends of a pipe, closed on drop.
struct Pipe {
    read: libc::c_int,
    write: libc::c_int,
}

impl Pipe {
    fn new() -> Result<Self, HarnessError> {
        let mut fds = [0 as libc::c_int; 2];
        check("pipe", unsafe { libc::pipe(fds.as_mut_ptr()) })?;

        Ok(Self {
            read: fds[0],
            write: fds[1],
        })
    }
}

impl Drop for Pipe {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.write);
            libc::close(self.read);
        }
    }
}

fn check_transfer(call: &'static str, rc: isize, expected: usize) -> Result<(), HarnessError> {
    if rc < 0 {
        return Err(HarnessError::last_os_error(call));
    }

    let actual = rc as usize;
    if actual != expected {
        return Err(HarnessError::ShortTransfer {
            call,
            expected,
            actual,
        });
    }

    Ok(())
}

/// Fills `buf` with [`SECRET`] repeated (the last copy truncated if needed).
///
/// The bytes travel through a pipe, so the compiler cannot see what `buf`
/// holds and cannot drop or constant-fold the copy. Only async-signal-safe
/// calls are made; safe to use from a signal handler.
pub fn populate_secret(buf: &mut [u8]) -> Result<(), HarnessError> {
    let pipe = Pipe::new()?;

    for chunk in buf.chunks_mut(SECRET.len()) {
        let len = chunk.len();

        let written = unsafe { libc::write(pipe.write, SECRET.as_ptr().cast(), len) };
        check_transfer("write", written, len)?;

        let read = unsafe { libc::read(pipe.read, chunk.as_mut_ptr().cast(), len) };
        check_transfer("read", read, len)?;
    }

    Ok(())
}

/// Counts intact [`SECRET`] copies among the `SECRET_COUNT` slots at `at`.
///
/// # Safety
///
/// `at` must be readable for `SECRET_BYTES` bytes.
#[inline(never)]
pub unsafe fn count_secrets(at: *const u8) -> usize {
    (0..SECRET_COUNT)
        .filter(|&i| unsafe { matches_at(at.add(i * SECRET.len()), &SECRET) })
        .count()
}
