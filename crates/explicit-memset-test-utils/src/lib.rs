// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for explicit-memset.
//!
//! Proves a clear really happened by looking at the memory afterwards:
//!
//! 1. install a dedicated alternate signal stack ([`AltStack`])
//! 2. run a signal handler on it ([`call_on_alt_stack`])
//! 3. inside the handler, fill a stack buffer with [`SECRET`] through a pipe
//!    ([`populate_secret`]) and locate it in the region ([`find_pattern`])
//! 4. return from the function owning the buffer, then count what is left
//!    ([`count_secrets`])
//!
//! The region is scanned while still on the alternate stack: some platforms
//! clobber it after the handler returns.
//!
//! ## License
//!
//! GPL-3.0-only

#![cfg(unix)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod alt_stack;
mod error;
mod scan;
mod secret;

pub use alt_stack::{
    ALT_STACK_SIZE, AltStack, assert_on_alt_stack, call_on_alt_stack, current_alt_stack,
    is_on_alt_stack,
};
pub use error::HarnessError;
pub use scan::find_pattern;
pub use secret::{SECRET, SECRET_BYTES, SECRET_COUNT, count_secrets, populate_secret};
