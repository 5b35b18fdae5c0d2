// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Build-time strategy introspection.

use core::ffi::c_int;
use core::fmt;

/// Mechanism used by [`secure_clear`](crate::secure_clear) on this target.
///
/// Variants are listed in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `explicit_memset(3)`.
    ExplicitMemset,
    /// `memset_s(3)` with `smax == n`.
    MemsetS,
    /// `explicit_bzero(3)`. Only ever used for zero fills.
    ExplicitBzero,
    /// `write_bytes`, the optional clear hook, then an `asm!` memory barrier.
    FillWithBarrier,
    /// Byte-wise `write_volatile` loop.
    VolatileLoop,
}

impl Strategy {
    /// Stable lower-case name, e.g. `"fill-with-barrier"`.
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::ExplicitMemset => "explicit-memset",
            Strategy::MemsetS => "memset-s",
            Strategy::ExplicitBzero => "explicit-bzero",
            Strategy::FillWithBarrier => "fill-with-barrier",
            Strategy::VolatileLoop => "volatile-loop",
        }
    }

    /// Whether the fill is delegated to a libc primitive.
    pub const fn is_platform_primitive(self) -> bool {
        matches!(
            self,
            Strategy::ExplicitMemset | Strategy::MemsetS | Strategy::ExplicitBzero
        )
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategy used for non-zero fill values.
#[cfg(clear_strategy = "explicit_memset")]
pub const STRATEGY: Strategy = Strategy::ExplicitMemset;
/// Strategy used for non-zero fill values.
#[cfg(clear_strategy = "memset_s")]
pub const STRATEGY: Strategy = Strategy::MemsetS;
/// Strategy used for non-zero fill values.
#[cfg(clear_strategy = "fill_with_barrier")]
pub const STRATEGY: Strategy = Strategy::FillWithBarrier;
/// Strategy used for non-zero fill values.
#[cfg(not(any(
    clear_strategy = "explicit_memset",
    clear_strategy = "memset_s",
    clear_strategy = "fill_with_barrier"
)))]
pub const STRATEGY: Strategy = Strategy::VolatileLoop;

/// Strategy used when the fill value truncates to zero.
#[cfg(has_explicit_bzero)]
pub const ZERO_STRATEGY: Strategy = Strategy::ExplicitBzero;
/// Strategy used when the fill value truncates to zero.
#[cfg(not(has_explicit_bzero))]
pub const ZERO_STRATEGY: Strategy = STRATEGY;

/// Strategy [`secure_clear`](crate::secure_clear) takes for `value`.
///
/// # Example
///
/// ```
/// use explicit_memset::{STRATEGY, ZERO_STRATEGY, strategy_for};
///
/// assert_eq!(strategy_for(0), ZERO_STRATEGY);
/// assert_eq!(strategy_for(0x100), ZERO_STRATEGY);
/// assert_eq!(strategy_for(0xA5), STRATEGY);
/// ```
pub const fn strategy_for(value: c_int) -> Strategy {
    if value as u8 == 0 {
        ZERO_STRATEGY
    } else {
        STRATEGY
    }
}
