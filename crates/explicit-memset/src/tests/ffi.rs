// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::ffi::c_void;

use crate::explicit_memset_secure_clear;

#[test]
fn test_ffi_entry_point_fills_and_returns_dst() {
    let mut buf = [0xFFu8; 32];
    let dst = buf.as_mut_ptr() as *mut c_void;

    let ret = unsafe { explicit_memset_secure_clear(dst, 0x1_00, buf.len()) };

    assert_eq!(ret, dst);
    assert_eq!(buf, [0u8; 32]);
}
