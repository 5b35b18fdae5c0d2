// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{SECRET, SECRET_BYTES, SECRET_COUNT, count_secrets, populate_secret};

#[test]
fn test_populate_secret_repeats_pattern() {
    let mut buf = vec![0u8; SECRET_BYTES];

    populate_secret(&mut buf).expect("Failed to populate_secret(..)");

    for chunk in buf.chunks(SECRET.len()) {
        assert_eq!(chunk, &SECRET);
    }
}

#[test]
fn test_populate_secret_truncates_last_copy() {
    let mut buf = vec![0u8; SECRET.len() * 2 + 5];

    populate_secret(&mut buf).expect("Failed to populate_secret(..)");

    assert_eq!(&buf[..16], &SECRET);
    assert_eq!(&buf[16..32], &SECRET);
    assert_eq!(&buf[32..], &SECRET[..5]);
}

#[test]
fn test_populate_secret_empty_buffer() {
    let mut buf: [u8; 0] = [];
    populate_secret(&mut buf).expect("Failed to populate_secret(..)");
}

#[test]
fn test_count_secrets_full_and_empty() {
    let mut buf = vec![0u8; SECRET_BYTES];
    assert_eq!(unsafe { count_secrets(buf.as_ptr()) }, 0);

    populate_secret(&mut buf).expect("Failed to populate_secret(..)");
    assert_eq!(unsafe { count_secrets(buf.as_ptr()) }, SECRET_COUNT);
}

#[test]
fn test_count_secrets_partial() {
    let mut buf = vec![0u8; SECRET_BYTES];
    populate_secret(&mut buf).expect("Failed to populate_secret(..)");

    // Damage one byte in three distinct copies
    buf[0] ^= 0xFF;
    buf[16 * 10 + 15] ^= 0xFF;
    buf[SECRET_BYTES - 1] ^= 0xFF;

    assert_eq!(unsafe { count_secrets(buf.as_ptr()) }, SECRET_COUNT - 3);
}
