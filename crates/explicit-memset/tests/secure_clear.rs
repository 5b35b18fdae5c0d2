// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

#[cfg(test)]
mod secure_clear_tests {
    use core::ffi::c_int;

    use explicit_memset::{secure_clear, secure_clear_slice, secure_zero};
    use proptest::prelude::*;

    const MAX_LEN: usize = 300;

    #[test]
    fn test_secure_clear_all_lengths_and_values() {
        for len in 0..=MAX_LEN {
            for value in [0x00, 0x01, 0x7F, 0x80, 0xA5, 0xFF] {
                let mut buf = vec![!(value as u8); len];

                unsafe { secure_clear(buf.as_mut_ptr(), value, len) };

                assert!(
                    buf.iter().all(|&b| b == value as u8),
                    "len {len}, value {value:#x}"
                );
            }
        }
    }

    #[test]
    fn test_secure_clear_truncates_value_to_low_byte() {
        let cases: [(c_int, u8); 6] = [
            (0x100, 0x00),
            (0x1A5, 0xA5),
            (-1, 0xFF),
            (-256, 0x00),
            (i32::MAX, 0xFF),
            (i32::MIN, 0x00),
        ];

        for (value, expected) in cases {
            let mut buf = [0x42u8; 24];

            unsafe { secure_clear(buf.as_mut_ptr(), value, buf.len()) };

            assert_eq!(buf, [expected; 24], "value {value:#x}");
        }
    }

    #[test]
    fn test_secure_clear_zero_len_is_noop() {
        let mut buf = [0xC3u8; 16];
        let ptr = buf.as_mut_ptr();

        let ret = unsafe { secure_clear(ptr, 0, 0) };

        assert_eq!(ret, ptr);
        assert_eq!(buf, [0xC3; 16]);
    }

    #[test]
    fn test_secure_clear_zero_len_accepts_null() {
        let ret = unsafe { secure_clear(core::ptr::null_mut(), 0xFF, 0) };
        assert!(ret.is_null());
    }

    #[test]
    fn test_secure_clear_returns_ptr() {
        let mut buf = vec![1u8; 64];
        let ptr = buf.as_mut_ptr();

        assert_eq!(unsafe { secure_clear(ptr, 0, 64) }, ptr);
        assert_eq!(unsafe { secure_clear(ptr, 0xEE, 64) }, ptr);
    }

    #[test]
    fn test_secure_clear_is_idempotent() {
        let mut once = vec![0x99u8; 100];
        let mut twice = once.clone();

        unsafe {
            secure_clear(once.as_mut_ptr(), 0x3C, once.len());
            secure_clear(twice.as_mut_ptr(), 0x3C, twice.len());
            secure_clear(twice.as_mut_ptr(), 0x3C, twice.len());
        }

        assert_eq!(once, twice);
    }

    #[test]
    fn test_secure_clear_does_not_write_past_len() {
        let mut buf = [0xAAu8; 32];

        unsafe { secure_clear(buf.as_mut_ptr().add(8), 0, 16) };

        assert_eq!(&buf[..8], &[0xAA; 8]);
        assert_eq!(&buf[8..24], &[0x00; 16]);
        assert_eq!(&buf[24..], &[0xAA; 8]);
    }

    #[test]
    fn test_secure_clear_unaligned_start() {
        let mut buf = vec![0x11u8; 1024 + 7];

        unsafe { secure_clear(buf.as_mut_ptr().add(3), 0x00, 1024) };

        assert_eq!(&buf[..3], &[0x11; 3]);
        assert!(buf[3..1027].iter().all(|&b| b == 0));
        assert_eq!(&buf[1027..], &[0x11; 4]);
    }

    #[test]
    fn test_secure_clear_large_buffer() {
        let mut buf = vec![0xFFu8; 1 << 20];

        unsafe { secure_clear(buf.as_mut_ptr(), 0, buf.len()) };

        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_secure_clear_slice_returns_same_slice() {
        let mut buf = [9u8; 12];
        let ptr = buf.as_ptr();

        let cleared = secure_clear_slice(&mut buf, 0x5A);

        assert_eq!(cleared.as_ptr(), ptr);
        assert_eq!(cleared.len(), 12);
        assert!(cleared.iter().all(|&b| b == 0x5A));
    }

    #[test]
    fn test_secure_clear_slice_empty() {
        let mut buf: [u8; 0] = [];
        assert!(secure_clear_slice(&mut buf, 0xFF).is_empty());
    }

    #[test]
    fn test_secure_zero() {
        let mut key = *b"correct horse battery staple";

        secure_zero(&mut key);

        assert!(key.iter().all(|&b| b == 0));
    }

    proptest! {
        #[test]
        fn prop_every_byte_equals_value(
            mut buf in proptest::collection::vec(any::<u8>(), 0..=512),
            value in any::<c_int>()
        ) {
            let len = buf.len();
            let ptr = buf.as_mut_ptr();

            let ret = unsafe { secure_clear(ptr, value, len) };

            prop_assert_eq!(ret, ptr);
            prop_assert!(buf.iter().all(|&b| b == value as u8));
        }

        #[test]
        fn prop_prefix_clear_leaves_suffix(
            buf in proptest::collection::vec(any::<u8>(), 1..=256),
            split in any::<prop::sample::Index>(),
            value in any::<u8>()
        ) {
            let mid = split.index(buf.len());
            let mut cleared = buf.clone();

            secure_clear_slice(&mut cleared[..mid], value);

            prop_assert!(cleared[..mid].iter().all(|&b| b == value));
            prop_assert_eq!(&cleared[mid..], &buf[mid..]);
        }
    }
}
