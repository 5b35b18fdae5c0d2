// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::env;

/// Strategies in priority order. Exactly one is emitted as
/// `cfg(clear_strategy = "...")` per target.
const STRATEGIES: [&str; 4] = [
    "explicit_memset",
    "memset_s",
    "fill_with_barrier",
    "volatile_loop",
];

/// C source that only compiles when the target libc declares
/// `explicit_bzero` (and, for glibc, is at least 2.25).
const EXPLICIT_BZERO_PROBE: &str = "probe/explicit_bzero.c";

fn main() {
    // Declare custom cfgs to suppress unexpected_cfgs warnings
    let values = STRATEGIES
        .iter()
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join(", ");
    println!("cargo:rustc-check-cfg=cfg(clear_strategy, values({values}))");
    println!("cargo:rustc-check-cfg=cfg(has_explicit_bzero)");
    println!("cargo:rustc-check-cfg=cfg(has_clear_hook)");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={EXPLICIT_BZERO_PROBE}");

    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let target_env = env::var("CARGO_CFG_TARGET_ENV").unwrap_or_default();
    let has_atomic_ptr = env::var("CARGO_CFG_TARGET_HAS_ATOMIC")
        .map(|widths| widths.split(',').any(|w| w == "ptr"))
        .unwrap_or(false);

    // `portable` pins the volatile loop regardless of what the target offers
    if env::var_os("CARGO_FEATURE_PORTABLE").is_some() {
        emit_strategy("volatile_loop");
        return;
    }

    let use_platform = env::var_os("CARGO_FEATURE_NO_PLATFORM").is_none();

    if use_platform {
        // explicit_memset(3): NetBSD 7.0+
        if target_os == "netbsd" {
            emit_strategy("explicit_memset");
            return;
        }

        // memset_s(3) from C11 Annex K: shipped by Apple's libc
        if matches!(
            target_os.as_str(),
            "macos" | "ios" | "tvos" | "watchos" | "visionos"
        ) {
            emit_strategy("memset_s");
            return;
        }

        // explicit_bzero(3): glibc 2.25+, musl 1.1.20+, FreeBSD 11+,
        // OpenBSD 5.5+, DragonFly, illumos. Zero fills only.
        // Older glibc/musl sysroots are still valid Linux targets, so ask
        // the target's headers instead of assuming.
        let has_explicit_bzero = match target_os.as_str() {
            "linux" => {
                matches!(target_env.as_str(), "gnu" | "musl") && probe_explicit_bzero()
            }
            "freebsd" | "openbsd" | "dragonfly" | "illumos" => true,
            _ => false,
        };

        if has_explicit_bzero {
            println!("cargo:rustc-cfg=has_explicit_bzero");
        }
    }

    // Stable `asm!` is available on these architectures. Anything else
    // (wasm32, mips, powerpc, ...) falls back to volatile writes.
    let is_asm_eligible = matches!(
        target_arch.as_str(),
        "x86"
            | "x86_64"
            | "arm"
            | "aarch64"
            | "arm64ec"
            | "riscv32"
            | "riscv64"
            | "loongarch64"
            | "s390x"
    );

    if is_asm_eligible {
        emit_strategy("fill_with_barrier");

        if has_atomic_ptr {
            println!("cargo:rustc-cfg=has_clear_hook");
        }
    } else {
        emit_strategy("volatile_loop");
    }
}

fn emit_strategy(strategy: &str) {
    debug_assert!(STRATEGIES.contains(&strategy));
    println!("cargo:rustc-cfg=clear_strategy=\"{strategy}\"");
}

/// Compiles [`EXPLICIT_BZERO_PROBE`] with the target C compiler.
///
/// Failure of any kind (old libc, missing declaration, no C toolchain when
/// cross compiling) means the zero fast path is not used and zero fills go
/// through the generic strategy instead.
fn probe_explicit_bzero() -> bool {
    let available = cc::Build::new()
        .file(EXPLICIT_BZERO_PROBE)
        .flag_if_supported("-Werror=implicit-function-declaration")
        .cargo_metadata(false)
        .cargo_warnings(false)
        .try_compile("explicit_bzero_probe")
        .is_ok();

    if !available {
        println!("cargo:warning=explicit_bzero unavailable, zero fills use the generic strategy");
    }

    available
}
