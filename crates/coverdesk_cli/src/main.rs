//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `coverdesk_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("coverdesk_core ping={}", coverdesk_core::ping());
    println!("coverdesk_core version={}", coverdesk_core::core_version());
}
