//! Utility Functions and Cross-Cutting Concerns
//!
//! - **console_macros**: target-aware logging macros (browser console on WASM,
//!   `tracing` elsewhere)
//! - **platform**: user-agent classification for platform and browser

pub mod console_macros;
pub mod platform;

pub use platform::*;
