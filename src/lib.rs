//! Workspace placeholder crate.
//!
//! This crate exists to expose feature flags that map to the individual
//! workspace crates (`core-playback`, `bridge-wasm`). Host applications can
//! depend on `soundbridge-workspace` and enable the documented features
//! without wiring each crate individually.

#[cfg(feature = "playback")]
pub use core_playback as playback;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use bridge_wasm as wasm;
