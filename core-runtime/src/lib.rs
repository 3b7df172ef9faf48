//! # Core Runtime Module
//!
//! Provides the shared runtime infrastructure for the playback core:
//! - Logging and tracing infrastructure
//! - Manager configuration
//! - Typed event bus
//! - One-shot readiness latches
//! - The process-wide [`PlaybackContext`](context::PlaybackContext)
//!
//! ## Overview
//!
//! Everything here runs on a single event loop. Shared state uses `Rc`,
//! `Cell` and `RefCell`; there is no locking and no parallelism. Deferred
//! work is expressed as callbacks queued on a latch or registered on the
//! event bus, and runs when the host reports the matching event.

pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod latch;
pub mod logging;

pub use context::PlaybackContext;
pub use error::{Error, Result};
