//! Structured logging for the form engine.
//!
//! The engine emits `tracing` events and spans everywhere state moves:
//!
//! - `trace`: every dispatched action with the resulting lifecycle flags
//! - `debug`: `set_field`, `submit` and `validate` spans, stale validation
//!   results being discarded, submit guard decisions
//!
//! Hosts that already install a subscriber need nothing from this module.
//! Others can call [`init_tracing`] once at startup.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`

mod init;

pub use init::init_tracing;
