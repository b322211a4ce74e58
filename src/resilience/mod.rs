//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Resolution request:
//!     → timeouts.rs (run on blocking worker, enforce deadline)
//!     → outcome, or Unresolved(TimedOut)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every lookup has a deadline
//! - No retries: a failed resolution is a permanent answer for that input

pub mod timeouts;

pub use timeouts::resolve_with_deadline;
