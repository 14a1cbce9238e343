//! Aggregation engine for reporting views.
//!
//! # Responsibility
//! - Select evaluations by look-back or calendar-month windows.
//! - Compute per-student arithmetic means and counts.
//! - Shape results for tables, charts, the daily session sheet and the
//!   dashboard.
//!
//! # Invariants
//! - All functions are pure over a `Database` snapshot and a caller-given
//!   `today`; nothing here reads the clock or the store.
//! - "No data" is `count == 0` with zero means, never an error.

pub mod aggregate;
pub mod dashboard;
pub mod session;
pub mod window;
