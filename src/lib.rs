//! Connectivity checks for a local SQL Server login through a TDS driver.
//!
//! Two binaries share this library: `tds-check` logs in over plain TDS and
//! `tds-tls-check` logs in over TLS with a pinned CA certificate. Both run
//! `SELECT 1 AS value`, print every step to stdout and mirror it to a log
//! file.

pub mod check;
pub mod cli;
pub mod driver;
pub mod report;
pub mod tee;
pub mod telemetry;
pub mod tls;
pub mod variant;

pub use variant::Variant;
