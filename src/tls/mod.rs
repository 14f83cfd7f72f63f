//! TLS settings and CA certificate inspection
//!
//! The TDS driver performs the handshake itself; this module only carries the
//! settings handed to it and reads the CA certificate to report on it and to
//! derive the TLS identity used when host name validation is off.
//!
//! # Module Organization
//!
//! - `config` - TLS settings for the TLS check
//! - `ca` - CA certificate loading and metadata extraction

pub mod ca;
pub mod config;

// Re-export commonly used types
pub use ca::{CaCertificate, Encoding};
pub use config::TlsConfig;
