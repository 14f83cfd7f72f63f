use std::path::PathBuf;

/// TLS settings for a TDS connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// CA certificate the server chain must validate against
    pub ca: PathBuf,
    /// Match the server certificate against the configured host name
    pub validate_host: bool,
}

impl TlsConfig {
    /// Trust `ca` and skip host name validation
    #[must_use]
    pub fn new(ca: impl Into<PathBuf>) -> Self {
        Self {
            ca: ca.into(),
            validate_host: false,
        }
    }

    #[must_use]
    pub const fn with_host_validation(mut self, validate_host: bool) -> Self {
        self.validate_host = validate_host;
        self
    }
}
