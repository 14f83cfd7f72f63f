/// Default location of the driver checkout under test
pub const DEFAULT_DRIVER_SRC: &str = "tiberius/src";

/// Default CA certificate used by the TLS check
pub const DEFAULT_CA: &str = "scripts/certificate/sqlserver.crt";

/// Which of the two connectivity checks is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Plain TDS, no encryption
    Plain,
    /// TDS over TLS with a pinned CA and no host name validation
    Tls,
}

impl Variant {
    #[must_use]
    pub const fn bin_name(self) -> &'static str {
        match self {
            Self::Plain => "tds-check",
            Self::Tls => "tds-tls-check",
        }
    }

    /// Marker prepended to every report line
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Plain => "[TDS-CHECK]",
            Self::Tls => "[TDS-TLS]",
        }
    }

    /// Application name sent in the login packet
    #[must_use]
    pub const fn app_name(self) -> &'static str {
        match self {
            Self::Plain => "tds-local-driver-check",
            Self::Tls => "tds-local-tls-check",
        }
    }

    #[must_use]
    pub const fn default_log(self) -> &'static str {
        match self {
            Self::Plain => "scripts/tds_check.log",
            Self::Tls => "scripts/tds_tls_check.log",
        }
    }

    #[must_use]
    pub const fn failure_label(self) -> &'static str {
        match self {
            Self::Plain => "failed to connect",
            Self::Tls => "failed to connect with TLS",
        }
    }

    #[must_use]
    pub const fn closed_label(self) -> &'static str {
        match self {
            Self::Plain => "connection closed successfully",
            Self::Tls => "TLS connection closed successfully",
        }
    }

    #[must_use]
    pub const fn uses_tls(self) -> bool {
        matches!(self, Self::Tls)
    }
}
