use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use rustls_pemfile::certs;
use std::{fs, io::Cursor, path::Path};
use x509_parser::prelude::{FromDer, GeneralName, X509Certificate};

/// On-disk encoding of a CA file, chosen by extension the way the TDS driver does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `.pem` or `.crt`
    Pem,
    /// `.der`
    Der,
}

impl Encoding {
    /// Encoding implied by the file extension
    ///
    /// # Errors
    ///
    /// Returns an error for any extension other than `pem`, `crt` or `der`
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("pem" | "crt") => Ok(Self::Pem),
            Some("der") => Ok(Self::Der),
            _ => bail!(
                "unsupported CA certificate extension for {}: expected .pem, .crt or .der",
                path.display()
            ),
        }
    }
}

/// Facts read from a CA certificate file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaCertificate {
    /// Subject DN
    pub subject: String,
    /// Issuer DN
    pub issuer: String,
    /// Days until expiration (negative if expired)
    pub expiry_days: i64,
    /// DNS names from the subject alternative name extension, in order
    pub dns_names: Vec<String>,
    /// First subject common name
    pub common_name: Option<String>,
}

impl CaCertificate {
    /// Read the first certificate from a `.pem`/`.crt` (PEM) or `.der` (DER) file
    ///
    /// The content must match the encoding the extension names, since the
    /// driver decodes the same file by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is unsupported, the file cannot be read
    /// or it holds no certificate in the expected encoding
    pub fn load(path: &Path) -> Result<Self> {
        let encoding = Encoding::from_path(path)?;
        let data = fs::read(path)
            .with_context(|| format!("failed to read CA certificate {}", path.display()))?;
        let der = match encoding {
            Encoding::Pem => first_pem_certificate(&data).with_context(|| {
                format!("invalid CA certificate {}: expected PEM", path.display())
            })?,
            Encoding::Der => data,
        };
        Self::from_der(&der)
            .with_context(|| format!("invalid CA certificate {}", path.display()))
    }

    /// Extract metadata from a DER-encoded certificate
    ///
    /// # Errors
    ///
    /// Returns an error if the certificate cannot be parsed
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let (_, cert) = X509Certificate::from_der(der)
            .map_err(|e| anyhow!("failed to parse certificate: {e}"))?;

        let dns_names = match cert.subject_alternative_name() {
            Ok(Some(san)) => san
                .value
                .general_names
                .iter()
                .filter_map(|name| match name {
                    GeneralName::DNSName(dns) => Some((*dns).to_string()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        let common_name = cert
            .subject()
            .iter_common_name()
            .next()
            .and_then(|cn| cn.as_str().ok())
            .map(str::to_string);

        // Calculate expiry days
        let raw = cert.validity().not_after.to_datetime();
        let not_after =
            chrono::DateTime::<Utc>::from_timestamp(raw.unix_timestamp(), raw.nanosecond())
                .ok_or_else(|| anyhow!("invalid certificate expiry timestamp"))?;
        let expiry_days = (not_after - Utc::now()).num_days();

        Ok(Self {
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            expiry_days,
            dns_names,
            common_name,
        })
    }

    /// Name the certificate vouches for: first DNS SAN, else the common name
    #[must_use]
    pub fn server_name(&self) -> Option<&str> {
        self.dns_names
            .first()
            .map(String::as_str)
            .or(self.common_name.as_deref())
    }
}

fn first_pem_certificate(data: &[u8]) -> Result<Vec<u8>> {
    let mut reader = Cursor::new(data);
    let parsed = certs(&mut reader)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| anyhow!("invalid certificate PEM: {e}"))?;

    parsed
        .into_iter()
        .next()
        .map(|cert| cert.as_ref().to_vec())
        .ok_or_else(|| anyhow!("no certificates found in PEM data"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    #[test]
    fn test_load_pem_with_san() {
        let ca = CaCertificate::load(&fixture("sqlserver.crt")).unwrap();
        assert!(ca.subject.contains("sqlserver"));
        assert_eq!(ca.subject, ca.issuer);
        assert_eq!(ca.dns_names, vec!["sqlserver.dart.local", "sqlserver"]);
        assert_eq!(ca.common_name.as_deref(), Some("sqlserver"));
        assert!(ca.expiry_days > 0);
    }

    #[test]
    fn test_server_name_prefers_dns_san() {
        let ca = CaCertificate::load(&fixture("sqlserver.crt")).unwrap();
        assert_eq!(ca.server_name(), Some("sqlserver.dart.local"));
    }

    #[test]
    fn test_server_name_falls_back_to_common_name() {
        let ca = CaCertificate::load(&fixture("cn_only.crt")).unwrap();
        assert!(ca.dns_names.is_empty());
        assert_eq!(ca.server_name(), Some("mssql-dev"));
    }

    #[test]
    fn test_load_der() {
        let pem = CaCertificate::load(&fixture("sqlserver.crt")).unwrap();
        let der = CaCertificate::load(&fixture("sqlserver.der")).unwrap();
        assert_eq!(pem, der);
    }

    #[test]
    fn test_load_root_ca() {
        let ca = CaCertificate::load(&fixture("root_ca.crt")).unwrap();
        assert!(ca.dns_names.is_empty());
        assert_eq!(ca.common_name.as_deref(), Some("Dart Dev Root CA"));
        assert_eq!(ca.server_name(), Some("Dart Dev Root CA"));
    }

    #[test]
    fn test_encoding_from_extension() {
        assert_eq!(Encoding::from_path(Path::new("a.pem")).unwrap(), Encoding::Pem);
        assert_eq!(Encoding::from_path(Path::new("a.CRT")).unwrap(), Encoding::Pem);
        assert_eq!(Encoding::from_path(Path::new("a.der")).unwrap(), Encoding::Der);
    }

    #[test]
    fn test_unsupported_extension() {
        for name in ["ca.cer", "ca.key", "ca"] {
            let err = CaCertificate::load(Path::new(name)).unwrap_err();
            assert!(
                err.to_string().contains("unsupported CA certificate extension"),
                "{name}: {err:#}"
            );
        }
    }

    #[test]
    fn test_der_content_with_crt_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sqlserver.crt");
        fs::copy(fixture("sqlserver.der"), &path).unwrap();

        let err = CaCertificate::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("expected PEM"));
    }

    #[test]
    fn test_pem_content_with_der_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sqlserver.der");
        fs::copy(fixture("sqlserver.crt"), &path).unwrap();

        let err = CaCertificate::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse certificate"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CaCertificate::load(Path::new("/nonexistent/ca.crt")).unwrap_err();
        assert!(err.to_string().contains("failed to read CA certificate"));
    }

    #[test]
    fn test_pem_without_certificates() {
        let result = first_pem_certificate(b"-----BEGIN NOTHING-----\n-----END NOTHING-----\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_der() {
        let result = CaCertificate::from_der(b"not a certificate");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_server_name_none() {
        let ca = CaCertificate {
            subject: String::new(),
            issuer: String::new(),
            expiry_days: 0,
            dns_names: Vec::new(),
            common_name: None,
        };
        assert_eq!(ca.server_name(), None);
    }
}
