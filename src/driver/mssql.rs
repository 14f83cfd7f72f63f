use super::{ConnectParams, Connection, Driver, DriverSource, Row};
use crate::tls::{CaCertificate, TlsConfig};
use anyhow::{Context, Result, anyhow};
use rustls::pki_types::ServerName;
use serde_json::{Value, json};
use std::{net::IpAddr, path::Path};
use tiberius::{AuthMethod, Client, ColumnData, Config, EncryptionLevel};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, info};

type TcpClient = Client<Compat<TcpStream>>;

/// [`Driver`] backed by `tiberius` over a tokio TCP stream
#[derive(Debug, Clone)]
pub struct MssqlDriver {
    source: DriverSource,
}

impl MssqlDriver {
    #[must_use]
    pub const fn new(source: DriverSource) -> Self {
        Self { source }
    }
}

impl Driver for MssqlDriver {
    type Connection = MssqlConnection;

    fn location(&self) -> &Path {
        self.source.path()
    }

    fn version(&self) -> Option<String> {
        self.source.version().map(str::to_string)
    }

    async fn connect(&self, params: &ConnectParams) -> Result<MssqlConnection> {
        let config = build_config(params)?;

        debug!(
            host = %params.host,
            port = params.port,
            tds_version = %params.tds_version,
            "opening TCP connection"
        );
        let tcp = TcpStream::connect((params.host.as_str(), params.port))
            .await
            .with_context(|| {
                format!(
                    "failed to open TCP connection to {}:{}",
                    params.host, params.port
                )
            })?;
        tcp.set_nodelay(true)?;

        let client = Client::connect(config, tcp.compat_write())
            .await
            .with_context(|| format!("TDS login as {} failed", params.user))?;
        debug!("login complete");

        Ok(MssqlConnection { client })
    }
}

/// Open `tiberius` session
pub struct MssqlConnection {
    client: TcpClient,
}

impl Connection for MssqlConnection {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<TcpClient>()
    }

    async fn fetch_one(&mut self, sql: &str) -> Result<Option<Row>> {
        let stream = self
            .client
            .simple_query(sql)
            .await
            .with_context(|| format!("failed to execute: {sql}"))?;
        let row = stream.into_row().await.context("failed to fetch row")?;
        Ok(row.as_ref().map(to_row))
    }

    async fn close(self) -> Result<()> {
        self.client
            .close()
            .await
            .context("failed to close connection")
    }
}

fn build_config(params: &ConnectParams) -> Result<Config> {
    let mut config = Config::new();
    config.host(&params.host);
    config.port(params.port);
    config.database(&params.database);
    config.application_name(&params.app_name);
    config.authentication(AuthMethod::sql_server(&params.user, &params.password));

    match &params.tls {
        Some(tls) => apply_tls(&mut config, tls)?,
        None => config.encryption(EncryptionLevel::NotSupported),
    }

    Ok(config)
}

/// Require encryption and trust exactly the configured CA
///
/// `tiberius` checks the server certificate against the configured host, so
/// skipping host validation means presenting the CA's own identity instead.
/// That only completes a handshake when the server certificate carries the
/// CA's name, i.e. when the CA file is the server's self-signed certificate.
/// The TCP connection still goes to the real host.
fn apply_tls(config: &mut Config, tls: &TlsConfig) -> Result<()> {
    let ca = CaCertificate::load(&tls.ca)?;
    info!(
        subject = %ca.subject,
        issuer = %ca.issuer,
        expiry_days = ca.expiry_days,
        "loaded CA certificate"
    );

    config.encryption(EncryptionLevel::Required);
    config.trust_cert_ca(tls.ca.display().to_string());

    if !tls.validate_host {
        let name = ca.server_name().with_context(|| {
            format!(
                "CA certificate {} names no host to match against",
                tls.ca.display()
            )
        })?;
        server_name_from_ca(name).with_context(|| {
            format!(
                "CA certificate {} is issued to {name:?}, which is not a usable TLS server name; \
                 without host validation the server certificate must carry the CA's own DNS name \
                 (use --validate-host for a CA-signed server certificate)",
                tls.ca.display()
            )
        })?;
        debug!(tls_name = name, "host name validation disabled");
        config.host(name);
    }

    Ok(())
}

fn server_name_from_ca(name: &str) -> Result<ServerName<'static>> {
    name.parse::<IpAddr>().map_or_else(
        |_| {
            ServerName::try_from(name.to_string())
                .map_err(|_| anyhow!("invalid server name: {name}"))
        },
        |ip| Ok(ServerName::from(ip)),
    )
}

fn to_row(row: &tiberius::Row) -> Row {
    row.cells()
        .map(|(column, data)| (column.name().to_string(), to_json(data)))
        .collect()
}

fn to_json(data: &ColumnData<'_>) -> Value {
    match data {
        ColumnData::U8(v) => json!(v),
        ColumnData::I16(v) => json!(v),
        ColumnData::I32(v) => json!(v),
        ColumnData::I64(v) => json!(v),
        ColumnData::F32(v) => json!(v),
        ColumnData::F64(v) => json!(v),
        ColumnData::Bit(v) => json!(v),
        ColumnData::String(v) => json!(v),
        other => Value::String(format!("{other:?}")),
    }
}
