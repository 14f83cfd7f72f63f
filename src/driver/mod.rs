//! Seam between the check routine and the TDS driver
//!
//! The check only talks to [`Driver`] and [`Connection`]; [`MssqlDriver`] is
//! the production implementation on top of `tiberius`, tests plug in doubles.

mod mssql;
mod source;

pub use mssql::{MssqlConnection, MssqlDriver};
pub use source::DriverSource;

use crate::tls::TlsConfig;
use anyhow::Result;
use serde_json::{Map, Value};
use std::{fmt, path::Path};

/// TDS protocol revision requested at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TdsVersion {
    /// SQL Server 2012 and later
    #[default]
    V7_4,
}

impl fmt::Display for TdsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V7_4 => f.write_str("7.4"),
        }
    }
}

/// Everything needed to open one connection
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectParams {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub app_name: String,
    pub tds_version: TdsVersion,
    /// `None` disables encryption
    pub tls: Option<TlsConfig>,
}

impl ConnectParams {
    /// One-line description of where the check logs in
    #[must_use]
    pub fn target(&self) -> String {
        format!(
            "user={} host={} port={} db={}",
            self.user, self.host, self.port, self.database
        )
    }
}

impl fmt::Debug for ConnectParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"********")
            .field("app_name", &self.app_name)
            .field("tds_version", &self.tds_version)
            .field("tls", &self.tls)
            .finish()
    }
}

/// One result row as column name / value pairs in column order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// Renders as a JSON object, e.g. `{"value":1}`
impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let object: Map<String, Value> = self.columns.iter().cloned().collect();
        write!(f, "{}", Value::Object(object))
    }
}

/// A TDS client library under test
pub trait Driver {
    type Connection: Connection;

    /// Where the driver's source tree lives
    fn location(&self) -> &Path;

    /// Version the driver reports, if any
    fn version(&self) -> Option<String>;

    /// Open and authenticate one connection
    fn connect(&self, params: &ConnectParams) -> impl Future<Output = Result<Self::Connection>>;
}

/// An authenticated session returned by [`Driver::connect`]
pub trait Connection {
    /// Concrete type of the underlying client
    fn type_name(&self) -> &'static str;

    /// Run `sql` and return its first row
    ///
    /// The result stream is dropped before this returns, whatever the outcome.
    fn fetch_one(&mut self, sql: &str) -> impl Future<Output = Result<Option<Row>>>;

    /// Close the session
    fn close(self) -> impl Future<Output = Result<()>>;
}
