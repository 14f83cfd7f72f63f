#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::{
    env, fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

/// Environment variables the binaries read; cleared so the host setup cannot leak in
pub const TDSCHECK_ENV: &[&str] = &[
    "TDSCHECK_HOST",
    "TDSCHECK_PORT",
    "TDSCHECK_DATABASE",
    "TDSCHECK_USER",
    "TDSCHECK_PASSWORD",
    "TDSCHECK_APP_NAME",
    "TDSCHECK_DRIVER_SRC",
    "TDSCHECK_LOG",
    "TDSCHECK_TRACE_EVENTS",
    "TDSCHECK_TLS_CA",
    "TDSCHECK_TLS_VALIDATE_HOST",
    "RUST_LOG",
];

pub fn skip_if_no_mssql() -> bool {
    env::var("SKIP_MSSQL_TESTS").is_ok()
}

/// Host of the live SQL Server used by ignored tests
pub fn mssql_host() -> String {
    env::var("TEST_MSSQL_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// CA certificate of the live SQL Server used by ignored TLS tests
pub fn mssql_ca_cert() -> Option<PathBuf> {
    env::var("MSSQL_CA_CERT")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            let path = PathBuf::from("scripts/certificate/sqlserver.crt");
            if path.exists() { Some(path) } else { None }
        })
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn pick_free_port() -> u16 {
    std::net::TcpListener::bind(("127.0.0.1", 0))
        .expect("failed to bind random local port")
        .local_addr()
        .expect("failed to read local addr")
        .port()
}

/// Lay out `<root>/tiberius/{Cargo.toml,src}` and return the `src` path
pub fn driver_checkout(root: &Path) -> PathBuf {
    let src = root.join("tiberius/src");
    fs::create_dir_all(&src).unwrap();
    fs::write(
        root.join("tiberius/Cargo.toml"),
        "[package]\nname = \"tiberius\"\nversion = \"0.12.3\"\nedition = \"2021\"\n",
    )
    .unwrap();
    src
}

pub fn tds_check_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tds-check"))
}

pub fn tds_tls_check_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tds-tls-check"))
}

/// Run `binary` inside `cwd` with a clean environment and driver tracing off
pub fn run_binary(binary: &Path, cwd: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(binary);
    command.current_dir(cwd).args(args);
    for var in TDSCHECK_ENV {
        command.env_remove(var);
    }
    command.env("TDSCHECK_TRACE_EVENTS", "0");
    command.output().expect("failed to run check binary")
}
