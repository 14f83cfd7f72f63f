use crate::{
    Variant,
    cli::actions::Action,
    driver::{ConnectParams, TdsVersion},
    tls::TlsConfig,
};
use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use std::path::PathBuf;

/// Whether driver tracing was requested, defaulting to on
#[must_use]
pub fn trace_events(matches: &ArgMatches) -> bool {
    matches.get_one::<bool>("trace-events").copied().unwrap_or(true)
}

fn required_string(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("{id} is required"))
}

fn required_path(matches: &ArgMatches, id: &str) -> Result<PathBuf> {
    matches
        .get_one::<PathBuf>(id)
        .cloned()
        .with_context(|| format!("{id} is required"))
}

/// Extract TLS settings; only the TLS variant defines these arguments
fn extract_tls_config(variant: Variant, matches: &ArgMatches) -> Result<Option<TlsConfig>> {
    if !variant.uses_tls() {
        return Ok(None);
    }

    let ca = required_path(matches, "ca")?;
    let validate_host = matches.get_flag("validate-host");

    Ok(Some(TlsConfig::new(ca).with_host_validation(validate_host)))
}

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if a required value is missing or invalid
pub fn dispatch(variant: Variant, matches: &ArgMatches) -> Result<Action> {
    let host = required_string(matches, "host")?;
    if host.trim().is_empty() {
        bail!("host must not be empty");
    }

    let port = matches.get_one::<u16>("port").copied().unwrap_or(1433);

    let params = ConnectParams {
        host,
        port,
        database: required_string(matches, "database")?,
        user: required_string(matches, "user")?,
        password: required_string(matches, "password")?,
        app_name: required_string(matches, "app-name")?,
        tds_version: TdsVersion::V7_4,
        tls: extract_tls_config(variant, matches)?,
    };

    Ok(Action::Check {
        variant,
        driver_src: required_path(matches, "driver-src")?,
        log: required_path(matches, "log")?,
        params,
    })
}
