use crate::{
    Variant,
    driver::{ConnectParams, Connection, Driver},
    report::Report,
    tee::Tee,
};
use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{LineWriter, Write},
    path::Path,
};
use tracing::warn;

/// Query every check runs
pub const QUERY: &str = "SELECT 1 AS value";

/// Run one check with its output mirrored into a fresh log file
///
/// `console` receives exactly the bytes written to `log`. The log is
/// truncated first and flushed after every line, so a failed run still
/// leaves everything printed up to the failure.
///
/// # Errors
///
/// Returns an error if the log cannot be created or written, or if the check fails
pub async fn start<D, W>(
    driver: &D,
    params: &ConnectParams,
    variant: Variant,
    log: &Path,
    console: W,
) -> Result<()>
where
    D: Driver,
    W: Write,
{
    if let Some(parent) = log.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = File::create(log)
        .with_context(|| format!("failed to create log file {}", log.display()))?;

    let tee = Tee::new().with(console).with(LineWriter::new(file));
    let mut report = Report::new(tee, variant);

    report.line(format_args!("writing log to {}", log.display()))?;
    run(driver, params, &mut report).await?;
    report.line(format_args!("logs captured in {}", log.display()))?;

    Ok(())
}

/// Connect, query and close once, reporting each step
///
/// Any failure is reported as a single failure line and then returned as is.
///
/// # Errors
///
/// Returns the first error from connecting, querying, fetching or closing
pub async fn run<D, W>(driver: &D, params: &ConnectParams, report: &mut Report<W>) -> Result<()>
where
    D: Driver,
    W: Write,
{
    match run_once(driver, params, report).await {
        Ok(()) => Ok(()),
        Err(err) => {
            let label = report.variant().failure_label();
            if let Err(io) = report.line(format_args!("{label}: {err:#}")) {
                warn!(error = %io, "failed to report check failure");
            }
            Err(err)
        }
    }
}

async fn run_once<D, W>(driver: &D, params: &ConnectParams, report: &mut Report<W>) -> Result<()>
where
    D: Driver,
    W: Write,
{
    report.line(format_args!(
        "driver located at: {}",
        driver.location().display()
    ))?;
    report.line(format_args!(
        "reported version: {}",
        driver.version().as_deref().unwrap_or("unknown")
    ))?;
    report.line(format_args!("target: {}", params.target()))?;
    if let Some(tls) = &params.tls {
        report.line(format_args!("CA certificate: {}", tls.ca.display()))?;
    }

    let mut conn = driver.connect(params).await?;
    report.line(format_args!(
        "connection established via {}",
        conn.type_name()
    ))?;

    {
        report.line(format_args!("executing: {QUERY}"))?;
        let row = conn.fetch_one(QUERY).await?;
        match row {
            Some(row) => report.line(format_args!("result: {row}"))?,
            None => report.line("result: no rows")?,
        }
    }

    conn.close().await?;
    let closed = report.variant().closed_label();
    report.line(closed)?;

    Ok(())
}
