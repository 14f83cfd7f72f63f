use anyhow::{Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Local checkout of the driver being exercised
#[derive(Debug, Clone)]
pub struct DriverSource {
    src: PathBuf,
    version: Option<String>,
}

impl DriverSource {
    /// Confirm the checkout's source tree exists and read its package version
    ///
    /// The version comes from the `Cargo.toml` one level above `src`.
    ///
    /// # Errors
    ///
    /// Returns an error if `src` is not a directory
    pub fn locate(src: impl Into<PathBuf>) -> Result<Self> {
        let src = src.into();
        if !src.is_dir() {
            bail!("driver source tree not found at {}", src.display());
        }

        let version = src
            .parent()
            .map(|root| root.join("Cargo.toml"))
            .and_then(|manifest| fs::read_to_string(manifest).ok())
            .and_then(|manifest| package_version(&manifest));

        Ok(Self { src, version })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.src
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/// Literal `version` of the `[package]` table
///
/// Inherited versions (`version.workspace = true`) and unparsable manifests
/// yield `None`.
fn package_version(manifest: &str) -> Option<String> {
    let manifest = manifest
        .parse::<toml::Table>()
        .inspect_err(|e| debug!(error = %e, "failed to parse driver manifest"))
        .ok()?;

    manifest
        .get("package")?
        .get("version")?
        .as_str()
        .map(str::to_string)
}
