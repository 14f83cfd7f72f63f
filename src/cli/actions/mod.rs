mod run;

use crate::{Variant, driver::ConnectParams};
use std::path::PathBuf;

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Check {
        variant: Variant,
        driver_src: PathBuf,
        log: PathBuf,
        params: ConnectParams,
    },
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails to execute
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
