use super::Action;
use crate::{
    check,
    driver::{DriverSource, MssqlDriver},
};
use std::io;

/// Execute the action's business logic by delegating to the appropriate module
///
/// The driver checkout is located before anything touches the log file or
/// the network.
pub async fn execute(action: Action) -> anyhow::Result<()> {
    match action {
        Action::Check {
            variant,
            driver_src,
            log,
            params,
        } => {
            let driver = MssqlDriver::new(DriverSource::locate(driver_src)?);
            check::start(&driver, &params, variant, &log, io::stdout()).await
        }
    }
}
