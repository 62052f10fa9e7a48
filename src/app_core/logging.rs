use crate::error::{OsOp, OsResultExt, Result};
use std::{fs::OpenOptions, path::Path, sync::Mutex};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `SEGUE_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "segue=info";

/// Send tracing output to `path`. The terminal belongs to the status line.
///
/// A subscriber that is already installed is left in place.
pub fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .os(OsOp::LogOpen)?;

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("SEGUE_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();

    Ok(())
}
