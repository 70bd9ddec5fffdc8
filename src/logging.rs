use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file.
pub const LOG_ENV: &str = "FIELDARITY_LOG";

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "fieldarity=info";

/// Initialize tracing to a file named by `FIELDARITY_LOG`.
///
/// Without it nothing is installed and stdout stays machine-readable.
/// `RUST_LOG` overrides the filter.
pub fn init_tracing() {
    let Ok(base) = std::env::var(LOG_ENV) else {
        return;
    };
    if base.is_empty() {
        return;
    }

    let path = unique_log_path(&base, std::process::id());
    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot create log file {}: {}", path, e);
            return;
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    tracing::debug!("Logging to {}", path);
}

/// `{base}.{unix_secs}.{pid}`, so concurrent runs never share a file.
fn unique_log_path(base: &str, pid: u32) -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", base, secs, pid)
}
