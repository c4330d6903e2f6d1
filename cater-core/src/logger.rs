//! Logging Infrastructure
//!
//! Console logging plus, when a directory is given:
//! - `app/`: daily rotating application logs, pruned by [`cleanup_old_logs`]
//! - `audit/`: caterer actions recorded through [`audit_log!`], never pruned

use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing::Metadata;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Days of application logs kept on disk
pub const APP_LOG_RETENTION_DAYS: i64 = 14;

const AUDIT_TARGET: &str = "audit";

type Subscriber = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Subscriber> + Send + Sync>;

/// Delete `app.YYYY-MM-DD.log` files older than `keep_days`
///
/// Returns the number of files removed.
pub fn cleanup_old_logs(log_dir: &Path, keep_days: i64) -> anyhow::Result<usize> {
    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(keep_days);
    let mut removed = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date_part) = name
            .strip_prefix("app.")
            .and_then(|d| d.strip_suffix(".log"))
            && let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }
    Ok(removed)
}

/// Initialize logging
///
/// `RUST_LOG` overrides `level`. With `json_format` every layer writes JSON
/// lines; otherwise the console is human-readable and files are plain text.
/// Old application logs are pruned once at start-up.
///
/// ```no_run
/// cater_core::logger::init_logger_with_file("info", true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer: BoxedLayer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let mut layers = vec![console_layer];
    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_log_dir = log_dir.join("app");
        let audit_log_dir = log_dir.join("audit");
        fs::create_dir_all(&app_log_dir)?;
        fs::create_dir_all(&audit_log_dir)?;

        layers.push(file_layer(
            daily_appender(&app_log_dir, "app")?,
            json_format,
            |meta| meta.target() != AUDIT_TARGET,
        ));
        layers.push(file_layer(
            daily_appender(&audit_log_dir, "audit")?,
            json_format,
            |meta| meta.target() == AUDIT_TARGET,
        ));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(layers)
            .try_init()?;

        if let Err(e) = cleanup_old_logs(log_dir, APP_LOG_RETENTION_DAYS) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layers)
            .try_init()?;
    }

    Ok(())
}

/// Console-only logging
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

fn daily_appender(dir: &Path, prefix: &str) -> anyhow::Result<RollingFileAppender> {
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(dir)?)
}

fn file_layer(
    appender: RollingFileAppender,
    json_format: bool,
    accept: fn(&Metadata<'_>) -> bool,
) -> BoxedLayer {
    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(Mutex::new(appender));
    if json_format {
        layer
            .json()
            .with_current_span(true)
            .with_filter(filter_fn(accept))
            .boxed()
    } else {
        layer.with_filter(filter_fn(accept)).boxed()
    }
}

/// Record a caterer action in the audit log
///
/// ```no_run
/// cater_core::audit_log!(7, "update_status", "order:42");
/// cater_core::audit_log!(7, "receive_funds", "order:42", "offline payment collected");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($user_id:expr, $action:expr, $resource:expr) => {
        ::tracing::info!(
            target: "audit",
            user_id = %$user_id,
            action = %$action,
            resource = %$resource,
            "AUDIT"
        );
    };
    ($user_id:expr, $action:expr, $resource:expr, $details:expr) => {
        ::tracing::info!(
            target: "audit",
            user_id = %$user_id,
            action = %$action,
            resource = %$resource,
            details = %$details,
            "AUDIT"
        );
    };
}
