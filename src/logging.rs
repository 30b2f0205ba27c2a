//! Structured logging setup: console output filtered by `RUST_LOG`, plus an
//! optional JSON file layer when `TAREFAS_LOG_DIR` is set.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging. Safe to call more than once; only the first
/// call installs the subscriber.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,tarefas_core=debug"));

        let file_layer = std::env::var("TAREFAS_LOG_DIR").ok().map(|dir| {
            let appender = tracing_appender::rolling::daily(dir, "tarefas.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            // Keep the writer guard alive for the process lifetime.
            std::mem::forget(guard);
            fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .json()
                .boxed()
        });

        let console_layer = fmt::layer().with_target(true).with_level(true);

        // try_init: tests may have installed a subscriber already.
        let _ = tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .with(env_filter)
            .try_init();
    });
}
