//! Logging setup
//!
//! Logs go to stderr so stdout stays clean for results. `DESKWIDGETS_LOG`
//! takes precedence over the level derived from `-v`/`-q`:
//!
//! ```bash
//! DESKWIDGETS_LOG=deskwidgets=trace deskwidgets calc --keys '1+2='
//! ```

use std::sync::Once;

use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::Verbosity;

/// Environment variable holding a log filter directive
pub const LOG_ENV: &str = "DESKWIDGETS_LOG";

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Filter directive for `verbosity`, unless overridden by [`LOG_ENV`]
#[must_use]
pub fn filter_directive(verbosity: Verbosity, env: Option<&str>) -> String {
    match env {
        Some(directive) if !directive.trim().is_empty() => directive.to_string(),
        _ => verbosity.log_filter().to_string(),
    }
}

/// Installs the global subscriber. Only the first call takes effect.
pub fn init(verbosity: Verbosity) {
    INIT.call_once(|| {
        let env = std::env::var(LOG_ENV).ok();
        let directive = filter_directive(verbosity, env.as_deref());
        let filter = EnvFilter::try_new(&directive)
            .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(CompactTime)
            .with_level(true)
            .with_filter(filter);

        // another subscriber may already be installed (tests)
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}
