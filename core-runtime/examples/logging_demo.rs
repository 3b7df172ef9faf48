//! Logging and event-bus demonstration
//!
//! Run with:
//! ```bash
//! # Pretty format (default in debug)
//! cargo run -p core-runtime --example logging_demo
//!
//! # JSON format
//! cargo run -p core-runtime --example logging_demo -- json
//!
//! # With custom filter
//! cargo run -p core-runtime --example logging_demo -- compact "core_runtime=trace"
//! ```

use core_runtime::events::{EventKey, EventKind};
use core_runtime::logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
use core_runtime::{PlaybackContext, Result};
use futures::executor::block_on;
use std::env;
use tracing::{info, warn};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let format = match args.get(1).map(String::as_str) {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        Some("pretty") => LogFormat::Pretty,
        _ => LogFormat::default(),
    };

    let mut config = LoggingConfig::default()
        .with_format(format)
        .with_level(LogLevel::Trace);
    if let Some(filter) = args.get(2) {
        config = config.with_filter(filter.clone());
    }
    init_logging(config)?;

    info!(format = ?format, "Logging initialized");

    let context = PlaybackContext::new();
    let uid = context.next_uid();

    context
        .events()
        .add_listener(EventKey::sound_end(uid), move || info!(%uid, "Sound finished"));
    context
        .plugin_ready()
        .when_open(|| info!("Queued play released"));

    let ready = context.plugin_ready().wait();
    let drained = context.dispatch_named("mzPluginReady")?;
    block_on(ready)?;
    info!(drained, "Plugin runtime ready");

    for name in [format!("mzSoundEnd:{uid}"), "mzSoundEnd:99".to_string(), "bogus".to_string()] {
        match context.dispatch_named(&name) {
            Ok(delivered) => info!(event = %name, delivered, "Dispatched"),
            Err(err) => warn!(event = %name, error = %err, "Rejected"),
        }
    }

    context.teardown();
    info!("=== Demo complete ===");
    Ok(())
}
