//! Logger setup.

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the global `fern` logger writing to stderr.
///
/// `RUST_LOG`, when it holds a plain level name, overrides `level`. Calling
/// this more than once is a no-op.
pub fn init(level: log::LevelFilter) {
    INIT.call_once(|| {
        let level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(level);

        let result = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    chrono::Local::now().format("%H:%M:%S"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(level)
            // the GL wrappers are chatty at debug
            .level_for("glow", log::LevelFilter::Warn)
            .chain(std::io::stderr())
            .apply();

        match result {
            Ok(()) => log::debug!("logging initialized at {level}"),
            Err(e) => eprintln!("Failed to initialize logging: {e}"),
        }
    });
}
