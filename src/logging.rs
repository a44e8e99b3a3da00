//! Logger setup.
//!
//! All output goes through the `log` facade; this module installs a `fern`
//! dispatcher that writes timestamped lines to stderr.

use std::sync::Once;

use log::LevelFilter;

static INIT: Once = Once::new();

/// Maps the number of `-v` flags to a level filter.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger. Subsequent calls are ignored.
pub fn init(level: LevelFilter) {
    INIT.call_once(|| {
        let result = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {:<5} {}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stderr())
            .apply();

        if let Err(e) = result {
            eprintln!("logger already installed: {e}");
        }
    });
}
