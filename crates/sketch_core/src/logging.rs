//! Logger initialisation.
//!
//! Library code only talks to the `log` facade. Hosts that want output call
//! [`init_logging`] once, early in `main`; it installs a `fern` dispatcher
//! writing to stderr.

use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger`-style directive syntax understood by
/// [`parse_filter`] (e.g. `"info"`, `"sketch_geometry=trace,warn"`). When it
/// is `None` the `RUST_LOG` variable is consulted, then `info` is used.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

static INIT: Once = Once::new();

/// Installs the global logger once. Subsequent calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config
            .filter
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string());
        let (default_level, modules) = parse_filter(&filter);

        let mut dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {}] {}",
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(default_level);
        for (module, level) in modules {
            dispatch = dispatch.level_for(module, level);
        }

        // Another logger may already be installed by the host; keep it.
        if dispatch.chain(std::io::stderr()).apply().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

/// Splits `"warn,sketch_geometry=trace"` into a default level and
/// per-module overrides. Unparseable directives are skipped.
pub fn parse_filter(filter: &str) -> (log::LevelFilter, Vec<(String, log::LevelFilter)>) {
    let mut default_level = log::LevelFilter::Info;
    let mut modules = Vec::new();

    for directive in filter.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        match directive.split_once('=') {
            Some((module, level)) => {
                if let Ok(level) = level.trim().parse() {
                    modules.push((module.trim().to_string(), level));
                }
            }
            None => {
                if let Ok(level) = directive.parse() {
                    default_level = level;
                }
            }
        }
    }

    (default_level, modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn parses_default_and_module_levels() {
        let (default, modules) = parse_filter("warn, sketch_geometry=trace ,bogus=loud");
        assert_eq!(default, LevelFilter::Warn);
        assert_eq!(modules, vec![("sketch_geometry".to_string(), LevelFilter::Trace)]);
    }

    #[test]
    fn empty_filter_means_info() {
        let (default, modules) = parse_filter("");
        assert_eq!(default, LevelFilter::Info);
        assert!(modules.is_empty());
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig { filter: Some("debug".into()) });
        init_logging(LoggingConfig::default());
    }
}
