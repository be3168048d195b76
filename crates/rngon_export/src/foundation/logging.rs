//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize logging with a default filter level
///
/// `RUST_LOG` still takes precedence when set. Unknown level names fall back
/// to `info`. Returns `false` if a logger was already installed.
pub fn init_with_level(level: &str) -> bool {
    let filter = level.parse::<log::LevelFilter>().unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_initialization_is_tolerated() {
        let _ = init_with_level("debug");
        assert!(!init_with_level("warn"));
    }
}
