//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// `RUST_LOG` wins when set; otherwise `default_level` (e.g. `"info"`) is used
/// as the filter. Calling this more than once is harmless.
pub fn init(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    // A second init (tests, embedding) only fails because a logger is already set
    let _ = env_logger::Builder::from_env(env).try_init();
}
