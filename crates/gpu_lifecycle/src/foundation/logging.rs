//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system with an explicit filter such as `"debug"`
/// or `"gpu_lifecycle=trace"`. `RUST_LOG`, when set, takes precedence.
pub fn init_with_level(filter: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&env_filter);
    }
    // A host may already have installed a logger.
    let _ = builder.try_init();
}
