//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with an explicit filter such as `"debug"`
/// or `"wavefront_mesh=trace"`.
///
/// Does nothing if a logger is already installed.
pub fn init_with_filter(filter: &str) {
    let _ = env_logger::Builder::new()
        .parse_filters(filter)
        .try_init();
}

/// Install a test-friendly logger; safe to call from every test.
pub fn try_init_for_tests() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();
}
