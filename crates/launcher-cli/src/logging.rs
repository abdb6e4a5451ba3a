use env_logger::{Builder, Env};

const DEFAULT_FILTER: &str = "info";

/// Operator-facing messages go to stderr; `RUST_LOG` overrides the level.
pub fn init() {
    // A second init (tests, embedding) is not an error worth surfacing.
    let _ = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
