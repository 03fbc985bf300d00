use tracing::Level;

/// Installs a stdout `tracing` subscriber. Safe to call more than once.
pub fn init_logging() {
    init_logging_with_level(Level::INFO);
}

pub fn init_logging_with_level(level: Level) {
    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
}
