#[cfg(feature = "desktop")]
mod app;
#[cfg(feature = "desktop")]
pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(feature = "desktop")]
pub use app::run;
pub use tracing_setup::init_tracing;

mod tracing_setup {
    use tracing_subscriber::EnvFilter;

    const DEFAULT_FILTER: &str = if cfg!(debug_assertions) {
        "info,itemdesk=debug"
    } else {
        "info"
    };

    /// Installs the fmt subscriber. `RUST_LOG` overrides the default filter.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        // A second call (tests, re-init) keeps the first subscriber.
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}
