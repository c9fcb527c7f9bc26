use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variables checked, in order, for an explicit log filter.
const LOG_FILTER_ENV: [&str; 2] = ["HPA_LOAD_LOG", "RUST_LOG"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogSettings {
    filter: String,
}

impl LogSettings {
    /// Resolve the filter from the environment, falling back to `info` when
    /// verbose and `warn` otherwise.
    pub(crate) fn from_env(verbose: bool) -> Self {
        let env_filter = LOG_FILTER_ENV
            .iter()
            .find_map(|name| std::env::var(name).ok());
        Self::resolve(env_filter, verbose)
    }

    fn resolve(env_filter: Option<String>, verbose: bool) -> Self {
        let filter = env_filter
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default_level(verbose).to_owned());
        Self { filter }
    }

    pub(crate) fn filter(&self) -> &str {
        &self.filter
    }
}

const fn default_level(verbose: bool) -> &'static str {
    if verbose { "info" } else { "warn" }
}

pub(crate) fn init_logging(settings: &LogSettings) {
    let filter = EnvFilter::try_new(settings.filter()).unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}
