pub mod api;
pub mod classifier;
pub mod config;
pub mod error;

pub use classifier::{normalize, ClassifierClient, Sentiment};
pub use config::Config;
pub use error::ClassifyError;

/// Shared application state.
///
/// Built once at startup and injected into handlers; everything here is
/// read-only for the lifetime of the process.
pub struct AppState {
    pub config: Config,
    pub classifier: ClassifierClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let classifier = ClassifierClient::new(&config.classifier);
        Self { config, classifier }
    }
}
