use super::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid analysis configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("No atom records to analyze")]
    EmptyInput,
}
