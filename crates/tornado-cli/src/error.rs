use std::path::PathBuf;
use thiserror::Error;
use tornado::analysis::config::ConfigError;
use tornado::analysis::error::AnalysisError;
use tornado::core::io::records::RecordError;
use tornado::core::topology::registry::RegistryLoadError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Residue alias error: {0}")]
    Aliases(#[from] RegistryLoadError),

    #[error("Failed to read atom records from '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: RecordError,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to install logger: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
