use thiserror::Error;

#[derive(Debug, Error)]
pub enum OledLabError {
    #[error("Lot '{0}' not found in the lot book")]
    LotNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to serialize YAML for '{0}': {1}")]
    YamlWriting(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("An error occurred while writing a report: {0}")]
    ReportError(#[from] anyhow::Error),
}
