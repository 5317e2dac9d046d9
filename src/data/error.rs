use thiserror::Error;

/// Failures raised at the load boundary.
///
/// Everything here is recoverable: the caller keeps the previous (or empty)
/// dataset, shows the message, and skips the rest of the pipeline.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    InvalidData(String),
}
