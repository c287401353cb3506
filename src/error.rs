use std::path::PathBuf;

/// Failures while loading review records, from the backend or from disk.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request to the review backend failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("review backend returned {status} for table {table}: {body}")]
    Status {
        status: u16,
        table: String,
        body: String,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON records: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV records: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported record file {path}; expected .json or .csv")]
    UnsupportedFormat { path: PathBuf },
}
