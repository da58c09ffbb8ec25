use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading a chart file.
///
/// Structural problems inside the chart never surface here; malformed lines
/// are skipped so partially broken community charts still produce a playable
/// note set. Only failing to get text at all is an error.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to read chart file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("chart file is not valid UTF-8: {path}")]
    Decode { path: PathBuf },
}
