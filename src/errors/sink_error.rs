use std::path::PathBuf;

use thiserror::Error;

/// Errores de los destinos de salida.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("io error on {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{sink} output requires table data, received {kind}")]
    UnsupportedData { sink: &'static str, kind: &'static str },
}

impl SinkError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> SinkError {
        let path = path.into();
        move |source| SinkError::Io { path, source }
    }
}
