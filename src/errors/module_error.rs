use nebula_core::{OptionError, PipelineError};
use thiserror::Error;

use super::SinkError;

/// Errores al resolver, configurar o ejecutar un módulo.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Option(#[from] OptionError),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error("unknown module: {0}")]
    UnknownModule(String),
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_errors_keep_their_user_message() {
        let err: ModuleError = OptionError::Required { name: "dir".into() }.into();
        assert_eq!(err.to_string(), "dir is required");
    }

    #[test]
    fn pipeline_errors_convert() {
        let err: ModuleError = PipelineError::NoStages.into();
        assert!(matches!(err, ModuleError::Pipeline(PipelineError::NoStages)));
        assert_eq!(ModuleError::UnknownModule("x".into()).to_string(), "unknown module: x");
    }
}
