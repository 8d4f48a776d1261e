//! Errores del motor: composición, ciclo de vida y opciones.

use thiserror::Error;

use crate::stage::PipelineStatus;

/// Errores de validación de opciones. Los mensajes siguen el formato que ve
/// el usuario en la CLI.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum OptionError {
    #[error("option {name} not provided")] Missing { name: String },
    #[error("{name} is required")] Required { name: String },
    #[error("{name} is an invalid format")] InvalidFormat { name: String },
    #[error("{name} contains invalid value '{value}'. Valid options are: {allowed}")]
    NotAllowed { name: String, value: String, allowed: String },
    #[error("{name} expects a boolean, got '{value}'")] InvalidBool { name: String, value: String },
    #[error("{name} expects an integer, got '{value}'")] InvalidInt { name: String, value: String },
    #[error("unknown option {name}")] Unknown { name: String },
    #[error("{name} has an invalid validation pattern: {reason}")] InvalidPattern { name: String, reason: String },
}

/// Errores de construcción y ejecución de pipelines.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PipelineError {
    #[error("no stages provided")] NoStages,
    #[error("tee requires at least one branch")] NoBranches,
    #[error("fan requires at least one stage")] NoFanStages,
    #[error("first stage input type {found} does not match chain input type {expected}")]
    InputMismatch { expected: &'static str, found: &'static str },
    #[error("stage {left} output of type {output} is not compatible with stage {right} input of type {input}")]
    AdjacentMismatch { left: usize, output: &'static str, right: usize, input: &'static str },
    #[error("stage {index} output type {found} does not match chain output type {expected}")]
    OutputMismatch { index: usize, expected: &'static str, found: &'static str },
    #[error("branch {index}: {source}")]
    Branch { index: usize, #[source] source: Box<PipelineError> },
    #[error("fan stage {index} ({stage}) is {input} -> {output}, expected {expected_input} -> {expected_output}")]
    FanStageMismatch { index: usize,
                       stage: String,
                       input: &'static str,
                       output: &'static str,
                       expected_input: &'static str,
                       expected_output: &'static str },
    #[error("stage {stage} received a stream that is not {expected}")]
    StreamType { stage: String, expected: &'static str },
    #[error("pipeline is {current:?}, expected {expected:?}")]
    InvalidState { current: PipelineStatus, expected: PipelineStatus },
    #[error(transparent)] Option(#[from] OptionError),
    #[error("internal: {0}")] Internal(String),
}
