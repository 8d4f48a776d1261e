//! Validación de tipos de listas de stages en tiempo de construcción.

use crate::errors::PipelineError;
use crate::stage::{AnyStage, TypeTag};

/// Comprueba que `stages` forma una cadena `In -> Out`.
///
/// Orden de comprobación: lista vacía, entrada del primer stage, cada par
/// adyacente y salida del último. Devuelve el primer desajuste encontrado.
pub fn validate_chain<In: 'static, Out: 'static>(stages: &[AnyStage]) -> Result<(), PipelineError> {
    let (first, last) = match (stages.first(), stages.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(PipelineError::NoStages),
    };

    let expected_in = TypeTag::of::<In>();
    if first.input() != expected_in {
        return Err(PipelineError::InputMismatch { expected: expected_in.name(),
                                                  found: first.input().name() });
    }

    for (left, pair) in stages.windows(2).enumerate() {
        if pair[0].output() != pair[1].input() {
            return Err(PipelineError::AdjacentMismatch { left,
                                                         output: pair[0].output().name(),
                                                         right: left + 1,
                                                         input: pair[1].input().name() });
        }
    }

    let expected_out = TypeTag::of::<Out>();
    if last.output() != expected_out {
        return Err(PipelineError::OutputMismatch { index: stages.len() - 1,
                                                   expected: expected_out.name(),
                                                   found: last.output().name() });
    }
    Ok(())
}

/// Comprueba que cada stage de un `Fan` es exactamente `In -> Out`.
pub fn validate_fan<In: 'static, Out: 'static>(stages: &[AnyStage]) -> Result<(), PipelineError> {
    if stages.is_empty() {
        return Err(PipelineError::NoFanStages);
    }
    let (expected_in, expected_out) = (TypeTag::of::<In>(), TypeTag::of::<Out>());
    match stages.iter().position(|s| !s.accepts::<In, Out>()) {
        None => Ok(()),
        Some(index) => {
            let stage = &stages[index];
            Err(PipelineError::FanStageMismatch { index,
                                                  stage: stage.name().to_string(),
                                                  input: stage.input().name(),
                                                  output: stage.output().name(),
                                                  expected_input: expected_in.name(),
                                                  expected_output: expected_out.name() })
        }
    }
}
