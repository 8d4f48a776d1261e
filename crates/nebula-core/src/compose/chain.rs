use std::any::{type_name, Any};
use std::marker::PhantomData;
use std::sync::Arc;

use super::validate::validate_chain;
use crate::context::StageCtx;
use crate::errors::PipelineError;
use crate::stage::{AnyStage, Stage};
use crate::stream::Stream;

/// Secuencia validada de stages que se comporta como un único stage
/// `In -> Out`.
///
/// Inmutable tras construirse; clonarla sólo incrementa un `Arc`. Cada
/// stage corre en sus propias tareas, conectadas por canales acotados, de
/// modo que el primer elemento puede llegar al final antes de que el
/// segundo entre.
pub struct Chain<In, Out> {
    name: String,
    stages: Arc<[AnyStage]>,
    _io: PhantomData<fn(In) -> Out>,
}

impl<In, Out> Clone for Chain<In, Out> {
    fn clone(&self) -> Self {
        Self { name: self.name.clone(),
               stages: Arc::clone(&self.stages),
               _io: PhantomData }
    }
}

impl<In, Out> Chain<In, Out>
    where In: Send + 'static,
          Out: Send + 'static
{
    /// Valida y construye. Ningún stage se ejecuta si la validación falla.
    pub fn new(stages: Vec<AnyStage>) -> Result<Self, PipelineError> {
        validate_chain::<In, Out>(&stages)?;
        Ok(Self::from_checked(stages))
    }

    pub(crate) fn from_checked(stages: Vec<AnyStage>) -> Self {
        let name = stages.iter().map(AnyStage::name).collect::<Vec<_>>().join(" -> ");
        Self { name,
               stages: stages.into(),
               _io: PhantomData }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    #[inline]
    pub fn stages(&self) -> &[AnyStage] {
        &self.stages
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Conecta todos los stages en orden y devuelve la salida del último.
    pub fn execute(&self, ctx: &StageCtx, input: Stream<In>) -> Result<Stream<Out>, PipelineError> {
        let mut current: Box<dyn Any + Send> = Box::new(input);
        for stage in self.stages.iter() {
            current = stage.run_erased(ctx, current)?;
        }
        current.downcast::<Stream<Out>>()
               .map(|s| *s)
               .map_err(|_| PipelineError::StreamType { stage: self.name.clone(),
                                                        expected: type_name::<Stream<Out>>() })
    }
}

impl<In, Out> Stage for Chain<In, Out>
    where In: Send + 'static,
          Out: Send + 'static
{
    type Input = In;
    type Output = Out;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, ctx: &StageCtx, input: Stream<In>) -> Stream<Out> {
        match self.execute(ctx, input) {
            Ok(output) => output,
            Err(err) => {
                // Sólo alcanzable si se saltó la validación.
                ctx.logger(&self.name).error(format_args!("{err}"));
                Stream::closed()
            }
        }
    }
}

impl<In, Out> std::fmt::Debug for Chain<In, Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
         .field("name", &self.name)
         .field("stages", &self.stages.len())
         .finish()
    }
}

/// Valida una lista heterogénea como cadena `In -> Out`.
#[inline]
pub fn chain_stages<In, Out>(stages: Vec<AnyStage>) -> Result<Chain<In, Out>, PipelineError>
    where In: Send + 'static,
          Out: Send + 'static
{
    Chain::new(stages)
}
