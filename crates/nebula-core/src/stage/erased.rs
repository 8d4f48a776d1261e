//! Borrado de tipos para listas heterogéneas de stages.
//!
//! `AnyStage` guarda las etiquetas de tipo de entrada y salida de un stage
//! junto a un ejecutor que acepta y devuelve streams en caja. Los
//! compositores comparan las etiquetas al construir, de modo que en
//! ejecución el downcast no falla salvo error de programación.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use super::Stage;
use crate::context::StageCtx;
use crate::errors::PipelineError;
use crate::stream::Stream;

/// Identidad de un tipo en tiempo de ejecución con su nombre legible.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    #[inline]
    pub fn of<T: 'static>() -> Self {
        Self { id: TypeId::of::<T>(),
               name: type_name::<T>() }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

type ErasedRun = dyn Fn(&StageCtx, Box<dyn Any + Send>) -> Result<Box<dyn Any + Send>, PipelineError> + Send + Sync;

/// Stage con tipos borrados y etiquetados.
#[derive(Clone)]
pub struct AnyStage {
    name: String,
    input: TypeTag,
    output: TypeTag,
    run: Arc<ErasedRun>,
}

impl AnyStage {
    pub fn new<S: Stage>(stage: S) -> Self {
        let name = stage.name().to_string();
        let stage_name = name.clone();
        let run: Arc<ErasedRun> =
            Arc::new(move |ctx: &StageCtx, input: Box<dyn Any + Send>| -> Result<Box<dyn Any + Send>, PipelineError> {
                let input = input.downcast::<Stream<S::Input>>()
                                 .map_err(|_| PipelineError::StreamType { stage: stage_name.clone(),
                                                                          expected: type_name::<Stream<S::Input>>() })?;
                Ok(Box::new(stage.run(ctx, *input)) as Box<dyn Any + Send>)
            });
        Self { name,
               input: TypeTag::of::<S::Input>(),
               output: TypeTag::of::<S::Output>(),
               run }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn input(&self) -> TypeTag {
        self.input
    }

    #[inline]
    pub fn output(&self) -> TypeTag {
        self.output
    }

    /// `true` si el stage es `In -> Out`.
    pub fn accepts<In: 'static, Out: 'static>(&self) -> bool {
        self.input == TypeTag::of::<In>() && self.output == TypeTag::of::<Out>()
    }

    pub(crate) fn run_erased(&self, ctx: &StageCtx, input: Box<dyn Any + Send>) -> Result<Box<dyn Any + Send>, PipelineError> {
        (self.run)(ctx, input)
    }

    /// Ejecuta el stage con tipos concretos.
    pub fn invoke<In, Out>(&self, ctx: &StageCtx, input: Stream<In>) -> Result<Stream<Out>, PipelineError>
        where In: Send + 'static,
              Out: Send + 'static
    {
        let output = self.run_erased(ctx, Box::new(input))?;
        output.downcast::<Stream<Out>>()
              .map(|s| *s)
              .map_err(|_| PipelineError::StreamType { stage: self.name.clone(),
                                                       expected: type_name::<Stream<Out>>() })
    }
}

impl fmt::Debug for AnyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyStage")
         .field("name", &self.name)
         .field("input", &self.input)
         .field("output", &self.output)
         .finish()
    }
}

/// Borra los tipos de una lista heterogénea de stages:
/// `stages![Parse, Double, Render]`.
#[macro_export]
macro_rules! stages {
    ($($stage:expr),* $(,)?) => {
        vec![$($crate::stage::AnyStage::new($stage)),*]
    };
}
