use std::marker::PhantomData;

use super::Pipeline;
use crate::errors::PipelineError;
use crate::options::{OptionCell, OptionList};
use crate::stage::{AnyStage, Stage};

/// Builder ergonómico de `Pipeline`.
///
/// Uso:
///   let pipeline = PipelineBuilder::<String, usize>::new()
///       .module("echo")
///       .stage(Parse)
///       .stage(Len)
///       .build()?;
pub struct PipelineBuilder<In, Out> {
    options: OptionList,
    module: Option<String>,
    stages: Vec<AnyStage>,
    _io: PhantomData<fn(In) -> Out>,
}

impl<In, Out> Default for PipelineBuilder<In, Out> {
    fn default() -> Self {
        Self { options: OptionList::new(),
               module: None,
               stages: Vec::new(),
               _io: PhantomData }
    }
}

impl<In, Out> PipelineBuilder<In, Out>
    where In: Send + 'static,
          Out: Send + 'static
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, options: OptionList) -> Self {
        self.options = options;
        self
    }

    pub fn option(mut self, cell: OptionCell) -> Self {
        self.options.push(cell);
        self
    }

    pub fn module(mut self, module: &str) -> Self {
        self.module = Some(module.to_string());
        self
    }

    pub fn stage<S: Stage>(mut self, stage: S) -> Self {
        self.stages.push(AnyStage::new(stage));
        self
    }

    pub fn erased(mut self, stage: AnyStage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Valida opciones y tipos; devuelve un pipeline en `Ready`.
    pub fn build(self) -> Result<Pipeline<In, Out>, PipelineError> {
        self.options.validate()?;
        let mut pipeline = Pipeline::new(self.options);
        if let Some(module) = &self.module {
            pipeline = pipeline.with_module(module);
        }
        pipeline.build(self.stages)?;
        Ok(pipeline)
    }
}
