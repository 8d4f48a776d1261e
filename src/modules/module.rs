use std::marker::PhantomData;

use async_trait::async_trait;
use nebula_core::{OptionList, Pipeline, StageFactory};

use super::{Metadata, ModuleResult};
use crate::errors::{ModuleError, SinkError};
use crate::output::OutputSink;

/// Módulo ejecutable desde la CLI.
#[async_trait]
pub trait Module: Send + Sync {
    fn metadata(&self) -> &Metadata;

    /// Definiciones de opciones con sus valores por defecto.
    fn options(&self) -> OptionList;

    /// Valida `options`, ejecuta el pipeline y escribe cada resultado en
    /// todos los `sinks`. Devuelve el número de resultados producidos.
    async fn invoke(&self, options: OptionList, sinks: &[Box<dyn OutputSink>]) -> Result<usize, ModuleError>;
}

/// Módulo definido por una `StageFactory` que produce `ModuleResult`s.
pub struct FactoryModule<In> {
    metadata: &'static Metadata,
    options: fn() -> OptionList,
    factory: StageFactory<In, ModuleResult>,
    _in: PhantomData<fn(In)>,
}

impl<In> FactoryModule<In> where In: Send + 'static
{
    pub fn new(metadata: &'static Metadata, options: fn() -> OptionList, factory: StageFactory<In, ModuleResult>) -> Self {
        Self { metadata,
               options,
               factory,
               _in: PhantomData }
    }
}

fn write_all(sinks: &[Box<dyn OutputSink>], result: &ModuleResult) -> Result<(), SinkError> {
    sinks.iter().try_for_each(|sink| sink.write(result))
}

#[async_trait]
impl<In> Module for FactoryModule<In> where In: Send + 'static
{
    fn metadata(&self) -> &Metadata {
        self.metadata
    }

    fn options(&self) -> OptionList {
        (self.options)()
    }

    async fn invoke(&self, options: OptionList, sinks: &[Box<dyn OutputSink>]) -> Result<usize, ModuleError> {
        let id = self.metadata.id;
        let (pipeline, input) = Pipeline::from_factory(self.factory, options)?;
        let mut pipeline = pipeline.with_module(id);
        let mut output = pipeline.start(input)?;
        log::info!("module {id} started (run {})", pipeline.ctx().run_id());

        let mut produced = 0;
        while let Some(result) = output.next().await {
            if let Err(err) = write_all(sinks, &result) {
                log::error!("module {id}: {err}");
                pipeline.cancel();
                drop(output);
                pipeline.finish().await?;
                return Err(err.into());
            }
            produced += 1;
        }
        pipeline.finish().await?;
        log::info!("module {id} finished with {produced} result(s)");
        Ok(produced)
    }
}
