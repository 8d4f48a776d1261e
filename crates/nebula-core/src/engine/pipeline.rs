//! Ciclo de vida de un pipeline: validar, arrancar, drenar.

use crate::compose::Chain;
use crate::constants::ENGINE_VERSION;
use crate::context::StageCtx;
use crate::errors::PipelineError;
use crate::options::OptionList;
use crate::stage::{AnyStage, PipelineStatus, StageFactory};
use crate::stream::Stream;

/// Pipeline ejecutable `In -> Out` con su contexto de run.
///
/// Ver `PipelineStatus` para las transiciones. Un pipeline se ejecuta una
/// sola vez: tras `finish` queda en `Drained`.
pub struct Pipeline<In, Out> {
    status: PipelineStatus,
    ctx: StageCtx,
    chain: Option<Chain<In, Out>>,
}

impl<In, Out> Pipeline<In, Out>
    where In: Send + 'static,
          Out: Send + 'static
{
    /// Pipeline sin stages (`Unbuilt`).
    pub fn new(options: OptionList) -> Self {
        Self { status: PipelineStatus::Unbuilt,
               ctx: StageCtx::new(options),
               chain: None }
    }

    /// Pipeline listo a partir de una cadena ya validada.
    pub fn from_chain(chain: Chain<In, Out>, options: OptionList) -> Self {
        Self { status: PipelineStatus::Ready,
               ctx: StageCtx::new(options),
               chain: Some(chain) }
    }

    /// Valida las opciones y construye entrada y cadena con `factory`.
    pub fn from_factory(factory: StageFactory<In, Out>, options: OptionList) -> Result<(Self, Stream<In>), PipelineError> {
        options.validate()?;
        let (input, chain) = factory(&options)?;
        Ok((Self::from_chain(chain, options), input))
    }

    pub fn with_module(mut self, module: &str) -> Self {
        self.ctx = self.ctx.clone().with_module(module);
        self
    }

    #[inline]
    pub fn status(&self) -> PipelineStatus {
        self.status
    }

    #[inline]
    pub fn ctx(&self) -> &StageCtx {
        &self.ctx
    }

    fn transition(&mut self, expected: PipelineStatus, next: PipelineStatus) -> Result<(), PipelineError> {
        if self.status != expected || !expected.can_transition_to(next) {
            return Err(PipelineError::InvalidState { current: self.status,
                                                     expected });
        }
        self.status = next;
        Ok(())
    }

    /// `Unbuilt -> Validating -> Ready | TypeError`.
    pub fn build(&mut self, stages: Vec<AnyStage>) -> Result<(), PipelineError> {
        self.transition(PipelineStatus::Unbuilt, PipelineStatus::Validating)?;
        match Chain::new(stages) {
            Ok(chain) => {
                log::debug!("pipeline {} built with {} stages (engine {})", self.ctx.run_id(), chain.len(), ENGINE_VERSION);
                self.chain = Some(chain);
                self.status = PipelineStatus::Ready;
                Ok(())
            }
            Err(err) => {
                log::error!("pipeline {} rejected: {}", self.ctx.run_id(), err);
                self.status = PipelineStatus::TypeError;
                Err(err)
            }
        }
    }

    /// `Ready -> Running`: conecta la cadena a `input` y devuelve la salida.
    pub fn start(&mut self, input: Stream<In>) -> Result<Stream<Out>, PipelineError> {
        let Some(chain) = self.chain.clone() else {
            return Err(PipelineError::InvalidState { current: self.status,
                                                     expected: PipelineStatus::Ready });
        };
        self.transition(PipelineStatus::Ready, PipelineStatus::Running)?;
        chain.execute(&self.ctx, input)
    }

    /// `Running -> Drained`: espera a que terminen todas las tareas del run.
    /// Llamar tras consumir la salida o tras `cancel`.
    pub async fn finish(&mut self) -> Result<(), PipelineError> {
        self.transition(PipelineStatus::Running, PipelineStatus::Drained)?;
        self.ctx.tracker().close();
        self.ctx.tracker().wait().await;
        log::debug!("pipeline {} drained", self.ctx.run_id());
        Ok(())
    }

    /// Arranca, drena la salida completa y espera a las tareas.
    pub async fn collect(&mut self, input: Stream<In>) -> Result<Vec<Out>, PipelineError> {
        let output = self.start(input)?;
        let items = output.collect().await;
        self.finish().await?;
        Ok(items)
    }

    /// Cancela el run: cada stage deja de leer y de emitir y cierra su
    /// salida. No bloquea; usar `finish` para esperar.
    pub fn cancel(&self) {
        self.ctx.cancel();
    }
}

impl<In, Out> std::fmt::Debug for Pipeline<In, Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
         .field("status", &self.status)
         .field("ctx", &self.ctx)
         .field("chain", &self.chain)
         .finish()
    }
}
