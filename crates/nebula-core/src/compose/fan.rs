//! Composición en difusión: cada stage recibe cada elemento.

use std::marker::PhantomData;
use std::sync::Arc;

use tokio::task::JoinSet;

use super::merge::forward;
use super::validate::validate_fan;
use crate::context::StageCtx;
use crate::errors::PipelineError;
use crate::stage::{AnyStage, Stage};
use crate::stream::{channel, generator, Stream};

/// Stages planos `In -> Out` aplicados a cada elemento de entrada.
///
/// Por cada elemento y cada stage se lanza una invocación sobre un stream
/// de un único elemento. Las N invocaciones de un elemento corren a la vez y
/// sus salidas se combinan sin orden garantizado; el siguiente elemento no
/// se lee hasta que todas terminaron, así el backpressure llega a la
/// entrada. Si el consumidor suelta la salida, el fan deja de leer.
///
/// No existe modo particionado: con N stages, cada elemento produce la
/// salida de los N.
pub struct Fan<In, Out> {
    name: String,
    stages: Arc<[AnyStage]>,
    _io: PhantomData<fn(In) -> Out>,
}

impl<In, Out> Clone for Fan<In, Out> {
    fn clone(&self) -> Self {
        Self { name: self.name.clone(),
               stages: Arc::clone(&self.stages),
               _io: PhantomData }
    }
}

impl<In, Out> Fan<In, Out>
    where In: Clone + Send + 'static,
          Out: Send + 'static
{
    pub fn new(stages: Vec<AnyStage>) -> Result<Self, PipelineError> {
        validate_fan::<In, Out>(&stages)?;
        let name = format!("fan[{}]", stages.iter().map(AnyStage::name).collect::<Vec<_>>().join(", "));
        Ok(Self { name,
                  stages: stages.into(),
                  _io: PhantomData })
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.stages.len()
    }

    pub fn erased(self) -> AnyStage {
        AnyStage::new(self)
    }
}

impl<In, Out> Stage for Fan<In, Out>
    where In: Clone + Send + 'static,
          Out: Send + 'static
{
    type Input = In;
    type Output = Out;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, ctx: &StageCtx, mut input: Stream<In>) -> Stream<Out> {
        let (out_tx, out_rx) = channel::<Out>();
        let stages = Arc::clone(&self.stages);
        let log = ctx.logger(&self.name);
        let task_ctx = ctx.clone();
        ctx.spawn(async move {
            let ctx = task_ctx;
            let token = ctx.token().clone();
            let mut invocations = JoinSet::new();
            loop {
                let item = tokio::select! {
                    biased;
                    _ = out_tx.closed() => break,
                    item = input.next_or_cancel(&token) => item,
                };
                let Some(item) = item else { break };
                for stage in stages.iter() {
                    match stage.invoke::<In, Out>(&ctx, generator(vec![item.clone()])) {
                        Ok(output) => {
                            invocations.spawn(forward(output, out_tx.clone(), token.clone()));
                        }
                        Err(err) => log.error(format_args!("{err}")),
                    }
                }
                // El siguiente elemento no se lee hasta entregar el actual.
                while let Some(joined) = invocations.join_next().await {
                    if let Err(err) = joined {
                        log.error(format_args!("fan invocation failed: {err}"));
                    }
                }
            }
            if out_tx.is_closed() && !token.is_cancelled() {
                log.debug(format_args!("output closed, stopping"));
            }
        });
        out_rx
    }
}

impl<In, Out> std::fmt::Debug for Fan<In, Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fan").field("name", &self.name).field("stages", &self.stages).finish()
    }
}
