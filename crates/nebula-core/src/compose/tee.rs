//! Replicación de un stream en varias ramas.

use std::sync::Arc;

use super::merge::merge_into;
use super::Chain;
use crate::context::StageCtx;
use crate::errors::PipelineError;
use crate::stage::{AnyStage, Stage};
use crate::stream::{channel, Stream};

/// Envía una copia de cada elemento de entrada a todas sus ramas y combina
/// las salidas en un único stream.
///
/// El orden se conserva dentro de cada rama pero no entre ramas. La salida
/// se cierra sólo cuando todas las ramas terminaron. Una rama que deja de
/// leer se retira del reparto sin afectar al resto; si es el consumidor de
/// la salida quien se va, el reparto termina para todas.
pub struct Tee<In, Out> {
    name: String,
    branches: Arc<[Chain<In, Out>]>,
}

impl<In, Out> Clone for Tee<In, Out> {
    fn clone(&self) -> Self {
        Self { name: self.name.clone(),
               branches: Arc::clone(&self.branches) }
    }
}

impl<In, Out> Tee<In, Out>
    where In: Clone + Send + 'static,
          Out: Send + 'static
{
    /// Valida cada rama como cadena `In -> Out`. Un error en la rama `i` se
    /// devuelve como `PipelineError::Branch { index: i, .. }`.
    pub fn new(branches: Vec<Vec<AnyStage>>) -> Result<Self, PipelineError> {
        let chains = branches.into_iter()
                             .enumerate()
                             .map(|(index, stages)| {
                                 Chain::new(stages).map_err(|e| PipelineError::Branch { index,
                                                                                        source: Box::new(e) })
                             })
                             .collect::<Result<Vec<_>, _>>()?;
        Self::from_chains(chains)
    }

    pub fn from_chains(branches: Vec<Chain<In, Out>>) -> Result<Self, PipelineError> {
        if branches.is_empty() {
            return Err(PipelineError::NoBranches);
        }
        Ok(Self { name: format!("tee[{}]", branches.len()),
                  branches: branches.into() })
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    #[inline]
    pub fn branches(&self) -> usize {
        self.branches.len()
    }

    /// Como `AnyStage::new(tee)`.
    pub fn erased(self) -> AnyStage {
        AnyStage::new(self)
    }
}

impl<In, Out> Stage for Tee<In, Out>
    where In: Clone + Send + 'static,
          Out: Send + 'static
{
    type Input = In;
    type Output = Out;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, ctx: &StageCtx, mut input: Stream<In>) -> Stream<Out> {
        let mut senders = Vec::with_capacity(self.branches.len());
        let mut outputs = Vec::with_capacity(self.branches.len());
        for branch in self.branches.iter() {
            let (tx, rx) = channel::<In>();
            senders.push(tx);
            outputs.push(branch.run(ctx, rx));
        }

        // Hijo del token del run: se cancela también cuando el consumidor de
        // la salida combinada se va, aunque ninguna rama llegue a emitir.
        let stop = ctx.token().child_token();
        let distributor = stop.clone();
        let log = ctx.logger(&self.name);
        ctx.spawn(async move {
            while let Some(item) = input.next_or_cancel(&distributor).await {
                let mut open = Vec::with_capacity(senders.len());
                for tx in senders.drain(..) {
                    if tx.emit(&distributor, item.clone()).await {
                        open.push(tx);
                    }
                }
                senders = open;
                if senders.is_empty() {
                    if !distributor.is_cancelled() {
                        log.debug(format_args!("every branch stopped reading"));
                    }
                    break;
                }
            }
            // Soltar `senders` cierra la entrada de cada rama.
        });

        let (out_tx, out_rx) = channel::<Out>();
        merge_into(ctx, &self.name, outputs, out_tx, stop);
        out_rx
    }
}

impl<In, Out> std::fmt::Debug for Tee<In, Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tee").field("name", &self.name).field("branches", &self.branches).finish()
    }
}
