use std::marker::PhantomData;

use nebula_core::{spawn_stage, Stage, StageCtx, Stream};

/// Drena la entrada y emite un único lote con todo, en orden de llegada.
/// Emite exactamente una vez, también cuando la entrada llega vacía.
pub struct Aggregate<T> {
    _t: PhantomData<fn(T)>,
}

impl<T> Aggregate<T> {
    pub fn new() -> Self {
        Self { _t: PhantomData }
    }
}

impl<T> Default for Aggregate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stage for Aggregate<T> where T: Send + 'static
{
    type Input = T;
    type Output = Vec<T>;

    fn name(&self) -> &str {
        "aggregate"
    }

    fn run(&self, ctx: &StageCtx, input: Stream<T>) -> Stream<Vec<T>> {
        spawn_stage(ctx, input, |ctx, mut input, out| async move {
            let mut batch = Vec::new();
            while let Some(item) = input.next_or_cancel(ctx.token()).await {
                batch.push(item);
            }
            if ctx.is_cancelled() {
                return;
            }
            out.emit(ctx.token(), batch).await;
        })
    }
}
