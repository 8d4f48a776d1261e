use std::collections::HashSet;
use std::hash::Hash;
use std::marker::PhantomData;

use nebula_core::{spawn_stage, Stage, StageCtx, Stream};

/// Reenvía sólo la primera aparición de cada elemento. El conjunto de
/// vistos vive dentro de cada ejecución del stage.
pub struct Unique<T> {
    _t: PhantomData<fn(T) -> T>,
}

impl<T> Unique<T> {
    pub fn new() -> Self {
        Self { _t: PhantomData }
    }
}

impl<T> Default for Unique<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stage for Unique<T> where T: Eq + Hash + Clone + Send + 'static
{
    type Input = T;
    type Output = T;

    fn name(&self) -> &str {
        "unique"
    }

    fn run(&self, ctx: &StageCtx, input: Stream<T>) -> Stream<T> {
        spawn_stage(ctx, input, |ctx, mut input, out| async move {
            let mut seen = HashSet::new();
            while let Some(item) = input.next_or_cancel(ctx.token()).await {
                if !seen.insert(item.clone()) {
                    continue;
                }
                if !out.emit(ctx.token(), item).await {
                    break;
                }
            }
        })
    }
}
