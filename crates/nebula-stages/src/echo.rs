use std::fmt::Debug;
use std::marker::PhantomData;

use nebula_core::{spawn_stage, Stage, StageCtx, Stream};

/// Identidad que registra cada elemento a nivel debug.
pub struct Echo<T> {
    _t: PhantomData<fn(T) -> T>,
}

impl<T> Echo<T> {
    pub fn new() -> Self {
        Self { _t: PhantomData }
    }
}

impl<T> Default for Echo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stage for Echo<T> where T: Debug + Send + 'static
{
    type Input = T;
    type Output = T;

    fn name(&self) -> &str {
        "echo"
    }

    fn run(&self, ctx: &StageCtx, input: Stream<T>) -> Stream<T> {
        let log = ctx.logger(self.name());
        spawn_stage(ctx, input, move |ctx, mut input, out| async move {
            while let Some(item) = input.next_or_cancel(ctx.token()).await {
                log.debug(format_args!("echo: {item:?}"));
                if !out.emit(ctx.token(), item).await {
                    break;
                }
            }
        })
    }
}
