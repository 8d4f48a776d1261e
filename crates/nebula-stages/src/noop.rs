use std::marker::PhantomData;

use nebula_core::{spawn_stage, Stage, StageCtx, Stream};

/// Consume su entrada y no emite nada.
///
/// Sirve para mantener la forma de un `Tee` o `Fan` cuando una rama está
/// desactivada por configuración: la rama sigue existiendo y drenando su
/// copia de la entrada, pero no aporta salida.
pub struct Noop<In, Out = In> {
    _io: PhantomData<fn(In) -> Out>,
}

impl<In, Out> Noop<In, Out> {
    pub fn new() -> Self {
        Self { _io: PhantomData }
    }
}

impl<In, Out> Default for Noop<In, Out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<In, Out> Stage for Noop<In, Out>
    where In: Send + 'static,
          Out: Send + 'static
{
    type Input = In;
    type Output = Out;

    fn name(&self) -> &str {
        "noop"
    }

    fn run(&self, ctx: &StageCtx, input: Stream<In>) -> Stream<Out> {
        spawn_stage(ctx, input, |ctx, mut input, _out| async move {
            while input.next_or_cancel(ctx.token()).await.is_some() {}
        })
    }
}
