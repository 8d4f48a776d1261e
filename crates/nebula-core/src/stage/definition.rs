use std::future::Future;
use std::marker::PhantomData;

use crate::compose::Chain;
use crate::context::StageCtx;
use crate::errors::PipelineError;
use crate::options::OptionList;
use crate::stream::{channel, Emitter, Stream};

/// Unidad de procesamiento: transforma un stream de `Input` en uno de
/// `Output`.
///
/// Contrato que cumple toda implementación:
/// - lee su entrada hasta el cierre (o documenta que aborta antes);
/// - cada lectura y cada envío compiten con la cancelación del run;
/// - cierra su salida exactamente una vez, soltando su `Emitter`;
/// - nunca cierra un stream que no creó;
/// - lanza su trabajo con `StageCtx::spawn` para que quede rastreado.
///
/// Un mismo stage puede ejecutarse varias veces a la vez (ver `Fan`); el
/// estado mutable interno debe sincronizarlo la propia implementación.
pub trait Stage: Send + Sync + 'static {
    type Input: Send + 'static;
    type Output: Send + 'static;

    /// Nombre estable usado en logs y errores.
    fn name(&self) -> &str;

    /// Conecta el stage a `input` y devuelve su stream de salida.
    fn run(&self, ctx: &StageCtx, input: Stream<Self::Input>) -> Stream<Self::Output>;
}

/// Construye la entrada y la cadena de un módulo a partir de sus opciones.
pub type StageFactory<In, Out> = fn(&OptionList) -> Result<(Stream<In>, Chain<In, Out>), PipelineError>;

/// Lanza `body` como tarea rastreada con un canal de salida nuevo y
/// devuelve el lado consumidor. El canal se cierra cuando `body` termina y
/// suelta su `Emitter`.
pub fn spawn_stage<In, Out, F, Fut>(ctx: &StageCtx, input: Stream<In>, body: F) -> Stream<Out>
    where In: Send + 'static,
          Out: Send + 'static,
          F: FnOnce(StageCtx, Stream<In>, Emitter<Out>) -> Fut,
          Fut: Future<Output = ()> + Send + 'static
{
    let (tx, rx) = channel::<Out>();
    ctx.spawn(body(ctx.clone(), input, tx));
    rx
}

/// Stage definido por una función que recibe el contexto y la entrada.
pub struct StageFn<F, In, Out> {
    name: String,
    f: F,
    _io: PhantomData<fn(In) -> Out>,
}

/// Envuelve una función como stage con nombre.
pub fn stage_fn<In, Out, F>(name: &str, f: F) -> StageFn<F, In, Out>
    where F: Fn(&StageCtx, Stream<In>) -> Stream<Out> + Send + Sync + 'static
{
    StageFn { name: name.to_string(),
              f,
              _io: PhantomData }
}

impl<F, In, Out> Stage for StageFn<F, In, Out>
    where In: Send + 'static,
          Out: Send + 'static,
          F: Fn(&StageCtx, Stream<In>) -> Stream<Out> + Send + Sync + 'static
{
    type Input = In;
    type Output = Out;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, ctx: &StageCtx, input: Stream<In>) -> Stream<Out> {
        (self.f)(ctx, input)
    }
}
