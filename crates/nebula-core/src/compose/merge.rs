use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::context::StageCtx;
use crate::stream::{Emitter, Stream};

/// Reenvía cada stream de `inputs` a `out` hasta agotarlos.
///
/// Una tarea rastreada posee un `JoinSet` con un reenviador por stream y
/// conserva `out` hasta que todos terminan, así que la salida se cierra
/// después del último. Si el consumidor suelta la salida antes, se cancela
/// `stop` para que quien alimenta las entradas deje de hacerlo.
pub(crate) fn merge_into<T: Send + 'static>(ctx: &StageCtx,
                                            stage: &str,
                                            inputs: Vec<Stream<T>>,
                                            out: Emitter<T>,
                                            stop: CancellationToken) {
    let log = ctx.logger(stage);
    let token = ctx.token().clone();
    ctx.spawn(async move {
        let mut forwarders = JoinSet::new();
        for stream in inputs {
            forwarders.spawn(forward(stream, out.clone(), token.clone()));
        }
        let mut watching = true;
        loop {
            tokio::select! {
                joined = forwarders.join_next() => match joined {
                    Some(Err(err)) => log.error(format_args!("merge forwarder failed: {err}")),
                    Some(Ok(())) => {}
                    None => break,
                },
                _ = out.closed(), if watching => {
                    watching = false;
                    stop.cancel();
                }
            }
        }
    });
}

/// Copia `input` en `out`; termina al cerrarse la entrada, al dejar de leer
/// el consumidor o al cancelarse el run.
pub(crate) async fn forward<T: Send + 'static>(mut input: Stream<T>, out: Emitter<T>, token: CancellationToken) {
    while let Some(item) = input.next_or_cancel(&token).await {
        if !out.emit(&token, item).await {
            break;
        }
    }
}
