#![allow(dead_code)]

use std::time::Duration;

use nebula_core::stage::{map, spawn_stage, stage_fn};
use nebula_core::{Stage, StageCtx, Stream};

/// Límite para cualquier drenaje en tests: si algo queda colgado el test
/// falla en vez de bloquearse.
pub const DRAIN_LIMIT: Duration = Duration::from_secs(5);

pub async fn drain<T>(stream: Stream<T>) -> Vec<T> {
    tokio::time::timeout(DRAIN_LIMIT, stream.collect()).await
                                                         .expect("stream should close before the limit")
}

pub async fn drain_sorted<T: Ord>(stream: Stream<T>) -> Vec<T> {
    let mut items = drain(stream).await;
    items.sort();
    items
}

pub fn inc() -> impl Stage<Input = i64, Output = i64> {
    map("inc", |x: i64| x + 1)
}

pub fn double() -> impl Stage<Input = i64, Output = i64> {
    map("double", |x: i64| x * 2)
}

pub fn render() -> impl Stage<Input = i64, Output = String> {
    map("render", |x: i64| x.to_string())
}

pub fn length() -> impl Stage<Input = String, Output = usize> {
    map("len", |s: String| s.len())
}

/// Fuente infinita: tras recibir el disparo emite 0, 1, 2... hasta que el
/// consumidor deja de leer o se cancela el run.
pub fn counter() -> impl Stage<Input = (), Output = u64> {
    stage_fn("counter", |ctx: &StageCtx, input: Stream<()>| {
        spawn_stage::<(), u64, _, _>(ctx, input, |ctx, mut input, out| async move {
            if input.next_or_cancel(ctx.token()).await.is_none() {
                return;
            }
            let mut n = 0u64;
            while out.emit(ctx.token(), n).await {
                n += 1;
            }
        })
    })
}

/// Como `counter`, pero anota cada emisión en el contador `emitted` del
/// `StateStore` del run.
pub fn counted_source() -> impl Stage<Input = (), Output = u64> {
    stage_fn("counted-source", |ctx: &StageCtx, input: Stream<()>| {
        spawn_stage::<(), u64, _, _>(ctx, input, |ctx, mut input, out| async move {
            if input.next_or_cancel(ctx.token()).await.is_none() {
                return;
            }
            let mut n = 0u64;
            loop {
                ctx.state().incr("emitted", 1);
                if !out.emit(ctx.token(), n).await {
                    break;
                }
                n += 1;
            }
        })
    })
}

/// Lee toda su entrada y no emite nada.
pub fn swallow() -> impl Stage<Input = u64, Output = u64> {
    stage_fn("swallow", |ctx: &StageCtx, input: Stream<u64>| {
        spawn_stage::<u64, u64, _, _>(ctx, input, |ctx, mut input, _out| async move {
            while input.next_or_cancel(ctx.token()).await.is_some() {}
        })
    })
}
