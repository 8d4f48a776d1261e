use std::marker::PhantomData;

use nebula_core::{spawn_stage, Stage, StageCtx, Stream};
use serde::Serialize;
use serde_json::Value;

/// Serializa cada elemento a JSON. Los elementos que fallan se registran y
/// se omiten.
pub struct ToJson<T> {
    _t: PhantomData<fn(T)>,
}

impl<T> ToJson<T> {
    pub fn new() -> Self {
        Self { _t: PhantomData }
    }
}

impl<T> Default for ToJson<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stage for ToJson<T> where T: Serialize + Send + 'static
{
    type Input = T;
    type Output = Vec<u8>;

    fn name(&self) -> &str {
        "to-json"
    }

    fn run(&self, ctx: &StageCtx, input: Stream<T>) -> Stream<Vec<u8>> {
        let log = ctx.logger(self.name());
        spawn_stage(ctx, input, move |ctx, mut input, out| async move {
            while let Some(item) = input.next_or_cancel(ctx.token()).await {
                let bytes = match serde_json::to_vec(&item) {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        log.warn(format_args!("skipping item: {err}"));
                        continue;
                    }
                };
                if !out.emit(ctx.token(), bytes).await {
                    break;
                }
            }
        })
    }
}

/// Interpreta cada texto como JSON; el texto inválido se registra y se
/// omite.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParseJson;

impl Stage for ParseJson {
    type Input = String;
    type Output = Value;

    fn name(&self) -> &str {
        "parse-json"
    }

    fn run(&self, ctx: &StageCtx, input: Stream<String>) -> Stream<Value> {
        let log = ctx.logger(self.name());
        spawn_stage(ctx, input, move |ctx, mut input, out| async move {
            while let Some(text) = input.next_or_cancel(ctx.token()).await {
                let value = match serde_json::from_str::<Value>(&text) {
                    Ok(value) => value,
                    Err(err) => {
                        log.warn(format_args!("invalid json: {err}"));
                        continue;
                    }
                };
                if !out.emit(ctx.token(), value).await {
                    break;
                }
            }
        })
    }
}
