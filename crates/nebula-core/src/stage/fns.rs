//! Stages elementales construidos a partir de funciones por elemento.

use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{spawn_stage, Stage};
use crate::context::StageCtx;
use crate::stream::Stream;

/// Qué hacer cuando la función de un `TryMap` falla para un elemento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnError {
    /// Registra el error y continúa con el siguiente elemento.
    #[default]
    Skip,
    /// Registra el error, deja de leer y cierra la salida.
    Abort,
}

pub struct Map<F, In, Out> {
    name: String,
    f: Arc<F>,
    _io: PhantomData<fn(In) -> Out>,
}

pub fn map<In, Out, F>(name: &str, f: F) -> Map<F, In, Out>
    where F: Fn(In) -> Out + Send + Sync + 'static
{
    Map { name: name.to_string(),
          f: Arc::new(f),
          _io: PhantomData }
}

impl<F, In, Out> Stage for Map<F, In, Out>
    where In: Send + 'static,
          Out: Send + 'static,
          F: Fn(In) -> Out + Send + Sync + 'static
{
    type Input = In;
    type Output = Out;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, ctx: &StageCtx, input: Stream<In>) -> Stream<Out> {
        let f = Arc::clone(&self.f);
        spawn_stage(ctx, input, move |ctx, mut input, out| async move {
            while let Some(item) = input.next_or_cancel(ctx.token()).await {
                if !out.emit(ctx.token(), f(item)).await {
                    break;
                }
            }
        })
    }
}

pub struct FilterMap<F, In, Out> {
    name: String,
    f: Arc<F>,
    _io: PhantomData<fn(In) -> Out>,
}

/// Aplica `f` y emite sólo los `Some`.
pub fn filter_map<In, Out, F>(name: &str, f: F) -> FilterMap<F, In, Out>
    where F: Fn(In) -> Option<Out> + Send + Sync + 'static
{
    FilterMap { name: name.to_string(),
                f: Arc::new(f),
                _io: PhantomData }
}

impl<F, In, Out> Stage for FilterMap<F, In, Out>
    where In: Send + 'static,
          Out: Send + 'static,
          F: Fn(In) -> Option<Out> + Send + Sync + 'static
{
    type Input = In;
    type Output = Out;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, ctx: &StageCtx, input: Stream<In>) -> Stream<Out> {
        let f = Arc::clone(&self.f);
        spawn_stage(ctx, input, move |ctx, mut input, out| async move {
            while let Some(item) = input.next_or_cancel(ctx.token()).await {
                let Some(mapped) = f(item) else { continue };
                if !out.emit(ctx.token(), mapped).await {
                    break;
                }
            }
        })
    }
}

pub struct TryMap<F, In, Out> {
    name: String,
    policy: OnError,
    f: Arc<F>,
    _io: PhantomData<fn(In) -> Out>,
}

/// Como `map`, con una política explícita ante errores por elemento.
pub fn try_map<In, Out, E, F>(name: &str, policy: OnError, f: F) -> TryMap<F, In, Out>
    where E: Display,
          F: Fn(In) -> Result<Out, E> + Send + Sync + 'static
{
    TryMap { name: name.to_string(),
             policy,
             f: Arc::new(f),
             _io: PhantomData }
}

impl<F, In, Out, E> Stage for TryMap<F, In, Out>
    where In: Send + 'static,
          Out: Send + 'static,
          E: Display,
          F: Fn(In) -> Result<Out, E> + Send + Sync + 'static
{
    type Input = In;
    type Output = Out;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, ctx: &StageCtx, input: Stream<In>) -> Stream<Out> {
        let f = Arc::clone(&self.f);
        let policy = self.policy;
        let log = ctx.logger(&self.name);
        spawn_stage(ctx, input, move |ctx, mut input, out| async move {
            while let Some(item) = input.next_or_cancel(ctx.token()).await {
                let mapped = match f(item) {
                    Ok(mapped) => mapped,
                    Err(err) => {
                        log.error(format_args!("{err}"));
                        match policy {
                            OnError::Skip => continue,
                            OnError::Abort => break,
                        }
                    }
                };
                if !out.emit(ctx.token(), mapped).await {
                    break;
                }
            }
        })
    }
}
