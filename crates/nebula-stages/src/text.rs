use std::fmt::Display;
use std::marker::PhantomData;

use nebula_core::{spawn_stage, Stage, StageCtx, Stream};

/// Convierte cada elemento a texto con su `Display`.
pub struct Stringify<T> {
    _t: PhantomData<fn(T)>,
}

impl<T> Stringify<T> {
    pub fn new() -> Self {
        Self { _t: PhantomData }
    }
}

impl<T> Default for Stringify<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stage for Stringify<T> where T: Display + Send + 'static
{
    type Input = T;
    type Output = String;

    fn name(&self) -> &str {
        "stringify"
    }

    fn run(&self, ctx: &StageCtx, input: Stream<T>) -> Stream<String> {
        spawn_stage(ctx, input, |ctx, mut input, out| async move {
            while let Some(item) = input.next_or_cancel(ctx.token()).await {
                if !out.emit(ctx.token(), item.to_string()).await {
                    break;
                }
            }
        })
    }
}

/// Convierte bytes a texto. UTF-8 válido se conserva tal cual; cualquier
/// otra cosa se muestra como lista de bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesToText;

impl BytesToText {
    pub fn render(bytes: Vec<u8>) -> String {
        match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => format!("{:?}", err.into_bytes()),
        }
    }
}

impl Stage for BytesToText {
    type Input = Vec<u8>;
    type Output = String;

    fn name(&self) -> &str {
        "bytes-to-text"
    }

    fn run(&self, ctx: &StageCtx, input: Stream<Vec<u8>>) -> Stream<String> {
        spawn_stage(ctx, input, |ctx, mut input, out| async move {
            while let Some(bytes) = input.next_or_cancel(ctx.token()).await {
                if !out.emit(ctx.token(), Self::render(bytes)).await {
                    break;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::BytesToText;

    #[test]
    fn invalid_utf8_renders_as_byte_list() {
        assert_eq!(BytesToText::render(b"plain".to_vec()), "plain");
        assert_eq!(BytesToText::render(vec![0xff, 0x01]), "[255, 1]");
    }
}
