//! Entrada delimitada por comas.
//!
//! Los tokens se recortan y los vacíos se descartan, así `"a, b,,c"`
//! produce `a`, `b`, `c`. El valor `ALL` no se expande aquí: cada módulo
//! decide qué significa con `is_all`.

use nebula_core::{generator, spawn_stage, Stage, StageCtx, Stream};

/// Valor centinela que los módulos interpretan como "todos".
pub const ALL_SENTINEL: &str = "ALL";

#[inline]
pub fn is_all(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(ALL_SENTINEL)
}

fn tokens(value: &str) -> impl Iterator<Item = String> + '_ {
    value.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_string)
}

/// Stream con los tokens de `value` en orden.
pub fn split_delimited(value: &str) -> Stream<String> {
    generator(tokens(value).collect())
}

/// Versión stage de `split_delimited`: cada texto de entrada se parte en
/// sus tokens.
#[derive(Debug, Default, Clone, Copy)]
pub struct SplitDelimited;

impl Stage for SplitDelimited {
    type Input = String;
    type Output = String;

    fn name(&self) -> &str {
        "split-delimited"
    }

    fn run(&self, ctx: &StageCtx, input: Stream<String>) -> Stream<String> {
        spawn_stage(ctx, input, |ctx, mut input, out| async move {
            'items: while let Some(value) = input.next_or_cancel(ctx.token()).await {
                for token in tokens(&value).collect::<Vec<_>>() {
                    if !out.emit(ctx.token(), token).await {
                        break 'items;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sentinel_is_case_insensitive() {
        assert!(is_all("ALL"));
        assert!(is_all(" all "));
        assert!(!is_all("AWS::S3::Bucket"));
    }
}
