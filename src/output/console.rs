use std::io::{self, Write};
use std::sync::Mutex;

use super::{render_table, OutputSink};
use crate::errors::SinkError;
use crate::modules::{ModuleResult, ResultData};

/// Representación legible de un resultado.
pub fn render(result: &ModuleResult) -> Result<String, SinkError> {
    Ok(match &result.data {
        ResultData::Text(text) => text.clone(),
        ResultData::Json(value) => serde_json::to_string_pretty(value)?,
        ResultData::Table(table) => render_table(table),
    })
}

/// Escribe cada resultado en un `Write` compartido (stdout por defecto).
pub struct ConsoleSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer<W>(writer: W) -> Self
        where W: Write + Send + 'static
    {
        Self { writer: Mutex::new(Box::new(writer)) }
    }
}

impl OutputSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    fn write(&self, result: &ModuleResult) -> Result<(), SinkError> {
        let text = render(result)?;
        // Un lock envenenado sólo significa que otro write falló a medias.
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(writer, "{text}").and_then(|_| writer.flush()).map_err(SinkError::io("<stdout>"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::modules::universal::echo::METADATA;

    #[test]
    fn render_text_and_json() {
        let text = ModuleResult::new(&METADATA, ResultData::Text("a\nb".into()));
        assert_eq!(render(&text).unwrap(), "a\nb");
        let value = ModuleResult::new(&METADATA, ResultData::Json(json!({"k": 1})));
        assert_eq!(render(&value).unwrap(), "{\n  \"k\": 1\n}");
    }
}
