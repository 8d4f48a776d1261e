//! Destinos de salida para los resultados de un módulo.
//!
//! Cada `ModuleResult` se entrega a todos los destinos seleccionados; un
//! destino que no sabe representar el contenido devuelve
//! `SinkError::UnsupportedData` en vez de escribir algo parcial.
mod console;
mod json_file;
mod markdown;

use std::path::{Path, PathBuf};

use clap::ValueEnum;

pub use console::{render, ConsoleSink};
pub use json_file::JsonFileSink;
pub use markdown::{render_table, MarkdownFileSink};

use crate::errors::SinkError;
use crate::modules::ModuleResult;

/// Destino de resultados.
pub trait OutputSink: Send + Sync {
    fn name(&self) -> &'static str;

    fn write(&self, result: &ModuleResult) -> Result<(), SinkError>;
}

/// Formato seleccionable desde la CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Markdown,
}

/// `<module>-<YYYYmmddHHMMSS>.<ext>` en hora local.
pub fn default_file_name(module: &str, ext: &str) -> String {
    format!("{module}-{}.{ext}", chrono::Local::now().format("%Y%m%d%H%M%S"))
}

/// Ruta final: el nombre del resultado si lo trae, si no uno por defecto.
pub(crate) fn target_path(dir: &Path, result: &ModuleResult, ext: &str) -> PathBuf {
    match &result.filename {
        Some(name) => dir.join(name),
        None => dir.join(default_file_name(&result.module, ext)),
    }
}

/// Destinos para `format`. La consola siempre acompaña a los ficheros.
pub fn sinks_for(format: OutputFormat, dir: &Path) -> Vec<Box<dyn OutputSink>> {
    let console: Box<dyn OutputSink> = Box::new(ConsoleSink::stdout());
    match format {
        OutputFormat::Console => vec![console],
        OutputFormat::Json => vec![console, Box::new(JsonFileSink::new(dir))],
        OutputFormat::Markdown => vec![console, Box::new(MarkdownFileSink::new(dir))],
    }
}
