use serde::Serialize;
use serde_json::Value;

use super::{Metadata, Platform};

/// Tabla lista para volcarse como markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownTable {
    pub heading: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Contenido de un resultado. Se serializa sin etiqueta: el JSON escrito es
/// directamente el valor, la tabla o el texto.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultData {
    Json(Value),
    Table(MarkdownTable),
    Text(String),
}

impl ResultData {
    pub fn kind(&self) -> &'static str {
        match self {
            ResultData::Json(_) => "json",
            ResultData::Table(_) => "table",
            ResultData::Text(_) => "text",
        }
    }
}

/// Unidad de salida de un módulo; cada destino decide cómo escribirla.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleResult {
    pub module: String,
    pub platform: Platform,
    /// Nombre de fichero sugerido; si falta, el destino genera uno.
    pub filename: Option<String>,
    pub data: ResultData,
}

impl ModuleResult {
    pub fn new(metadata: &Metadata, data: ResultData) -> Self {
        Self { module: metadata.id.to_string(),
               platform: metadata.platform,
               filename: None,
               data }
    }

    pub fn with_filename(mut self, filename: &str) -> Self {
        self.filename = Some(filename.to_string());
        self
    }
}
