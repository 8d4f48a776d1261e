use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{target_path, OutputSink};
use crate::errors::SinkError;
use crate::modules::{MarkdownTable, ModuleResult, ResultData};

/// Tabla markdown con columnas alineadas al ancho máximo de cada una.
pub fn render_table(table: &MarkdownTable) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    if !table.heading.is_empty() {
        out.push_str(&format!("# {}\n\n", table.heading));
    }
    out.push_str(&table_row(&table.headers, &widths));
    let dividers: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&table_row(&dividers, &widths));
    for row in &table.rows {
        out.push_str(&table_row(row, &widths));
    }
    out
}

fn table_row(cells: &[String], widths: &[usize]) -> String {
    let mut out = String::from("|");
    for (cell, &width) in cells.iter().zip(widths) {
        out.push_str(&format!(" {cell:<width$} |"));
    }
    out.push('\n');
    out
}

/// Añade tablas a `<dir>/<fichero>.md`. Varios resultados con el mismo
/// nombre comparten fichero, separados por líneas en blanco.
pub struct MarkdownFileSink {
    dir: PathBuf,
}

impl MarkdownFileSink {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }
}

impl OutputSink for MarkdownFileSink {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn write(&self, result: &ModuleResult) -> Result<(), SinkError> {
        let ResultData::Table(table) = &result.data else {
            return Err(SinkError::UnsupportedData { sink: self.name(),
                                                    kind: result.data.kind() });
        };
        let path = target_path(&self.dir, result, "md");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(SinkError::io(parent))?;
        }
        let mut file = OpenOptions::new().create(true)
                                         .append(true)
                                         .open(&path)
                                         .map_err(SinkError::io(&path))?;
        write!(file, "{}\n\n\n", render_table(table)).map_err(SinkError::io(&path))?;
        log::info!("markdown table written to {}", path.display());
        Ok(())
    }
}
