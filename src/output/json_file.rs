use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{target_path, OutputSink};
use crate::errors::SinkError;
use crate::modules::ModuleResult;

/// Un documento JSON por resultado dentro de `dir`. Se serializa sólo
/// `data`; el resto del resultado queda en el nombre del fichero.
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }
}

impl OutputSink for JsonFileSink {
    fn name(&self) -> &'static str {
        "json"
    }

    fn write(&self, result: &ModuleResult) -> Result<(), SinkError> {
        let path = target_path(&self.dir, result, "json");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(SinkError::io(parent))?;
        }
        let file = File::create(&path).map_err(SinkError::io(&path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &result.data)?;
        writer.flush().map_err(SinkError::io(&path))?;
        log::info!("json written to {}", path.display());
        Ok(())
    }
}
