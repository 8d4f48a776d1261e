//! Stages sobre ficheros locales.

use std::path::{Path, PathBuf};

use nebula_core::{spawn_stage, Emitter, Stage, StageCtx, StageLogger, Stream};
use serde::Serialize;
use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Opción con el directorio que examina `FilesOfType`.
pub const DIR_OPTION: &str = "dir";

/// Recibe sufijos de nombre de fichero (p. ej. `json`, `.env`) y emite las
/// rutas de los ficheros del directorio `dir` que terminan en cada uno. No
/// desciende a subdirectorios. Un sufijo vacío coincide con todo.
///
/// Si el directorio no se puede leer, registra el error y cierra la salida
/// sin procesar más sufijos.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilesOfType;

impl Stage for FilesOfType {
    type Input = String;
    type Output = PathBuf;

    fn name(&self) -> &str {
        "files-of-type"
    }

    fn run(&self, ctx: &StageCtx, input: Stream<String>) -> Stream<PathBuf> {
        let log = ctx.logger(self.name());
        spawn_stage(ctx, input, move |ctx, mut input, out| async move {
            let Some(dir) = ctx.options().value(DIR_OPTION).map(PathBuf::from) else {
                log.error(format_args!("option {DIR_OPTION} not provided"));
                return;
            };
            while let Some(suffix) = input.next_or_cancel(ctx.token()).await {
                match matching_files(&dir, &suffix).await {
                    Ok(files) => {
                        for path in files {
                            if !out.emit(ctx.token(), path).await {
                                return;
                            }
                        }
                    }
                    Err(err) => {
                        log.error(format_args!("{}: {err}", dir.display()));
                        return;
                    }
                }
            }
        })
    }
}

async fn matching_files(dir: &Path, suffix: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(suffix) {
            files.push(entry.path());
        }
    }
    // read_dir no garantiza orden
    files.sort();
    Ok(files)
}

/// Línea de un fichero de texto con su posición (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLine {
    pub path: PathBuf,
    pub number: usize,
    pub text: String,
}

/// Emite las líneas de cada fichero recibido. Los bytes que no son UTF-8
/// válido se sustituyen por `U+FFFD` y la lectura sigue. Un fichero que no
/// se puede abrir o leer se registra y se salta; el resto continúa.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileLines;

impl Stage for FileLines {
    type Input = PathBuf;
    type Output = SourceLine;

    fn name(&self) -> &str {
        "file-lines"
    }

    fn run(&self, ctx: &StageCtx, input: Stream<PathBuf>) -> Stream<SourceLine> {
        let log = ctx.logger(self.name());
        spawn_stage(ctx, input, move |ctx, mut input, out| async move {
            while let Some(path) = input.next_or_cancel(ctx.token()).await {
                match emit_lines(&ctx, &log, &path, &out).await {
                    Ok(true) => {}
                    Ok(false) => return,
                    Err(err) => log.error(format_args!("{}: {err}", path.display())),
                }
            }
        })
    }
}

/// Texto de una línea sin su terminador `\n` o `\r\n`.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// `Ok(false)` si el consumidor dejó de leer o se canceló el run.
async fn emit_lines(ctx: &StageCtx, log: &StageLogger, path: &Path, out: &Emitter<SourceLine>) -> std::io::Result<bool> {
    let file = fs::File::open(path).await?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut number = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        number += 1;
        let line = SourceLine { path: path.to_path_buf(),
                                number,
                                text: decode_line(&buf) };
        if !out.emit(ctx.token(), line).await {
            return Ok(false);
        }
    }
    log.debug(format_args!("{} lines from {}", number, path.display()));
    Ok(true)
}
