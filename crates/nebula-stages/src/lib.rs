//! nebula-stages: stages reutilizables sobre el motor de `nebula-core`.
//!
//! Este crate provee:
//! - Stages terminales y de utilidad (`Echo`, `Noop`, `Aggregate`, `Unique`).
//! - Conversión de texto y JSON (`Stringify`, `BytesToText`, `ToJson`,
//!   `ParseJson`).
//! - Entrada delimitada por comas con el centinela `ALL`.
//! - Lectura de ficheros locales (`FilesOfType`, `FileLines`).
//!
//! Ningún stage aquí conoce módulos ni proveedores cloud; sólo cumplen el
//! contrato de `Stage`.

pub mod aggregate;
pub mod delimited;
pub mod echo;
pub mod files;
pub mod json;
pub mod noop;
pub mod text;
pub mod unique;

pub use aggregate::Aggregate;
pub use delimited::{is_all, split_delimited, SplitDelimited, ALL_SENTINEL};
pub use echo::Echo;
pub use files::{FileLines, FilesOfType, SourceLine, DIR_OPTION};
pub use json::{ParseJson, ToJson};
pub use noop::Noop;
pub use text::{BytesToText, Stringify};
pub use unique::Unique;
