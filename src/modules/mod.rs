//! Capa de módulos: cada módulo es un pipeline de stages con metadatos,
//! opciones y destinos de salida.
pub mod metadata;
pub mod module;
pub mod options;
pub mod registry;
pub mod result;
pub mod universal;

pub use metadata::{Metadata, OpsecLevel, Platform};
pub use module::{FactoryModule, Module};
pub use registry::Registry;
pub use result::{MarkdownTable, ModuleResult, ResultData};
