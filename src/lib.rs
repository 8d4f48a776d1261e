//! Nebula
//!
//! Capa de aplicación sobre `nebula-core` y `nebula-stages`:
//! - `modules`: módulos ejecutables (metadatos, opciones y pipeline).
//! - `output`: destinos donde se escriben los resultados.
//! - `config` y `logging`: entorno y backend de logs del binario.

pub mod config;
pub mod errors;
pub mod logging;
pub mod modules;
pub mod output;
