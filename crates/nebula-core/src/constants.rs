//! Constantes del motor de composición.
//!
//! Valores estáticos compartidos por la configuración, los streams y el
//! logging de stages.

/// Versión lógica del motor. Se registra al construir cada pipeline.
pub const ENGINE_VERSION: &str = "N1.0";

/// Capacidad por defecto de cada canal entre stages. Con 1 el productor se
/// bloquea hasta que el consumidor retira el elemento anterior.
pub const DEFAULT_STREAM_CAPACITY: usize = 1;

/// Variable de entorno que sobreescribe `DEFAULT_STREAM_CAPACITY`.
pub const STREAM_CAPACITY_ENV: &str = "NEBULA_STREAM_CAPACITY";

/// Target de `log` usado por `StageLogger`.
pub const STAGE_LOG_TARGET: &str = "nebula::stage";

/// Identificador de módulo usado cuando un contexto no pertenece a ninguno.
pub const DEFAULT_MODULE_ID: &str = "adhoc";
