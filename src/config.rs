//! Configuración central de la CLI.
//! Carga variables de entorno (.env) y expone una estructura inmutable.
//! Los flags de la línea de comandos tienen prioridad sobre estos valores.
use std::env;
use std::path::PathBuf;

use once_cell::sync::Lazy;

/// Directorio de salida cuando no se indica otro.
pub const DEFAULT_OUTPUT_DIR: &str = "nebula-output";
/// Nivel de log cuando no se indica otro.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `none`, `error`, `warn`, `info` o `debug` (`NEBULA_LOG_LEVEL`).
    pub log_level: String,
    /// Directorio base de los ficheros de salida (`NEBULA_OUTPUT_DIR`).
    pub output_dir: PathBuf,
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

impl AppConfig {
    pub fn from_env() -> Self {
        nebula_core::config::init_dotenv();
        let log_level = env::var("NEBULA_LOG_LEVEL").ok()
                                                    .filter(|v| !v.trim().is_empty())
                                                    .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let output_dir = env::var("NEBULA_OUTPUT_DIR").ok()
                                                      .filter(|v| !v.trim().is_empty())
                                                      .map(PathBuf::from)
                                                      .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        Self { log_level, output_dir }
    }

    pub fn global() -> &'static AppConfig {
        &CONFIG
    }
}
