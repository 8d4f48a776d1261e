//! Configuración del motor desde variables de entorno.
//! Usa `.env` si existe (cargado una sola vez) y valores por defecto.

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::constants::{DEFAULT_STREAM_CAPACITY, STREAM_CAPACITY_ENV};

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

static ENGINE_CONFIG: Lazy<EngineConfig> = Lazy::new(EngineConfig::from_env);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Capacidad de cada canal entre stages (mínimo 1).
    pub stream_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { stream_capacity: DEFAULT_STREAM_CAPACITY }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let stream_capacity = env::var(STREAM_CAPACITY_ENV).ok()
                                                           .and_then(|v| v.trim().parse::<usize>().ok())
                                                           .unwrap_or(DEFAULT_STREAM_CAPACITY)
                                                           .max(1);
        Self { stream_capacity }
    }

    /// Configuración del proceso, leída la primera vez que se usa.
    pub fn global() -> &'static EngineConfig {
        &ENGINE_CONFIG
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_one() {
        assert_eq!(EngineConfig::default().stream_capacity, 1);
    }

    #[test]
    fn global_capacity_never_zero() {
        assert!(EngineConfig::global().stream_capacity >= 1);
    }
}
