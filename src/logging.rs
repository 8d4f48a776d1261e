//! Inicialización del backend de logs para el binario.
//!
//! Las librerías escriben con la fachada `log`; aquí se instala un
//! subscriber de `tracing-subscriber` que también recoge esos registros.
//! `RUST_LOG`, si está definido, tiene prioridad sobre el nivel configurado.

use nebula_core::OptionError;
use tracing_subscriber::EnvFilter;

use crate::modules::options::log_level;

/// Traduce un nivel de la CLI a directiva de `EnvFilter`.
pub fn directive(level: &str) -> &str {
    match level {
        "none" => "off",
        other => other,
    }
}

/// Valida `level` e instala el subscriber global. Llamadas posteriores no
/// tienen efecto.
pub fn init(level: &str) -> Result<(), OptionError> {
    log_level().default_value(level).validate()?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(level)));
    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_target(false)
                                     .with_writer(std::io::stderr)
                                     .try_init();
    Ok(())
}
