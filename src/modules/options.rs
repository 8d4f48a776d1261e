//! Definiciones de opciones compartidas entre módulos.
//!
//! Cada función devuelve una celda nueva con su valor por defecto; los
//! módulos ajustan `required`/`default_value` según necesiten. El directorio
//! de salida y el nivel de log son flags globales de la CLI, no opciones de
//! módulo; `log_level` sólo se usa para validar el flag.

use nebula_core::OptionCell;
use nebula_stages::DIR_OPTION;

use crate::config::DEFAULT_LOG_LEVEL;

pub const LOG_LEVEL: &str = "log-level";
pub const EXTENSIONS: &str = "extensions";
pub const VALUES: &str = "values";
pub const SCAN_KEYS: &str = "scan-keys";
pub const SCAN_PASSWORDS: &str = "scan-passwords";

pub fn log_level() -> OptionCell {
    OptionCell::string(LOG_LEVEL, "log level (none, debug, info, warn, error)").format("^(none|debug|info|warn|error)$")
                                                                               .default_value(DEFAULT_LOG_LEVEL)
}

pub fn dir() -> OptionCell {
    OptionCell::string(DIR_OPTION, "directory to read input files from").short("d")
}

pub fn extensions() -> OptionCell {
    OptionCell::string(EXTENSIONS, "comma separated file name suffixes to include").short("e")
                                                                                    .default_value(".env,.json,.yaml,.yml,.ini,.cfg,.conf,.tf,.sh")
}

pub fn values() -> OptionCell {
    OptionCell::string(VALUES, "comma separated values").short("v")
}

pub fn scan_keys() -> OptionCell {
    OptionCell::bool(SCAN_KEYS, "look for AWS access key ids and private keys").default_value("true")
}

pub fn scan_passwords() -> OptionCell {
    OptionCell::bool(SCAN_PASSWORDS, "look for hard-coded password assignments").default_value("true")
}
