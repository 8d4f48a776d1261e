use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::ModuleError;

/// Plataforma a la que pertenece un módulo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Aws,
    Azure,
    Gcp,
    Oci,
    Saas,
    Universal,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Aws => "aws",
            Platform::Azure => "azure",
            Platform::Gcp => "gcp",
            Platform::Oci => "oci",
            Platform::Saas => "saas",
            Platform::Universal => "universal",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aws" => Ok(Platform::Aws),
            "azure" => Ok(Platform::Azure),
            "gcp" => Ok(Platform::Gcp),
            "oci" => Ok(Platform::Oci),
            "saas" => Ok(Platform::Saas),
            "universal" => Ok(Platform::Universal),
            other => Err(ModuleError::UnknownPlatform(other.to_string())),
        }
    }
}

/// Nivel de ruido que genera un módulo en el entorno objetivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpsecLevel {
    Stealth,
    Moderate,
    None,
}

impl fmt::Display for OpsecLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        OpsecLevel::Stealth => "stealth",
                        OpsecLevel::Moderate => "moderate",
                        OpsecLevel::None => "none",
                    })
    }
}

/// Metadatos estáticos de un módulo. `id` es el nombre del subcomando.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub platform: Platform,
    pub authors: &'static [&'static str],
    pub references: &'static [&'static str],
    pub opsec_level: OpsecLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parses_case_insensitive() {
        assert_eq!("AWS".parse::<Platform>().unwrap(), Platform::Aws);
        assert_eq!(" universal".parse::<Platform>().unwrap(), Platform::Universal);
        assert!(matches!("mainframe".parse::<Platform>(), Err(ModuleError::UnknownPlatform(p)) if p == "mainframe"));
    }
}
