use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::OptionError;

/// Tipo declarado de una opción. El valor siempre se guarda como texto y se
/// comprueba contra este tipo en `validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    String,
    Bool,
    Int,
}

/// Celda de configuración con nombre: definición más valor actual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCell {
    pub name: String,
    pub short: Option<String>,
    pub description: String,
    pub required: bool,
    pub kind: OptionKind,
    pub value: String,
    /// Expresión regular que debe cumplir un valor no vacío.
    pub format: Option<String>,
    /// Valores permitidos (comparación sin distinguir mayúsculas). Un valor
    /// con comas se valida token a token.
    pub allowed: Vec<String>,
}

impl OptionCell {
    pub fn new(name: &str, description: &str, kind: OptionKind) -> Self {
        Self { name: name.to_string(),
               short: None,
               description: description.to_string(),
               required: false,
               kind,
               value: String::new(),
               format: None,
               allowed: Vec::new() }
    }

    #[inline]
    pub fn string(name: &str, description: &str) -> Self {
        Self::new(name, description, OptionKind::String)
    }

    #[inline]
    pub fn bool(name: &str, description: &str) -> Self {
        Self::new(name, description, OptionKind::Bool)
    }

    #[inline]
    pub fn int(name: &str, description: &str) -> Self {
        Self::new(name, description, OptionKind::Int)
    }

    pub fn short(mut self, short: &str) -> Self {
        self.short = Some(short.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn format(mut self, pattern: &str) -> Self {
        self.format = Some(pattern.to_string());
        self
    }

    pub fn allowed<I, S>(mut self, values: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.allowed = values.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        !self.value.is_empty()
    }

    /// Reglas, en orden:
    /// 1. vacío y no requerido: válido;
    /// 2. vacío y requerido: `Required`;
    /// 3. formato regex no cumplido: `InvalidFormat`;
    /// 4. algún token fuera de `allowed`: `NotAllowed`;
    /// 5. `Bool`/`Int` que no parsean: `InvalidBool`/`InvalidInt`.
    pub fn validate(&self) -> Result<(), OptionError> {
        if self.value.is_empty() {
            if self.required {
                return Err(OptionError::Required { name: self.name.clone() });
            }
            return Ok(());
        }

        if let Some(pattern) = &self.format {
            let re = Regex::new(pattern).map_err(|e| OptionError::InvalidPattern { name: self.name.clone(),
                                                                                  reason: e.to_string() })?;
            if !re.is_match(&self.value) {
                return Err(OptionError::InvalidFormat { name: self.name.clone() });
            }
        }

        if !self.allowed.is_empty() {
            for token in self.value.split(',').map(str::trim) {
                if !self.allowed.iter().any(|a| a.eq_ignore_ascii_case(token)) {
                    return Err(OptionError::NotAllowed { name: self.name.clone(),
                                                         value: token.to_string(),
                                                         allowed: self.allowed.join(", ") });
                }
            }
        }

        match self.kind {
            OptionKind::String => Ok(()),
            OptionKind::Bool => self.as_bool().map(|_| ()),
            OptionKind::Int => self.as_int().map(|_| ()),
        }
    }

    /// Interpreta el valor como booleano (`1/t/true/0/f/false`, sin
    /// distinguir mayúsculas). Vacío equivale a `false`.
    pub fn as_bool(&self) -> Result<bool, OptionError> {
        if self.value.is_empty() {
            return Ok(false);
        }
        parse_bool(&self.value).ok_or_else(|| OptionError::InvalidBool { name: self.name.clone(),
                                                                         value: self.value.clone() })
    }

    pub fn as_int(&self) -> Result<i64, OptionError> {
        self.value
            .trim()
            .parse::<i64>()
            .map_err(|_| OptionError::InvalidInt { name: self.name.clone(),
                                                   value: self.value.clone() })
    }

    /// Valor separado por comas: tokens recortados, sin vacíos.
    pub fn as_list(&self) -> Vec<String> {
        self.value
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}
