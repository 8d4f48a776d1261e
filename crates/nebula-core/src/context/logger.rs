use std::fmt;

use crate::constants::STAGE_LOG_TARGET;

/// Logger con el prefijo `módulo/stage`. Escribe a través de la fachada
/// `log`; quien ejecute el binario decide el backend.
#[derive(Debug, Clone)]
pub struct StageLogger {
    scope: String,
}

impl StageLogger {
    #[inline]
    pub fn new(module: &str, stage: &str) -> Self {
        Self { scope: format!("{module}/{stage}") }
    }

    #[inline]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        log::debug!(target: STAGE_LOG_TARGET, "[{}] {}", self.scope, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        log::info!(target: STAGE_LOG_TARGET, "[{}] {}", self.scope, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        log::warn!(target: STAGE_LOG_TARGET, "[{}] {}", self.scope, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        log::error!(target: STAGE_LOG_TARGET, "[{}] {}", self.scope, args);
    }
}
