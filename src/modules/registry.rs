//! Registro de módulos disponibles, indexado por `id`.

use std::sync::Arc;

use indexmap::IndexMap;

use super::{universal, Module, Platform};
use crate::errors::ModuleError;

/// Conserva el orden de registro para que `list` sea estable.
#[derive(Default)]
pub struct Registry {
    modules: IndexMap<&'static str, Arc<dyn Module>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registro con todos los módulos incluidos en el binario.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(universal::echo::module());
        registry.register(universal::local_secrets::module());
        registry
    }

    /// Registra `module`; un `id` repetido sustituye al anterior.
    pub fn register<M>(&mut self, module: M)
        where M: Module + 'static
    {
        let id = module.metadata().id;
        if self.modules.insert(id, Arc::new(module)).is_some() {
            log::warn!("module {id} registered twice, keeping the last one");
        }
    }

    pub fn get(&self, id: &str) -> Result<Arc<dyn Module>, ModuleError> {
        self.modules
            .get(id)
            .cloned()
            .ok_or_else(|| ModuleError::UnknownModule(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Module>> {
        self.modules.values()
    }

    pub fn by_platform(&self, platform: Platform) -> impl Iterator<Item = &Arc<dyn Module>> {
        self.iter().filter(move |m| m.metadata().platform == platform)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
