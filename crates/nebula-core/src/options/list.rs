use indexmap::IndexMap;

use super::OptionCell;
use crate::errors::OptionError;

/// Colección ordenada de opciones, indexada por nombre.
///
/// Conserva el orden de inserción (para listar en la CLI). Se comparte como
/// `Arc<OptionList>` una vez que el pipeline arranca y ya no se modifica.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    cells: IndexMap<String, OptionCell>,
}

impl OptionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta o reemplaza (por nombre) una celda.
    pub fn push(&mut self, cell: OptionCell) {
        self.cells.insert(cell.name.clone(), cell);
    }

    pub fn with(mut self, cell: OptionCell) -> Self {
        self.push(cell);
        self
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&OptionCell> {
        self.cells.get(name)
    }

    /// Busca por nombre largo o por flag corto.
    pub fn find(&self, key: &str) -> Option<&OptionCell> {
        self.cells
            .get(key)
            .or_else(|| self.cells.values().find(|c| c.short.as_deref() == Some(key)))
    }

    /// Celda obligatoria para construir un stage: su ausencia es un error de
    /// construcción del módulo.
    pub fn require(&self, name: &str) -> Result<&OptionCell, OptionError> {
        self.get(name).ok_or_else(|| OptionError::Missing { name: name.to_string() })
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|c| c.value.as_str())
    }

    pub fn string(&self, name: &str) -> Result<String, OptionError> {
        Ok(self.require(name)?.value.clone())
    }

    pub fn bool(&self, name: &str) -> Result<bool, OptionError> {
        self.require(name)?.as_bool()
    }

    pub fn int(&self, name: &str) -> Result<i64, OptionError> {
        self.require(name)?.as_int()
    }

    pub fn list(&self, name: &str) -> Result<Vec<String>, OptionError> {
        Ok(self.require(name)?.as_list())
    }

    /// Asigna el valor de una opción conocida (por nombre o flag corto).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), OptionError> {
        let name = self.find(key)
                       .map(|c| c.name.clone())
                       .ok_or_else(|| OptionError::Unknown { name: key.to_string() })?;
        if let Some(cell) = self.cells.get_mut(&name) {
            cell.value = value.to_string();
        }
        Ok(())
    }

    /// Aplica pares `clave=valor` en orden; falla en la primera clave
    /// desconocida.
    pub fn apply<'a, I>(&mut self, overrides: I) -> Result<(), OptionError>
        where I: IntoIterator<Item = (&'a str, &'a str)>
    {
        for (key, value) in overrides {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Valida todas las celdas en orden; devuelve el primer fallo.
    pub fn validate(&self) -> Result<(), OptionError> {
        self.cells.values().try_for_each(OptionCell::validate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionCell> {
        self.cells.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<OptionCell> for OptionList {
    fn from_iter<T: IntoIterator<Item = OptionCell>>(iter: T) -> Self {
        let mut list = OptionList::new();
        for cell in iter {
            list.push(cell);
        }
        list
    }
}

impl Extend<OptionCell> for OptionList {
    fn extend<T: IntoIterator<Item = OptionCell>>(&mut self, iter: T) {
        for cell in iter {
            self.push(cell);
        }
    }
}
