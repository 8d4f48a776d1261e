use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;

/// Estado compartido entre invocaciones de stages dentro de un run.
///
/// Las opciones son inmutables una vez arrancado el pipeline; cualquier
/// otro dato que varios stages (o varias invocaciones concurrentes de un
/// mismo stage bajo `Fan`) necesiten compartir vive aquí, sincronizado por
/// `DashMap`.
#[derive(Default)]
pub struct StateStore {
    values: DashMap<String, Arc<dyn Any + Send + Sync>>,
    counters: DashMap<String, u64>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devuelve el valor bajo `key` o lo crea con `init`. `None` si la
    /// clave ya existe con otro tipo.
    pub fn get_or_insert_with<T, F>(&self, key: &str, init: F) -> Option<Arc<T>>
        where T: Any + Send + Sync,
              F: FnOnce() -> T
    {
        let value = self.values
                        .entry(key.to_string())
                        .or_insert_with(|| Arc::new(init()) as Arc<dyn Any + Send + Sync>)
                        .value()
                        .clone();
        value.downcast::<T>().ok()
    }

    pub fn insert<T: Any + Send + Sync>(&self, key: &str, value: T) {
        self.values.insert(key.to_string(), Arc::new(value));
    }

    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.values.get(key).and_then(|v| v.value().clone().downcast::<T>().ok())
    }

    /// Incrementa el contador `key` y devuelve el nuevo valor.
    pub fn incr(&self, key: &str, by: u64) -> u64 {
        let mut entry = self.counters.entry(key.to_string()).or_insert(0);
        *entry += by;
        *entry
    }

    pub fn counter(&self, key: &str) -> u64 {
        self.counters.get(key).map(|c| *c.value()).unwrap_or(0)
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
         .field("values", &self.values.len())
         .field("counters", &self.counters.len())
         .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn get_or_insert_keeps_first_value() {
        let store = StateStore::new();
        let first = store.get_or_insert_with("seen", || Mutex::new(vec![1u32])).unwrap();
        first.lock().unwrap().push(2);
        let again = store.get_or_insert_with("seen", || Mutex::new(Vec::<u32>::new())).unwrap();
        assert_eq!(*again.lock().unwrap(), vec![1, 2]);
        // Tipo distinto bajo la misma clave
        assert!(store.get::<String>("seen").is_none());
    }

    #[test]
    fn counters_accumulate() {
        let store = StateStore::new();
        assert_eq!(store.counter("items"), 0);
        store.incr("items", 2);
        assert_eq!(store.incr("items", 3), 5);
        assert_eq!(store.counter("items"), 5);
    }
}
