use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use uuid::Uuid;

use super::{StageLogger, StateStore};
use crate::constants::DEFAULT_MODULE_ID;
use crate::options::OptionList;

/// Contexto de ejecución que reciben todos los stages de un run.
///
/// Es barato de clonar: cada tarea lanzada por un stage se lleva su copia.
/// Agrupa el token de cancelación, las opciones (inmutables), el almacén de
/// estado compartido y el `TaskTracker` por el que pasa toda tarea, lo que
/// permite esperar a que el run quede drenado sin tareas huérfanas.
#[derive(Clone)]
pub struct StageCtx {
    token: CancellationToken,
    options: Arc<OptionList>,
    state: Arc<StateStore>,
    tracker: TaskTracker,
    run_id: Uuid,
    module: Arc<str>,
}

impl StageCtx {
    pub fn new(options: OptionList) -> Self {
        Self { token: CancellationToken::new(),
               options: Arc::new(options),
               state: Arc::new(StateStore::new()),
               tracker: TaskTracker::new(),
               run_id: Uuid::new_v4(),
               module: Arc::from(DEFAULT_MODULE_ID) }
    }

    /// Asocia el contexto a un módulo (aparece en los logs de cada stage).
    pub fn with_module(mut self, module: &str) -> Self {
        self.module = Arc::from(module);
        self
    }

    /// Lanza una tarea registrada en el tracker del run.
    pub fn spawn<F>(&self, task: F)
        where F: Future<Output = ()> + Send + 'static
    {
        self.tracker.spawn(task);
    }

    #[inline]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[inline]
    pub fn options(&self) -> &OptionList {
        &self.options
    }

    #[inline]
    pub fn state(&self) -> &StateStore {
        &self.state
    }

    #[inline]
    pub fn tracker(&self) -> &TaskTracker {
        &self.tracker
    }

    #[inline]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    #[inline]
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn logger(&self, stage: &str) -> StageLogger {
        StageLogger::new(&self.module, stage)
    }
}

impl Default for StageCtx {
    fn default() -> Self {
        Self::new(OptionList::default())
    }
}

impl std::fmt::Debug for StageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageCtx")
         .field("run_id", &self.run_id)
         .field("module", &self.module)
         .field("cancelled", &self.token.is_cancelled())
         .field("tasks", &self.tracker.len())
         .finish()
    }
}
