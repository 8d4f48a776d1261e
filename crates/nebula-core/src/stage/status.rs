/// Estado de un pipeline a lo largo de su ciclo de vida.
///
/// Las transiciones válidas son:
/// - `Unbuilt` -> `Validating`
/// - `Validating` -> `Ready`
/// - `Validating` -> `TypeError` (terminal)
/// - `Ready` -> `Running`
/// - `Running` -> `Drained` (terminal)
///
/// No se permiten reversiones ni saltos arbitrarios entre estados.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    /// Lista de stages aún sin validar.
    Unbuilt,
    /// Comprobando tipos de la lista.
    Validating,
    /// La validación encontró un desajuste de tipos; nunca se ejecuta.
    TypeError,
    /// Validado y listo para recibir su stream de entrada.
    Ready,
    /// Tareas lanzadas; la salida se está consumiendo.
    Running,
    /// Todas las tareas terminaron y todos los streams están cerrados.
    Drained,
}

impl PipelineStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineStatus::TypeError | PipelineStatus::Drained)
    }

    pub fn can_transition_to(self, next: PipelineStatus) -> bool {
        use PipelineStatus::*;
        matches!((self, next),
                 (Unbuilt, Validating) | (Validating, Ready) | (Validating, TypeError) | (Ready, Running) | (Running, Drained))
    }
}
