//! Contexto compartido por los stages de un run.
mod ctx;
mod logger;
mod state;

pub use ctx::StageCtx;
pub use logger::StageLogger;
pub use state::StateStore;
