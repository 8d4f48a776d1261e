//! Compositores: cadena, ramas (`Tee`) y difusión (`Fan`).
mod chain;
mod fan;
mod merge;
mod pipe;
mod tee;
pub mod validate;

pub use chain::{chain_stages, Chain};
pub use fan::Fan;
pub use pipe::Pipe;
pub use tee::Tee;
