//! nebula-core: motor de composición de stages sobre streams tipados.
pub mod compose;
pub mod config;
pub mod constants;
pub mod context;
pub mod engine;
pub mod errors;
pub mod options;
pub mod stage;
pub mod stream;

pub use compose::{chain_stages, Chain, Fan, Pipe, Tee};
pub use config::EngineConfig;
pub use context::{StageCtx, StageLogger, StateStore};
pub use engine::{Pipeline, PipelineBuilder};
pub use errors::{OptionError, PipelineError};
pub use options::{OptionCell, OptionKind, OptionList};
pub use stage::{spawn_stage, stage_fn, AnyStage, OnError, PipelineStatus, Stage, StageFactory, TypeTag};
pub use stream::{channel, channel_with_capacity, generator, Emitter, Stream};
