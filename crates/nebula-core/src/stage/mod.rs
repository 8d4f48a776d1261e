mod definition;
mod erased;
pub mod fns;
mod status;

pub use definition::{spawn_stage, stage_fn, Stage, StageFactory, StageFn};
pub use erased::{AnyStage, TypeTag};
pub use fns::{filter_map, map, try_map, OnError};
pub use status::PipelineStatus;
