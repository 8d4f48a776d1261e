mod builder;
mod pipeline;

pub use builder::PipelineBuilder;
pub use pipeline::Pipeline;
