pub mod module_error;
pub mod sink_error;

pub use module_error::ModuleError;
pub use sink_error::SinkError;
