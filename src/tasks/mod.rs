//! Task Subsystem Module
//!
//! Asynchronous log-generation tasks: the lifecycle model, the registry that
//! owns task state, the bounded worker pool, and the generation job itself.

mod dispatcher;
mod generate;
mod registry;
mod task;

pub use dispatcher::Dispatcher;
pub use generate::{run_generation, GenerationContext};
pub use registry::TaskRegistry;
pub use task::TaskStatus;
