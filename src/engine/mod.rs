pub mod orchestrator;
pub mod precheck;
pub mod render;
pub mod result_slot;
pub mod validate;

pub use orchestrator::Orchestrator;
