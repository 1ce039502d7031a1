//! Release workflow wiring shared by the binary and integration tests

pub mod orchestration;

pub use orchestration::{ReleaseWorkflow, ReleaseWorkflowArgs, WorkflowResult};
