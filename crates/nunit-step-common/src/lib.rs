// nunit-step-common: Shared constants, error types and logging setup for the
// NUnit test step. Depends on nothing else in the workspace.

pub mod constants;
pub mod error;
pub mod logging;
pub mod step_result;

// ---------------------------------------------------------------------------
// Re-exports for convenient access
// ---------------------------------------------------------------------------

pub use constants::{BuildTool, ProjectType};
pub use error::{ReportError, StepError};
pub use step_result::StepResult;
