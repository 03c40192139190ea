// nunit-step-sdk: Foundation layer for the NUnit test step.
// This crate has ZERO dependencies on other workspace crates and provides
// the tracing and process primitives the step is built on.

pub mod process_invoker;
pub mod trace;
pub mod which_util;

// Re-export commonly used items at crate root
pub use process_invoker::{ProcessExitCodeError, ProcessInvoker, ProcessRequest};
pub use trace::TraceWriter;
pub use which_util::WhichUtil;
