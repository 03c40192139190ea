// nunit-step: Runs every NUnit test project of a solution and reports the
// outcome to the surrounding pipeline.
//
// Flow:
//   StepArgs → Configuration::try_from → options::assemble_custom_options
//     → BuilderFactory::create → Builder::{run,build_and_run}_all_nunit_test_projects
//     → report::test_result_log_content → Reporter::export_outcome

pub mod builder;
pub mod config;
pub mod env_export;
pub mod hooks;
pub mod options;
pub mod report;
pub mod solution_builder;
pub mod step;

#[cfg(test)]
pub(crate) mod test_support;

pub use builder::{Builder, BuilderFactory, ProjectEvent, ProjectHooks, ProjectRef, RunOutcome};
pub use config::{Configuration, StepArgs};
pub use env_export::{EnvExporter, EnvmanExporter};
pub use solution_builder::{SolutionBuilder, SolutionBuilderFactory};
pub use step::NunitStep;
