// Builder seam: the step drives a solution builder through these traits and
// never knows how projects are discovered, built or run.

use async_trait::async_trait;
use nunit_step_common::{BuildTool, ProjectType};
use std::path::Path;

/// Identifies the project a command is about to be prepared for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub solution_name: String,
    pub project_name: String,
    pub project_type: ProjectType,
}

/// Progress report for one builder command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEvent {
    pub solution_name: String,
    /// `None` for solution-level commands.
    pub project_name: Option<String>,
    pub project_type: ProjectType,
    /// The command as it would be typed into a shell.
    pub command_line: String,
    /// The same command already ran in this builder and is skipped.
    pub already_performed: bool,
}

/// Callbacks a builder invokes while it works.
pub trait ProjectHooks: Send + Sync {
    /// Called before a project's command is finalized. Returned options are
    /// appended to that command; `None` leaves it untouched.
    fn before_project_build(&self, project: &ProjectRef) -> Option<Vec<String>>;

    /// Called for every command the builder runs or skips. Reporting only.
    fn on_project_event(&self, event: &ProjectEvent);
}

/// What a builder run produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// Non-fatal issues, in the order they were found.
    pub warnings: Vec<String>,
    pub result: anyhow::Result<()>,
}

impl RunOutcome {
    pub fn success(warnings: Vec<String>) -> Self {
        Self {
            warnings,
            result: Ok(()),
        }
    }

    pub fn failure(warnings: Vec<String>, error: anyhow::Error) -> Self {
        Self {
            warnings,
            result: Err(error),
        }
    }
}

/// Discovers and runs the NUnit test projects of one solution.
#[async_trait]
pub trait Builder: Send + Sync {
    /// Run every NUnit test project without building anything first.
    async fn run_all_nunit_test_projects(
        &self,
        configuration: &str,
        platform: &str,
        hooks: &dyn ProjectHooks,
    ) -> RunOutcome;

    /// Build what the test projects need, then run them.
    async fn build_and_run_all_nunit_test_projects(
        &self,
        configuration: &str,
        platform: &str,
        hooks: &dyn ProjectHooks,
    ) -> RunOutcome;
}

/// Creates a [`Builder`] bound to one solution.
pub trait BuilderFactory: Send + Sync {
    fn create(&self, solution: &Path, build_tool: BuildTool) -> anyhow::Result<Box<dyn Builder>>;
}
