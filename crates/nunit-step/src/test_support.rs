// Fakes for the collaborator traits, shared by the unit tests.

use crate::builder::{Builder, BuilderFactory, ProjectEvent, ProjectHooks, ProjectRef, RunOutcome};
use crate::env_export::EnvExporter;
use async_trait::async_trait;
use nunit_step_common::{BuildTool, ProjectType};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Records every successful export; fails for one chosen key.
#[derive(Default)]
pub struct RecordingExporter {
    exported: Mutex<Vec<(String, String)>>,
    fail_key: Option<String>,
}

impl RecordingExporter {
    pub fn failing_on(key: &str) -> Self {
        Self {
            exported: Mutex::new(Vec::new()),
            fail_key: Some(key.to_string()),
        }
    }

    pub fn exported(&self) -> Vec<(String, String)> {
        self.exported.lock().clone()
    }

    pub fn value_of(&self, key: &str) -> Option<String> {
        self.exported
            .lock()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

#[async_trait]
impl EnvExporter for RecordingExporter {
    async fn export(&self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.fail_key.as_deref() == Some(key) {
            anyhow::bail!("exit status 1");
        }
        self.exported
            .lock()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}

/// Which builder operation was driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Run,
    BuildAndRun,
}

/// Everything the fake builder saw, shared with the test.
#[derive(Debug, Default)]
pub struct BuilderLog {
    pub created_with: Option<(PathBuf, BuildTool)>,
    pub operation: Option<Operation>,
    pub configuration: String,
    pub platform: String,
    /// Options handed back by `before_project_build`, per project type.
    pub prepared: Vec<(ProjectType, Option<Vec<String>>)>,
}

/// A builder that touches no process. It prepares one NUnit test project
/// and one Android project, optionally writes the result log, and reports
/// the configured outcome.
pub struct FakeBuilder {
    log: Arc<Mutex<BuilderLog>>,
    fail_with: Option<String>,
    warnings: Vec<String>,
    write_result_log: Option<(PathBuf, String)>,
}

impl FakeBuilder {
    fn drive(
        &self,
        operation: Operation,
        configuration: &str,
        platform: &str,
        hooks: &dyn ProjectHooks,
    ) -> RunOutcome {
        {
            let mut log = self.log.lock();
            log.operation = Some(operation);
            log.configuration = configuration.to_string();
            log.platform = platform.to_string();
        }

        for (name, project_type) in [
            ("App.Tests", ProjectType::NunitTest),
            ("App.Droid", ProjectType::Android),
        ] {
            let prepared = hooks.before_project_build(&ProjectRef {
                solution_name: "App".into(),
                project_name: name.into(),
                project_type,
            });
            hooks.on_project_event(&ProjectEvent {
                solution_name: "App".into(),
                project_name: Some(name.into()),
                project_type,
                command_line: format!("fake {name}"),
                already_performed: false,
            });
            self.log.lock().prepared.push((project_type, prepared));
        }

        if let Some((path, content)) = &self.write_result_log {
            std::fs::write(path, content).unwrap();
        }

        match &self.fail_with {
            Some(message) => RunOutcome::failure(self.warnings.clone(), anyhow::anyhow!(message.clone())),
            None => RunOutcome::success(self.warnings.clone()),
        }
    }
}

#[async_trait]
impl Builder for FakeBuilder {
    async fn run_all_nunit_test_projects(
        &self,
        configuration: &str,
        platform: &str,
        hooks: &dyn ProjectHooks,
    ) -> RunOutcome {
        self.drive(Operation::Run, configuration, platform, hooks)
    }

    async fn build_and_run_all_nunit_test_projects(
        &self,
        configuration: &str,
        platform: &str,
        hooks: &dyn ProjectHooks,
    ) -> RunOutcome {
        self.drive(Operation::BuildAndRun, configuration, platform, hooks)
    }
}

/// Hands out [`FakeBuilder`]s, or fails to create one.
#[derive(Default)]
pub struct FakeFactory {
    pub log: Arc<Mutex<BuilderLog>>,
    pub fail_create: bool,
    pub fail_run: Option<String>,
    pub warnings: Vec<String>,
    pub write_result_log: Option<(PathBuf, String)>,
}

impl FakeFactory {
    pub fn was_created(&self) -> bool {
        self.log.lock().created_with.is_some()
    }
}

impl BuilderFactory for FakeFactory {
    fn create(&self, solution: &Path, build_tool: BuildTool) -> anyhow::Result<Box<dyn Builder>> {
        if self.fail_create {
            anyhow::bail!("no solution projects found");
        }
        self.log.lock().created_with = Some((solution.to_path_buf(), build_tool));
        Ok(Box::new(FakeBuilder {
            log: self.log.clone(),
            fail_with: self.fail_run.clone(),
            warnings: self.warnings.clone(),
            write_result_log: self.write_result_log.clone(),
        }))
    }
}
