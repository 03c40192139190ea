// SolutionBuilder: a process-backed `Builder` that treats the solution as
// one unit. The build tool builds the whole solution; the NUnit console is
// pointed at the solution file and discovers the test assemblies itself.

use crate::builder::{Builder, BuilderFactory, ProjectEvent, ProjectHooks, ProjectRef, RunOutcome};
use anyhow::{Context, Result};
use async_trait::async_trait;
use nunit_step_common::constants::NUNIT_CONSOLE;
use nunit_step_common::{BuildTool, ProjectType};
use nunit_step_sdk::{ProcessInvoker, ProcessRequest, TraceWriter, WhichUtil};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SOLUTION_EXTENSION: &str = "sln";

pub struct SolutionBuilder {
    solution: PathBuf,
    solution_name: String,
    build_tool: BuildTool,
    build_tool_path: PathBuf,
    nunit_console_path: PathBuf,
    invoker: ProcessInvoker,
    /// Command lines that already ran successfully through this builder.
    performed: Mutex<HashSet<String>>,
}

impl SolutionBuilder {
    /// Bind a builder to `solution`, resolving tools on the process PATH.
    pub fn new(solution: &Path, build_tool: BuildTool, trace: Arc<dyn TraceWriter>) -> Result<Self> {
        Self::with_search_path(solution, build_tool, None, trace)
    }

    /// Like [`SolutionBuilder::new`], resolving tools on `search_path` instead.
    pub fn with_search_path(
        solution: &Path,
        build_tool: BuildTool,
        search_path: Option<&OsStr>,
        trace: Arc<dyn TraceWriter>,
    ) -> Result<Self> {
        if !solution.is_file() {
            anyhow::bail!("solution not found at: {}", solution.display());
        }
        let is_solution = solution
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SOLUTION_EXTENSION));
        if !is_solution {
            anyhow::bail!(
                "path is not a solution file (.{SOLUTION_EXTENSION}): {}",
                solution.display()
            );
        }

        let solution_name = solution
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let build_tool_path = WhichUtil::which_in(build_tool.executable(), search_path, true)?
            .with_context(|| format!("{build_tool} not found"))?;
        let nunit_console_path = WhichUtil::which_in(NUNIT_CONSOLE, search_path, true)?
            .with_context(|| format!("{NUNIT_CONSOLE} not found"))?;

        Ok(Self {
            solution: solution.to_path_buf(),
            solution_name,
            build_tool,
            build_tool_path,
            nunit_console_path,
            invoker: ProcessInvoker::new(trace),
            performed: Mutex::new(HashSet::new()),
        })
    }

    fn solution_arg(&self) -> String {
        self.solution.to_string_lossy().into_owned()
    }

    fn build_request(&self, configuration: &str, platform: &str) -> ProcessRequest {
        ProcessRequest::new(&self.build_tool_path)
            .args([
                self.solution_arg(),
                format!("/p:Configuration={configuration}"),
                format!("/p:Platform={platform}"),
            ])
    }

    fn test_request(&self, configuration: &str, options: Vec<String>) -> ProcessRequest {
        ProcessRequest::new(&self.nunit_console_path)
            .args([self.solution_arg(), format!("--config={configuration}")])
            .args(options)
    }

    fn warnings(&self) -> Vec<String> {
        match self.build_tool {
            BuildTool::Xbuild => vec![
                "xbuild is deprecated in favor of msbuild, consider switching the build tool".to_string(),
            ],
            BuildTool::Msbuild => Vec::new(),
        }
    }

    /// Report and run one command, unless this builder already ran it.
    async fn perform(
        &self,
        request: ProcessRequest,
        project_name: Option<String>,
        project_type: ProjectType,
        hooks: &dyn ProjectHooks,
    ) -> Result<()> {
        let command_line = request.command_line();
        let already_performed = self.performed.lock().contains(&command_line);

        hooks.on_project_event(&ProjectEvent {
            solution_name: self.solution_name.clone(),
            project_name,
            project_type,
            command_line: command_line.clone(),
            already_performed,
        });
        if already_performed {
            return Ok(());
        }

        let exit_code = self
            .invoker
            .execute(&request)
            .await
            .with_context(|| format!("command failed: {command_line}"))?;
        if exit_code != 0 {
            anyhow::bail!("command failed with exit code {exit_code}: {command_line}");
        }

        self.performed.lock().insert(command_line);
        Ok(())
    }

    async fn build_solution(&self, configuration: &str, platform: &str, hooks: &dyn ProjectHooks) -> Result<()> {
        let request = self.build_request(configuration, platform);
        self.perform(request, None, ProjectType::Solution, hooks)
            .await
            .context("build failed")
    }

    async fn run_tests(&self, configuration: &str, hooks: &dyn ProjectHooks) -> Result<()> {
        let project = ProjectRef {
            solution_name: self.solution_name.clone(),
            project_name: self.solution_name.clone(),
            project_type: ProjectType::NunitTest,
        };
        let options = hooks.before_project_build(&project).unwrap_or_default();
        let request = self.test_request(configuration, options);
        self.perform(
            request,
            Some(project.project_name),
            ProjectType::NunitTest,
            hooks,
        )
        .await
        .context("test run failed")
    }
}

#[async_trait]
impl Builder for SolutionBuilder {
    async fn run_all_nunit_test_projects(
        &self,
        configuration: &str,
        _platform: &str,
        hooks: &dyn ProjectHooks,
    ) -> RunOutcome {
        let warnings = self.warnings();
        match self.run_tests(configuration, hooks).await {
            Ok(()) => RunOutcome::success(warnings),
            Err(e) => RunOutcome::failure(warnings, e),
        }
    }

    async fn build_and_run_all_nunit_test_projects(
        &self,
        configuration: &str,
        platform: &str,
        hooks: &dyn ProjectHooks,
    ) -> RunOutcome {
        let warnings = self.warnings();
        let result = async {
            self.build_solution(configuration, platform, hooks).await?;
            self.run_tests(configuration, hooks).await
        }
        .await;
        match result {
            Ok(()) => RunOutcome::success(warnings),
            Err(e) => RunOutcome::failure(warnings, e),
        }
    }
}

/// Creates [`SolutionBuilder`]s whose process output goes to `trace`.
#[derive(Clone)]
pub struct SolutionBuilderFactory {
    /// PATH-style list to resolve tools on; the process PATH when `None`.
    search_path: Option<OsString>,
    trace: Arc<dyn TraceWriter>,
}

impl SolutionBuilderFactory {
    pub fn new(trace: Arc<dyn TraceWriter>) -> Self {
        Self {
            search_path: None,
            trace,
        }
    }

    pub fn with_search_path(search_path: impl Into<OsString>, trace: Arc<dyn TraceWriter>) -> Self {
        Self {
            search_path: Some(search_path.into()),
            trace,
        }
    }
}

impl BuilderFactory for SolutionBuilderFactory {
    fn create(&self, solution: &Path, build_tool: BuildTool) -> Result<Box<dyn Builder>> {
        let builder = SolutionBuilder::with_search_path(
            solution,
            build_tool,
            self.search_path.as_deref(),
            self.trace.clone(),
        )?;
        Ok(Box::new(builder))
    }
}
