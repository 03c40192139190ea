// Step inputs: raw values read from the environment (or flags), and the
// validated `Configuration` every later stage works from.

use clap::Parser;
use nunit_step_common::constants::inputs;
use nunit_step_common::{BuildTool, StepError};
use std::path::{Path, PathBuf};

/// Raw step inputs. Every field falls back to its environment variable.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(
    name = "nunit-step",
    version,
    about = "Runs the NUnit test projects of a Xamarin solution"
)]
pub struct StepArgs {
    /// Path of the solution file.
    #[arg(long, env = inputs::SOLUTION)]
    pub solution: Option<String>,

    /// Build configuration, e.g. Debug or Release.
    #[arg(long, env = inputs::CONFIGURATION)]
    pub configuration: Option<String>,

    /// Build platform, e.g. "Any CPU".
    #[arg(long, env = inputs::PLATFORM)]
    pub platform: Option<String>,

    /// Extra NUnit console options, shell quoted.
    #[arg(long, env = inputs::NUNIT_OPTIONS, allow_hyphen_values = true)]
    pub nunit_options: Option<String>,

    /// Build the solution before running the tests: "true" or "false".
    #[arg(long, env = inputs::BUILD_BEFORE_TEST)]
    pub build_before_test: Option<String>,

    /// Build tool: "msbuild" or "xbuild".
    #[arg(long, env = inputs::BUILD_TOOL)]
    pub build_tool: Option<String>,

    /// Directory the NUnit result log is written to.
    #[arg(long, env = inputs::DEPLOY_DIR)]
    pub deploy_dir: Option<String>,
}

fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

impl StepArgs {
    /// Log the inputs as received, before any validation.
    pub fn print(&self) {
        tracing::info!("Build Configs:");
        tracing::info!("- XamarinSolution: {}", or_empty(&self.solution));
        tracing::info!("- XamarinConfiguration: {}", or_empty(&self.configuration));
        tracing::info!("- XamarinPlatform: {}", or_empty(&self.platform));
        tracing::info!("- BuildBeforeTest: {}", or_empty(&self.build_before_test));
        tracing::info!("- BuildTool: {}", or_empty(&self.build_tool));

        tracing::info!("NUnit Configs:");
        tracing::info!("- CustomOptions: {}", or_empty(&self.nunit_options));

        tracing::info!("Other Configs:");
        tracing::info!("- DeployDir: {}", or_empty(&self.deploy_dir));
    }
}

/// Validated, immutable step configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub solution: PathBuf,
    pub configuration: String,
    pub platform: String,
    /// Raw, untokenized custom options. `None` when not given or empty.
    pub nunit_options: Option<String>,
    pub build_before_test: bool,
    pub build_tool: BuildTool,
    pub deploy_dir: PathBuf,
}

/// Treat an unset and an empty input the same way.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn required(value: Option<String>, field: &'static str, what: &str) -> Result<String, StepError> {
    non_empty(value)
        .ok_or_else(|| StepError::invalid_input(field, format!("no {what} parameter specified")))
}

fn validate_solution(solution: Option<String>) -> Result<PathBuf, StepError> {
    let solution = required(solution, inputs::SOLUTION, "XamarinSolution")?;
    match Path::new(&solution).try_exists() {
        Ok(true) => Ok(PathBuf::from(solution)),
        Ok(false) => Err(StepError::invalid_input(
            inputs::SOLUTION,
            format!("XamarinSolution not exist at: {solution}"),
        )),
        Err(e) => Err(StepError::invalid_input(
            inputs::SOLUTION,
            format!("Failed to check if XamarinSolution exist at: {solution}, error: {e}"),
        )),
    }
}

fn validate_build_before_test(value: Option<String>) -> Result<bool, StepError> {
    match non_empty(value).as_deref() {
        None | Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(StepError::invalid_input(
            inputs::BUILD_BEFORE_TEST,
            format!(
                "invalid value: {other}, available: {}",
                inputs::BOOL_VALUES.join(", ")
            ),
        )),
    }
}

fn validate_build_tool(value: Option<String>) -> Result<BuildTool, StepError> {
    match non_empty(value) {
        None => Ok(BuildTool::default()),
        Some(raw) => BuildTool::from_input(&raw).ok_or_else(|| {
            StepError::invalid_input(
                inputs::BUILD_TOOL,
                format!(
                    "invalid value: {raw}, available: {}",
                    BuildTool::INPUT_VALUES.join(", ")
                ),
            )
        }),
    }
}

impl TryFrom<StepArgs> for Configuration {
    type Error = StepError;

    /// Fields are checked in declaration order; the first problem wins.
    fn try_from(args: StepArgs) -> Result<Self, Self::Error> {
        let solution = validate_solution(args.solution)?;
        let configuration = required(args.configuration, inputs::CONFIGURATION, "XamarinConfiguration")?;
        let platform = required(args.platform, inputs::PLATFORM, "XamarinPlatform")?;
        let nunit_options = non_empty(args.nunit_options);
        let build_before_test = validate_build_before_test(args.build_before_test)?;
        let build_tool = validate_build_tool(args.build_tool)?;
        let deploy_dir = required(args.deploy_dir, inputs::DEPLOY_DIR, "DeployDir")?;

        Ok(Self {
            solution,
            configuration,
            platform,
            nunit_options,
            build_before_test,
            build_tool,
            deploy_dir: PathBuf::from(deploy_dir),
        })
    }
}
