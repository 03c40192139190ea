// Constants shared across the step: input and output variable names, the
// result log file name and the small enums that travel between crates.

use std::fmt;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The build tool used to build the solution before running tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildTool {
    #[default]
    Msbuild,
    Xbuild,
}

impl BuildTool {
    /// Every accepted input value, in the order they are documented.
    pub const INPUT_VALUES: &'static [&'static str] = &["msbuild", "xbuild"];

    /// Parse the `build_tool` input. Only the exact lowercase names are accepted.
    pub fn from_input(value: &str) -> Option<Self> {
        match value {
            "msbuild" => Some(BuildTool::Msbuild),
            "xbuild" => Some(BuildTool::Xbuild),
            _ => None,
        }
    }

    /// Name of the executable looked up on PATH.
    pub fn executable(&self) -> &'static str {
        match self {
            BuildTool::Msbuild => "msbuild",
            BuildTool::Xbuild => "xbuild",
        }
    }
}

impl fmt::Display for BuildTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

/// The kind of project a builder command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    /// A solution-level command, not tied to one project.
    Solution,
    NunitTest,
    XamarinUiTest,
    Android,
    Ios,
    MacOs,
    Unknown,
}

impl ProjectType {
    /// Whether the project runs tests under the NUnit framework.
    pub fn is_nunit_test(&self) -> bool {
        matches!(self, ProjectType::NunitTest)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectType::Solution => write!(f, "solution"),
            ProjectType::NunitTest => write!(f, "nunit test"),
            ProjectType::XamarinUiTest => write!(f, "xamarin uitest"),
            ProjectType::Android => write!(f, "android"),
            ProjectType::Ios => write!(f, "ios"),
            ProjectType::MacOs => write!(f, "macos"),
            ProjectType::Unknown => write!(f, "unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// Input variables
// ---------------------------------------------------------------------------

/// Environment variables read by the step.
pub mod inputs {
    pub const SOLUTION: &str = "xamarin_solution";
    pub const CONFIGURATION: &str = "xamarin_configuration";
    pub const PLATFORM: &str = "xamarin_platform";
    pub const NUNIT_OPTIONS: &str = "nunit_options";
    pub const BUILD_BEFORE_TEST: &str = "build_before_test";
    pub const BUILD_TOOL: &str = "build_tool";
    pub const DEPLOY_DIR: &str = "BITRISE_DEPLOY_DIR";

    /// Accepted values of [`BUILD_BEFORE_TEST`].
    pub const BOOL_VALUES: &[&str] = &["true", "false"];
}

// ---------------------------------------------------------------------------
// Output variables
// ---------------------------------------------------------------------------

/// Environment variables exported for downstream steps.
pub mod outputs {
    pub const TEST_RESULT: &str = "BITRISE_XAMARIN_TEST_RESULT";
    pub const TEST_FULL_RESULTS_TEXT: &str = "BITRISE_XAMARIN_TEST_FULL_RESULTS_TEXT";
}

// ---------------------------------------------------------------------------
// Files and tools
// ---------------------------------------------------------------------------

/// File name of the NUnit result log inside the deploy directory.
pub const TEST_RESULT_FILE_NAME: &str = "TestResult.xml";

/// NUnit console flag selecting the result log path.
pub const NUNIT_RESULT_FLAG: &str = "--result";

/// Executable name of the NUnit 3 console runner.
pub const NUNIT_CONSOLE: &str = "nunit3-console";

/// Executable used to export environment variables to later steps.
pub const ENVMAN: &str = "envman";
