// Error types for the step.
//
// `StepError` is always fatal: the step exports a failed status and exits
// non-zero. `ReportError` only ever becomes a warning.

use std::path::PathBuf;

/// A fatal step failure.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// A required input is missing or an input holds an unaccepted value.
    #[error("Issue with input {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The inputs could not be read at all, e.g. an unknown flag or an input
    /// variable that is not valid UTF-8.
    #[error("Failed to parse inputs, error: {0}")]
    Args(String),

    /// The custom NUnit options could not be split into arguments.
    #[error("Failed to split params ({options}), error: {reason}")]
    OptionParse { options: String, reason: String },

    /// The builder for the solution could not be created.
    #[error("Failed to create xamarin builder, error: {0:#}")]
    BuilderInit(#[source] anyhow::Error),

    /// Building or running the test projects failed.
    #[error("Test run failed, error: {0:#}")]
    Run(#[source] anyhow::Error),
}

impl StepError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        StepError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// The input variable name for an `InvalidInput` error.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            StepError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Failure to read back the NUnit result log.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("test result not exist at: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read file ({}), error: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_names_the_field() {
        let err = StepError::invalid_input("xamarin_platform", "no platform specified");
        assert_eq!(err.field(), Some("xamarin_platform"));
        assert_eq!(
            err.to_string(),
            "Issue with input xamarin_platform: no platform specified"
        );
    }

    #[test]
    fn run_error_includes_cause_chain() {
        let cause = anyhow::anyhow!("exit code 1").context("nunit3-console failed");
        let err = StepError::Run(cause);
        assert_eq!(err.field(), None);
        assert_eq!(
            err.to_string(),
            "Test run failed, error: nunit3-console failed: exit code 1"
        );
    }

    #[test]
    fn report_error_mentions_path() {
        let err = ReportError::NotFound(PathBuf::from("/deploy/TestResult.xml"));
        assert_eq!(err.to_string(), "test result not exist at: /deploy/TestResult.xml");
    }
}
