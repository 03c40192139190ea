// StepResult: the single outcome of a step run and its translation to the
// exported status value and the process exit code.

/// Outcome of the whole step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepResult {
    Succeeded,
    Failed,
}

impl StepResult {
    /// Value exported as the test result status.
    pub fn as_export_value(&self) -> &'static str {
        match self {
            StepResult::Succeeded => "succeeded",
            StepResult::Failed => "failed",
        }
    }

    /// Process exit code: `0` on success, `1` on any failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            StepResult::Succeeded => 0,
            StepResult::Failed => 1,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StepResult::Succeeded)
    }
}

impl std::fmt::Display for StepResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepResult::Succeeded => write!(f, "Succeeded"),
            StepResult::Failed => write!(f, "Failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(StepResult::Succeeded.exit_code(), 0);
        assert_eq!(StepResult::Failed.exit_code(), 1);
    }

    #[test]
    fn test_export_values() {
        assert_eq!(StepResult::Succeeded.as_export_value(), "succeeded");
        assert_eq!(StepResult::Failed.as_export_value(), "failed");
    }

    #[test]
    fn test_is_success() {
        assert!(StepResult::Succeeded.is_success());
        assert!(!StepResult::Failed.is_success());
    }
}
