use nunit_step_common::constants::{NUNIT_RESULT_FLAG, TEST_RESULT_FILE_NAME};
use nunit_step_common::StepError;
use std::path::{Path, PathBuf};

/// Where the NUnit console writes its result log.
pub fn result_log_path(deploy_dir: &Path) -> PathBuf {
    deploy_dir.join(TEST_RESULT_FILE_NAME)
}

/// Build the options injected into every NUnit test project invocation:
/// `--result <log>` followed by the user's options, split with POSIX shell
/// quoting rules.
pub fn assemble_custom_options(
    result_log: &Path,
    custom_options: Option<&str>,
) -> Result<Vec<String>, StepError> {
    let mut options = vec![
        NUNIT_RESULT_FLAG.to_string(),
        result_log.to_string_lossy().into_owned(),
    ];

    if let Some(raw) = custom_options.filter(|raw| !raw.is_empty()) {
        let split = shell_words::split(raw).map_err(|e| StepError::OptionParse {
            options: raw.to_string(),
            reason: e.to_string(),
        })?;
        options.extend(split);
    }

    Ok(options)
}
