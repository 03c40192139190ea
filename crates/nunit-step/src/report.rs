// Reading the NUnit result log back and exporting the step outcome.

use crate::env_export::EnvExporter;
use nunit_step_common::constants::outputs;
use nunit_step_common::{ReportError, StepResult};
use nunit_step_sdk::TraceWriter;
use std::path::Path;

/// Read the whole result log as text. Bytes that are not valid UTF-8 are
/// replaced rather than failing the read.
pub fn test_result_log_content(path: &Path) -> Result<String, ReportError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ReportError::NotFound(path.to_path_buf()))
        }
        Err(source) => Err(ReportError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Best-effort export of the outcome. Failures are warnings and never stop
/// the next export.
pub struct Reporter<'a> {
    exporter: &'a dyn EnvExporter,
    trace: &'a dyn TraceWriter,
}

impl<'a> Reporter<'a> {
    pub fn new(exporter: &'a dyn EnvExporter, trace: &'a dyn TraceWriter) -> Self {
        Self { exporter, trace }
    }

    pub async fn export_outcome(&self, result: StepResult, result_log: Option<&str>) {
        self.export(outputs::TEST_RESULT, result.as_export_value())
            .await;

        if let Some(log) = result_log.filter(|log| !log.is_empty()) {
            self.export(outputs::TEST_FULL_RESULTS_TEXT, log).await;
        }
    }

    async fn export(&self, key: &str, value: &str) {
        if let Err(e) = self.exporter.export(key, value).await {
            self.trace.warning(&format!(
                "Failed to export environment: {key}, error: {e:#}"
            ));
        }
    }
}
