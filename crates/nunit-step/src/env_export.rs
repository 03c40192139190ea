// Exporting key/value pairs to later pipeline steps.

use anyhow::{Context, Result};
use async_trait::async_trait;
use nunit_step_common::constants::ENVMAN;
use nunit_step_sdk::{ProcessInvoker, ProcessRequest, TraceWriter};
use std::path::PathBuf;
use std::sync::Arc;

/// Makes a value visible to the steps that run after this one.
#[async_trait]
pub trait EnvExporter: Send + Sync {
    async fn export(&self, key: &str, value: &str) -> Result<()>;
}

/// Exports through `envman add --key <KEY>`, passing the value on stdin so
/// multi-line values such as a whole result log survive intact.
pub struct EnvmanExporter {
    executable: PathBuf,
    invoker: ProcessInvoker,
}

impl EnvmanExporter {
    pub fn new(trace: Arc<dyn TraceWriter>) -> Self {
        Self::with_executable(ENVMAN, trace)
    }

    pub fn with_executable(executable: impl Into<PathBuf>, trace: Arc<dyn TraceWriter>) -> Self {
        Self {
            executable: executable.into(),
            invoker: ProcessInvoker::new(trace),
        }
    }

    fn request(&self, key: &str, value: &str) -> ProcessRequest {
        ProcessRequest::new(&self.executable)
            .args(["add", "--key", key])
            .stdin(value)
            .require_exit_code_zero()
    }
}

#[async_trait]
impl EnvExporter for EnvmanExporter {
    async fn export(&self, key: &str, value: &str) -> Result<()> {
        self.invoker
            .execute(&self.request(key, value))
            .await
            .with_context(|| format!("envman failed to export {key}"))?;
        Ok(())
    }
}
