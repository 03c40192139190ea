// NunitStep: validate inputs, drive the builder, read the result log back and
// export the outcome. Every fatal error ends here as `StepResult::Failed`.

use crate::builder::BuilderFactory;
use crate::config::{Configuration, StepArgs};
use crate::env_export::EnvExporter;
use crate::hooks::StepHooks;
use crate::options::{assemble_custom_options, result_log_path};
use crate::report::{test_result_log_content, Reporter};
use nunit_step_common::{StepError, StepResult};
use nunit_step_sdk::TraceWriter;
use std::sync::Arc;

pub struct NunitStep<F, E> {
    factory: F,
    exporter: E,
    trace: Arc<dyn TraceWriter>,
}

impl<F, E> NunitStep<F, E>
where
    F: BuilderFactory,
    E: EnvExporter,
{
    pub fn new(factory: F, exporter: E, trace: Arc<dyn TraceWriter>) -> Self {
        Self {
            factory,
            exporter,
            trace,
        }
    }

    /// Run the step from the outcome of command-line parsing. A parse error
    /// is handled like any other invalid input.
    pub async fn run_parsed(&self, parsed: Result<StepArgs, clap::Error>) -> StepResult {
        match parsed {
            Ok(args) => self.run(args).await,
            Err(e) => {
                let error = StepError::Args(e.to_string().trim_end().to_string());
                self.fail(&error, None).await
            }
        }
    }

    /// Run the step from raw inputs.
    pub async fn run(&self, args: StepArgs) -> StepResult {
        args.print();

        match Configuration::try_from(args) {
            Ok(config) => self.run_configured(&config).await,
            Err(e) => self.fail(&e, None).await,
        }
    }

    /// Run the step from an already validated configuration.
    pub async fn run_configured(&self, config: &Configuration) -> StepResult {
        let result_log = result_log_path(&config.deploy_dir);
        let custom_options =
            match assemble_custom_options(&result_log, config.nunit_options.as_deref()) {
                Ok(options) => options,
                Err(e) => return self.fail(&e, None).await,
            };

        self.trace.info(&format!(
            "Running all nunit test projects in solution: {}",
            config.solution.display()
        ));

        let builder = match self.factory.create(&config.solution, config.build_tool) {
            Ok(builder) => builder,
            Err(e) => return self.fail(&StepError::BuilderInit(e), None).await,
        };

        let hooks = StepHooks::new(custom_options, self.trace.clone());
        let outcome = if config.build_before_test {
            builder
                .build_and_run_all_nunit_test_projects(&config.configuration, &config.platform, &hooks)
                .await
        } else {
            builder
                .run_all_nunit_test_projects(&config.configuration, &config.platform, &hooks)
                .await
        };

        let log_content = match test_result_log_content(&result_log) {
            Ok(content) => Some(content),
            Err(e) => {
                self.trace
                    .warning(&format!("Failed to read test result, error: {e}"));
                None
            }
        };

        for warning in &outcome.warnings {
            self.trace.warning(warning);
        }

        if let Err(e) = outcome.result {
            return self
                .fail(&StepError::Run(e), log_content.as_deref())
                .await;
        }

        Reporter::new(&self.exporter, self.trace.as_ref())
            .export_outcome(StepResult::Succeeded, log_content.as_deref())
            .await;
        StepResult::Succeeded
    }

    async fn fail(&self, error: &StepError, log_content: Option<&str>) -> StepResult {
        self.trace.error(&error.to_string());
        Reporter::new(&self.exporter, self.trace.as_ref())
            .export_outcome(StepResult::Failed, log_content)
            .await;
        StepResult::Failed
    }
}
