// Entry point for the NUnit test step.
//
// Inputs come from the environment (or the equivalent flags). The process
// exits 0 when every NUnit test project passed and 1 otherwise; the outcome
// is also exported for later steps through envman.

use clap::error::ErrorKind;
use clap::Parser;
use nunit_step::{EnvmanExporter, NunitStep, SolutionBuilderFactory, StepArgs};
use nunit_step_common::{logging, StepResult};
use nunit_step_sdk::trace::TracingTraceWriter;
use nunit_step_sdk::TraceWriter;
use std::sync::Arc;

fn main() {
    let parsed = StepArgs::try_parse();
    if let Err(e) = &parsed {
        if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
            e.exit();
        }
    }
    logging::init();

    // Single-threaded: every external command is awaited before the next one.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to build Tokio runtime: {}", e);
            std::process::exit(StepResult::Failed.exit_code());
        }
    };

    let result = runtime.block_on(run(parsed));
    tracing::info!("Step finished with result {}", result);

    std::process::exit(result.exit_code());
}

async fn run(parsed: Result<StepArgs, clap::Error>) -> StepResult {
    let trace: Arc<dyn TraceWriter> = Arc::new(TracingTraceWriter);
    let step = NunitStep::new(
        SolutionBuilderFactory::new(trace.clone()),
        EnvmanExporter::new(trace.clone()),
        trace,
    );
    step.run_parsed(parsed).await
}
