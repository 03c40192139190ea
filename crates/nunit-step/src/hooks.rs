// The step's builder callbacks: inject custom options into NUnit test
// projects and narrate progress.

use crate::builder::{ProjectEvent, ProjectHooks, ProjectRef};
use nunit_step_common::ProjectType;
use nunit_step_sdk::TraceWriter;
use std::sync::Arc;

pub struct StepHooks {
    custom_options: Vec<String>,
    trace: Arc<dyn TraceWriter>,
}

impl StepHooks {
    pub fn new(custom_options: Vec<String>, trace: Arc<dyn TraceWriter>) -> Self {
        Self {
            custom_options,
            trace,
        }
    }
}

impl ProjectHooks for StepHooks {
    fn before_project_build(&self, project: &ProjectRef) -> Option<Vec<String>> {
        project
            .project_type
            .is_nunit_test()
            .then(|| self.custom_options.clone())
    }

    fn on_project_event(&self, event: &ProjectEvent) {
        match (&event.project_name, event.project_type) {
            (None, _) => self
                .trace
                .info(&format!("Building solution: {}", event.solution_name)),
            (Some(project), ProjectType::NunitTest) => self
                .trace
                .info(&format!("Building test project: {project}")),
            (Some(project), _) => self.trace.info(&format!("Building project: {project}")),
        }

        self.trace.info(&format!("$ {}", event.command_line));

        if event.already_performed {
            self.trace
                .warning("build command already performed, skipping...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nunit_step_sdk::trace::{CollectingTraceWriter, TraceLevel};

    fn hooks() -> (StepHooks, Arc<CollectingTraceWriter>) {
        let trace = Arc::new(CollectingTraceWriter::new());
        let options = vec!["--result".to_string(), "/d/TestResult.xml".to_string()];
        (StepHooks::new(options, trace.clone()), trace)
    }

    fn project(project_type: ProjectType) -> ProjectRef {
        ProjectRef {
            solution_name: "App".into(),
            project_name: "App.Tests".into(),
            project_type,
        }
    }

    fn event(project_name: Option<&str>, project_type: ProjectType, already: bool) -> ProjectEvent {
        ProjectEvent {
            solution_name: "App".into(),
            project_name: project_name.map(String::from),
            project_type,
            command_line: "msbuild App.sln".into(),
            already_performed: already,
        }
    }

    #[test]
    fn options_go_to_nunit_projects_only() {
        let (hooks, _) = hooks();
        assert_eq!(
            hooks.before_project_build(&project(ProjectType::NunitTest)),
            Some(vec!["--result".to_string(), "/d/TestResult.xml".to_string()])
        );
        for other in [
            ProjectType::XamarinUiTest,
            ProjectType::Android,
            ProjectType::Ios,
            ProjectType::Solution,
            ProjectType::Unknown,
        ] {
            assert_eq!(hooks.before_project_build(&project(other)), None, "{other}");
        }
    }

    #[test]
    fn solution_event_is_reported_as_solution() {
        let (hooks, trace) = hooks();
        hooks.on_project_event(&event(None, ProjectType::Solution, false));
        assert_eq!(
            trace.messages_at(TraceLevel::Info),
            vec!["Building solution: App", "$ msbuild App.sln"]
        );
        assert!(trace.messages_at(TraceLevel::Warning).is_empty());
    }

    #[test]
    fn test_and_plain_projects_are_distinguished() {
        let (hooks, trace) = hooks();
        hooks.on_project_event(&event(Some("App.Tests"), ProjectType::NunitTest, false));
        hooks.on_project_event(&event(Some("App.Droid"), ProjectType::Android, false));
        let info = trace.messages_at(TraceLevel::Info);
        assert_eq!(info[0], "Building test project: App.Tests");
        assert_eq!(info[2], "Building project: App.Droid");
    }

    #[test]
    fn already_performed_emits_warning() {
        let (hooks, trace) = hooks();
        hooks.on_project_event(&event(None, ProjectType::Solution, true));
        assert_eq!(
            trace.messages_at(TraceLevel::Warning),
            vec!["build command already performed, skipping..."]
        );
    }
}
