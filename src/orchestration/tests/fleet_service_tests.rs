//! Fleet script service tests.

use std::sync::Arc;

use crate::orchestration::{
    adapters::RecordingScriptRunner,
    domain::{FleetAction, OrchestrationDomainError, ScriptCommand, ScriptName, ScriptOutput},
    ports::{ScriptRunner, ScriptRunnerError, ScriptRunnerResult},
    services::{FleetScriptService, FleetScriptServiceError, UNKNOWN_COMMIT},
};
use crate::project_registry::domain::ProjectName;
use mockall::mock;
use rstest::{fixture, rstest};

mock! {
    pub Runner {}

    impl ScriptRunner for Runner {
        fn execute(&self, command: &ScriptCommand) -> ScriptRunnerResult<ScriptOutput>;
    }
}

#[fixture]
fn runner() -> RecordingScriptRunner {
    RecordingScriptRunner::new()
}

fn service<R: ScriptRunner>(runner: R) -> FleetScriptService<R> {
    FleetScriptService::new(Arc::new(runner), "/opt/beetroot/config/scripts", "/opt/beetroot")
}

#[rstest]
fn run_action_passes_project_and_trims_output(runner: RecordingScriptRunner) {
    runner.push_exit(0, "[{\"name\":\"jellyfin\"}]\n", "");
    let fleet = service(runner.clone());
    let project = ProjectName::new("jellyfin").expect("valid name");

    let outcome = fleet
        .run_action(FleetAction::Restart, Some(&project), false)
        .expect("action should run");

    assert!(outcome.success);
    assert_eq!(outcome.output, "[{\"name\":\"jellyfin\"}]");
    let commands = runner.commands();
    let [command] = commands.as_slice() else {
        panic!("expected exactly one command");
    };
    assert_eq!(command.program(), "/opt/beetroot/config/scripts/mose.sh");
    assert_eq!(command.args(), ["restart", "--json", "--project", "jellyfin"]);
    assert_eq!(command.working_dir().map(|dir| dir.as_str()), Some("/opt/beetroot"));
}

#[rstest]
fn failing_script_is_an_unsuccessful_outcome(runner: RecordingScriptRunner) {
    runner.push_exit(1, "", "compose: project not found\n");
    let fleet = service(runner);

    let outcome = fleet
        .run_action(FleetAction::Up, None, true)
        .expect("non-zero exit is not an error");

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("compose: project not found"));
}

#[test]
fn unknown_action_never_starts_a_process() {
    let mut runner = MockRunner::new();
    runner.expect_execute().never();
    let fleet = service(runner);

    let result = fleet.run_named_action("destroy", None, false);

    assert!(matches!(
        result,
        Err(FleetScriptServiceError::Domain(OrchestrationDomainError::UnknownAction(action)))
            if action == "destroy"
    ));
}

#[test]
fn spawn_failure_is_an_error() {
    let mut runner = MockRunner::new();
    runner
        .expect_execute()
        .times(1)
        .returning(|command| Err(ScriptRunnerError::NotFound(command.program().to_owned())));
    let fleet = service(runner);

    let result = fleet.run_action(FleetAction::Ps, None, false);

    assert!(matches!(
        result,
        Err(FleetScriptServiceError::Runner(ScriptRunnerError::NotFound(_)))
    ));
}

#[rstest]
#[case::resolved(Some((0, "4f1c2d9e\n")), "4f1c2d9e")]
#[case::not_a_checkout(Some((128, "")), UNKNOWN_COMMIT)]
#[case::git_missing(None, UNKNOWN_COMMIT)]
fn commit_hash_falls_back_to_unknown(
    runner: RecordingScriptRunner,
    #[case] response: Option<(i32, &str)>,
    #[case] expected: &str,
) {
    if let Some((exit_code, stdout)) = response {
        runner.push_exit(exit_code, stdout, "");
    }
    let fleet = service(runner.clone());

    assert_eq!(fleet.commit_hash(), expected);
    assert_eq!(
        runner.commands().first().map(ToString::to_string).as_deref(),
        Some("git rev-parse HEAD")
    );
}

#[rstest]
fn run_script_resolves_name_in_scripts_dir(runner: RecordingScriptRunner) {
    runner.push_exit(0, "done\n", "");
    let fleet = service(runner.clone());
    let name = ScriptName::new("backup").expect("valid script name");

    let outcome = fleet.run_script(&name).expect("script should run");

    assert_eq!(outcome.output, "done");
    assert_eq!(
        runner.commands().first().map(|command| command.program().to_owned()),
        Some("/opt/beetroot/config/scripts/backup.sh".to_owned())
    );
}
