//! Tests for reconciling single projects and applying new configuration.

use std::sync::Arc;

use crate::project_registry::{
    adapters::{
        memory::{InMemoryProjectTree, InMemoryRegistryStore, RecordingDiagnostics},
        provider::DefaultsConfigProvider,
    },
    domain::{
        ComposeInspection, ComposeRules, Entrypoint, Hostname, InternalPort, Project,
        ProjectConfig, ProjectName, ProjectRegistryDomainError, Reconciliation, Registry,
    },
    ports::Severity,
    services::{ProjectRegistryReconciler, ReconcilerError},
};
use camino::Utf8Path;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestReconciler = ProjectRegistryReconciler<
    InMemoryProjectTree,
    InMemoryRegistryStore,
    DefaultsConfigProvider,
    DefaultClock,
>;

struct Harness {
    tree: InMemoryProjectTree,
    store: InMemoryRegistryStore,
    service: TestReconciler,
}

#[fixture]
fn harness() -> Harness {
    let tree = InMemoryProjectTree::new("/srv/docker");
    let store = InMemoryRegistryStore::new();
    let service = ProjectRegistryReconciler::new(
        Arc::new(tree.clone()),
        Arc::new(store.clone()),
        Arc::new(DefaultsConfigProvider::default()),
        Arc::new(DefaultClock),
        ComposeRules::traefik().expect("default rules should compile"),
    );
    Harness {
        tree,
        store,
        service,
    }
}

fn name(value: &str) -> ProjectName {
    ProjectName::new(value).expect("valid project name")
}

fn project(value: &str) -> Project {
    Project::in_services_root(Utf8Path::new("/srv/docker"), name(value), "compose.yaml")
}

fn secure_config() -> ProjectConfig {
    ProjectConfig::new(
        true,
        InternalPort::new(8443).expect("valid port"),
        Hostname::new("vault.example.org").expect("valid hostname"),
        Entrypoint::WebSecure,
    )
}

#[rstest]
fn reconcile_leaves_registered_projects_untouched(harness: Harness) {
    let registry: Registry = [(name("vault"), secure_config())].into_iter().collect();

    let outcome = harness.service.reconcile(&registry, &project("vault"));

    assert_eq!(outcome, Reconciliation::Registered(&secure_config()));
    assert!(!outcome.needs_config());
}

#[rstest]
fn reconcile_flags_unknown_projects(harness: Harness) {
    let registry = Registry::new();

    let outcome = harness.service.reconcile(&registry, &project("vault"));

    assert!(outcome.needs_config());
}

#[rstest]
fn applying_same_config_twice_writes_once(harness: Harness) {
    let once = harness
        .service
        .apply_new_config(Registry::new(), &name("vault"), secure_config())
        .expect("first apply should succeed");
    let twice = harness
        .service
        .apply_new_config(once.clone(), &name("vault"), secure_config())
        .expect("second apply should succeed");

    assert_eq!(once, twice);
    assert_eq!(harness.store.save_count().expect("save count"), 1);
}

#[rstest]
fn applying_different_config_is_a_conflict(harness: Harness) {
    let registry = harness
        .service
        .apply_new_config(Registry::new(), &name("vault"), secure_config())
        .expect("first apply should succeed");

    let err = harness
        .service
        .apply_new_config(
            registry,
            &name("vault"),
            ProjectConfig::unrouted(&name("vault")).expect("valid defaults"),
        )
        .expect_err("conflicting config should be rejected");

    assert!(matches!(
        err,
        ReconcilerError::Domain(ProjectRegistryDomainError::ConflictingConfig { .. })
    ));
    assert_eq!(err.project(), Some(&name("vault")));
    assert_eq!(harness.store.save_count().expect("save count"), 1);
}

#[rstest]
fn inspect_compose_reads_both_predicates(harness: Harness) {
    let path = harness
        .tree
        .write_file(
            "vault",
            "compose.yaml",
            "services:\n  vault:\n    env_file: .env\n    labels:\n      traefik.enable: true\n",
        )
        .expect("write manifest");
    let diagnostics = RecordingDiagnostics::new();

    let inspection = harness.service.inspect_compose(&path, &diagnostics);

    assert_eq!(inspection, ComposeInspection::new(true, true));
    assert!(diagnostics.entries().is_empty());
}

#[rstest]
fn inspect_compose_downgrades_missing_manifest(harness: Harness) {
    let diagnostics = RecordingDiagnostics::new();

    let inspection = harness
        .service
        .inspect_compose(Utf8Path::new("/srv/docker/ghost/compose.yaml"), &diagnostics);

    assert_eq!(inspection, ComposeInspection::unreadable());
    assert_eq!(diagnostics.with_severity(Severity::Warning).len(), 1);
}

#[rstest]
fn evaluate_project_sees_env_file_written_later(harness: Harness) {
    let vault = project("vault");
    let inspection = ComposeInspection::new(true, true);

    let before = harness
        .service
        .evaluate_project(&vault, inspection, &secure_config())
        .count();
    harness
        .tree
        .write_file("vault", ".env", "TOKEN=abc\n")
        .expect("write env file");
    let after = harness
        .service
        .evaluate_project(&vault, inspection, &secure_config())
        .count();

    assert_eq!((before, after), (1, 0));
}
