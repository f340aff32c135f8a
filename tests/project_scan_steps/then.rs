//! Then steps for project scan BDD scenarios.

use super::world::{ScanWorld, project_name};
use beetroot::project_registry::{
    domain::{ComposeInspection, ConfigOrigin, Finding, ProjectReport},
    ports::{RegistryStore, Severity},
    services::ReconcilerError,
};
use eyre::WrapErr;
use rstest_bdd_macros::then;

fn report<'w>(world: &'w ScanWorld, name: &str) -> Result<&'w ProjectReport, eyre::Report> {
    world
        .outcome()?
        .report
        .projects
        .iter()
        .find(|report| report.project.name().as_str() == name)
        .ok_or_else(|| eyre::eyre!("project {name} missing from scan report"))
}

#[then(r#"project "{name}" has no findings"#)]
fn no_findings(world: &ScanWorld, name: String) -> Result<(), eyre::Report> {
    let found = report(world, &name)?;
    if !found.is_clean() {
        return Err(eyre::eyre!(
            "expected no findings for {name}, found {:?}",
            found.findings
        ));
    }
    Ok(())
}

#[then(r#"project "{name}" was newly configured"#)]
fn newly_configured(world: &ScanWorld, name: String) -> Result<(), eyre::Report> {
    let found = report(world, &name)?;
    if found.origin != ConfigOrigin::NewlyConfigured {
        return Err(eyre::eyre!("expected {name} to be newly configured"));
    }
    Ok(())
}

#[then(r#"project "{name}" reports a missing env file"#)]
fn missing_env_file(world: &ScanWorld, name: String) -> Result<(), eyre::Report> {
    let found = report(world, &name)?;
    let reported = found
        .findings
        .iter()
        .any(|finding| matches!(finding, Finding::MissingEnvFile { env_path } if env_path.ends_with(".env")));
    if !reported {
        return Err(eyre::eyre!(
            "expected a missing env file finding for {name}, found {:?}",
            found.findings
        ));
    }
    Ok(())
}

#[then(r#"the registry document contains "{name}""#)]
fn registry_contains(world: &ScanWorld, name: String) -> Result<(), eyre::Report> {
    let registry = world.store.load().wrap_err("reload registry")?;
    if !registry.contains(&project_name(&name)?) {
        return Err(eyre::eyre!("expected {name} in the persisted registry"));
    }
    Ok(())
}

#[then(r#"project "{name}" is inspected as unreadable"#)]
fn inspected_as_unreadable(world: &ScanWorld, name: String) -> Result<(), eyre::Report> {
    let found = report(world, &name)?;
    if found.inspection != ComposeInspection::unreadable() {
        return Err(eyre::eyre!(
            "expected {name} to be inspected as unreadable, got {:?}",
            found.inspection
        ));
    }
    Ok(())
}

#[then(r#"a warning diagnostic mentions "{text}""#)]
fn warning_mentions(world: &ScanWorld, text: String) -> Result<(), eyre::Report> {
    let warned = world
        .diagnostics
        .with_severity(Severity::Warning)
        .iter()
        .any(|diagnostic| diagnostic.message.contains(&text));
    if !warned {
        return Err(eyre::eyre!("expected a warning mentioning {text}"));
    }
    Ok(())
}

#[then("the scan reports {count:usize} projects")]
fn scan_reports_count(world: &ScanWorld, count: usize) -> Result<(), eyre::Report> {
    let reported = world.outcome()?.report.projects.len();
    if reported != count {
        return Err(eyre::eyre!("expected {count} project reports, found {reported}"));
    }
    Ok(())
}

#[then(r#"the scan fails naming project "{name}""#)]
fn scan_fails_naming(world: &ScanWorld, name: String) -> Result<(), eyre::Report> {
    let Some(Err(err)) = &world.result else {
        return Err(eyre::eyre!("expected the scan to fail"));
    };
    if !matches!(err, ReconcilerError::Provider { .. }) {
        return Err(eyre::eyre!("expected a provider failure, got {err}"));
    }
    if err.project().map(|project| project.as_str()) != Some(name.as_str()) {
        return Err(eyre::eyre!("expected failure to name {name}, got {err}"));
    }
    Ok(())
}
