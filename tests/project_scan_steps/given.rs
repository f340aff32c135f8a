//! Given steps for project scan BDD scenarios.

use super::world::{ENV_MANIFEST, LABELLED_MANIFEST, ScanWorld, project_name};
use beetroot::project_registry::{
    domain::{DEFAULT_MANIFEST_NAMES, ProjectConfig, Registry},
    ports::RegistryStore,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

fn register(world: &ScanWorld, name: &str, routed: bool) -> Result<(), eyre::Report> {
    let project = project_name(name)?;
    let mut registry: Registry = world.store.load().wrap_err("load registry")?;
    let _insertion = registry
        .insert_new(project.clone(), ProjectConfig::defaults_for(&project, routed)?)
        .wrap_err("insert registry entry")?;
    world.store.save(&registry).wrap_err("save registry")?;
    Ok(())
}

#[given(r#"a project "{name}" with routing labels that is registered as routed"#)]
fn labelled_registered_project(world: &mut ScanWorld, name: String) -> Result<(), eyre::Report> {
    world
        .tree
        .write_file(&name, "compose.yaml", LABELLED_MANIFEST)
        .wrap_err("write manifest")?;
    register(world, &name, true)
}

#[given(r#"a project "{name}" with routing labels that is not yet registered"#)]
fn labelled_new_project(world: &mut ScanWorld, name: String) -> Result<(), eyre::Report> {
    world
        .tree
        .write_file(&name, "compose.yaml", LABELLED_MANIFEST)
        .wrap_err("write manifest")?;
    Ok(())
}

#[given(r#"a project "{name}" whose manifest requires an env file"#)]
fn env_project(world: &mut ScanWorld, name: String) -> Result<(), eyre::Report> {
    world
        .tree
        .write_file(&name, "docker-compose.yaml", ENV_MANIFEST)
        .wrap_err("write manifest")?;
    Ok(())
}

#[given(r#"a project "{name}" registered as unrouted"#)]
fn unrouted_registered_project(world: &mut ScanWorld, name: String) -> Result<(), eyre::Report> {
    world
        .tree
        .write_file(&name, "compose.yaml", ENV_MANIFEST)
        .wrap_err("write manifest")?;
    register(world, &name, false)
}

#[given(r#"the manifest of "{target}" is deleted while "{trigger}" is configured"#)]
fn delete_manifest_on_configure(
    world: &mut ScanWorld,
    target: String,
    trigger: String,
) -> Result<(), eyre::Report> {
    let manifest = DEFAULT_MANIFEST_NAMES
        .first()
        .ok_or_else(|| eyre::eyre!("no manifest names configured"))?;
    let path = world.tree.root().join(&target).join(manifest);
    world.removals.insert(project_name(&trigger)?, path);
    Ok(())
}

#[given(r#"the operator cancels configuration of "{name}""#)]
fn operator_cancels(world: &mut ScanWorld, name: String) -> Result<(), eyre::Report> {
    world.cancelled.insert(project_name(&name)?);
    Ok(())
}
