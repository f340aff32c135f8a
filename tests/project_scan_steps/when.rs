//! When steps for project scan BDD scenarios.

use super::world::ScanWorld;
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the services root is scanned")]
fn scan_services_root(world: &mut ScanWorld) -> Result<(), eyre::Report> {
    let reconciler = world.reconciler()?;
    let registry = reconciler.load_registry().wrap_err("load registry")?;
    world.result = Some(reconciler.run_scan(registry, &world.diagnostics));
    Ok(())
}
