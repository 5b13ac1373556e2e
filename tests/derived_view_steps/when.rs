//! When steps for derived view BDD scenarios.

use super::world::{DerivedViewWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::board::{domain::Viewer, viewmodel::DashboardViewModel};

fn render_for(world: &mut DerivedViewWorld, viewer: Viewer, search: &str) -> Result<(), eyre::Report> {
    let mut model = DashboardViewModel::new(viewer);
    model.set_search(search);
    world.last_view = Some(model.render(world.board()?));
    Ok(())
}

#[when("the administrator views the board")]
fn administrator_views(world: &mut DerivedViewWorld) -> Result<(), eyre::Report> {
    let admin = world.admin()?;
    render_for(world, admin, "")
}

#[when(r#""{email}" views the board"#)]
fn client_views(world: &mut DerivedViewWorld, email: String) -> Result<(), eyre::Report> {
    let viewer = world.viewer_for(&email)?;
    render_for(world, viewer, "")
}

#[when(r#"the administrator searches for "{search}""#)]
fn administrator_searches(
    world: &mut DerivedViewWorld,
    search: String,
) -> Result<(), eyre::Report> {
    let admin = world.admin()?;
    render_for(world, admin, &search)
}

#[when(r#""{email}" toggles the task "{title}""#)]
fn client_toggles(
    world: &mut DerivedViewWorld,
    email: String,
    title: String,
) -> Result<(), eyre::Report> {
    let viewer = world.viewer_for(&email)?;
    let task = world.task_titled(&title)?;
    let result = run_async(world.board_mut()?.toggle_task_status(&viewer, task.id()));
    world.last_result = Some(result);
    Ok(())
}
