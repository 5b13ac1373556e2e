//! Given steps for derived view BDD scenarios.

use super::world::{DerivedViewWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::{
    domain::{NewUser, UserRole},
    services::CreateTaskRequest,
};

#[given(r#"a board with clients "{first}" and "{second}""#)]
fn board_with_clients(
    world: &mut DerivedViewWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    world.open_board()?;
    let admin = world.admin()?;
    for email in [first, second] {
        let name = email.split('@').next().unwrap_or("client").to_owned();
        let new_user = NewUser::new(name, email, UserRole::Client)?;
        run_async(world.board_mut()?.create_user(&admin, new_user))
            .wrap_err("register client for scenario")?;
    }
    Ok(())
}

#[given(r#"a task "{title}" assigned to "{email}""#)]
fn task_assigned_to(
    world: &mut DerivedViewWorld,
    title: String,
    email: String,
) -> Result<(), eyre::Report> {
    let admin = world.admin()?;
    let client = world.viewer_for(&email)?;
    let request = CreateTaskRequest::new(title).with_assignee(client.user_id().clone());
    run_async(world.board_mut()?.create_task(&admin, request))
        .wrap_err("create task for scenario")?;
    Ok(())
}
