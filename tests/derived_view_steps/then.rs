//! Then steps for derived view BDD scenarios.

use super::world::DerivedViewWorld;
use rstest_bdd_macros::then;
use taskboard::board::{domain::TaskStatus, view::DerivedView};

fn last_view(world: &DerivedViewWorld) -> Result<&DerivedView, eyre::Report> {
    world
        .last_view
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no view rendered in scenario"))
}

#[then(r#"the visible tasks are "{titles}""#)]
fn visible_tasks_are(world: &DerivedViewWorld, titles: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = titles.split(',').map(str::trim).collect();
    let actual: Vec<&str> = last_view(world)?
        .tasks
        .iter()
        .map(|task| task.title())
        .collect();

    if actual != expected {
        return Err(eyre::eyre!("expected tasks {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the completion rate is {rate:u8}")]
fn completion_rate_is(world: &DerivedViewWorld, rate: u8) -> Result<(), eyre::Report> {
    let actual = last_view(world)?.counts.completion_rate;
    if actual != rate {
        return Err(eyre::eyre!("expected completion rate {rate}, found {actual}"));
    }
    Ok(())
}

#[then("the scoped total is {total:usize}")]
fn scoped_total_is(world: &DerivedViewWorld, total: usize) -> Result<(), eyre::Report> {
    let actual = last_view(world)?.counts.total;
    if actual != total {
        return Err(eyre::eyre!("expected scoped total {total}, found {actual}"));
    }
    Ok(())
}

#[then("the action is rejected as a scope violation")]
fn rejected_as_scope_violation(world: &DerivedViewWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing action result"))?;

    if !matches!(result, Err(err) if err.is_scope_violation()) {
        return Err(eyre::eyre!("expected scope violation, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the task "{title}" is "{status}""#)]
fn task_has_status(
    world: &DerivedViewWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.task_titled(&title)?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}
