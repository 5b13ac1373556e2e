//! Behaviour tests for role-scoped derived views.

#[path = "derived_view_steps/mod.rs"]
mod derived_view_steps_defs;

use derived_view_steps_defs::world::{DerivedViewWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/derived_view.feature",
    name = "Administrator sees every task newest first"
)]
#[tokio::test(flavor = "multi_thread")]
async fn administrator_sees_every_task(world: DerivedViewWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/derived_view.feature",
    name = "Client sees only assigned tasks"
)]
#[tokio::test(flavor = "multi_thread")]
async fn client_sees_only_assigned_tasks(world: DerivedViewWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/derived_view.feature",
    name = "Client cannot change another client's task"
)]
#[tokio::test(flavor = "multi_thread")]
async fn client_cannot_change_other_task(world: DerivedViewWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/derived_view.feature",
    name = "Completing a task raises the completion rate"
)]
#[tokio::test(flavor = "multi_thread")]
async fn completing_raises_completion_rate(world: DerivedViewWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/derived_view.feature",
    name = "Search narrows the view case-insensitively"
)]
#[tokio::test(flavor = "multi_thread")]
async fn search_narrows_view(world: DerivedViewWorld) {
    let _ = world;
}
