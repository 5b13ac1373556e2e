//! Sign-in followed by scoped board actions.

use std::sync::Arc;

use super::helpers::seeded_board;
use mockable::DefaultClock;
use taskboard::board::{
    domain::UserRole,
    services::{CreateTaskRequest, SessionError, SessionService},
};

#[tokio::test(flavor = "multi_thread")]
async fn signed_in_client_acts_within_scope() -> Result<(), eyre::Report> {
    let mut seeded = seeded_board().await?;
    seeded
        .board
        .create_task(
            &seeded.admin,
            CreateTaskRequest::new("Ann's task").with_assignee(seeded.ann.id().clone()),
        )
        .await?;
    let mut session = SessionService::new(Arc::new(seeded.store.clone()), Arc::new(DefaultClock));

    let viewer = session.login(seeded.board.users(), "Ann@Example.com").await?;

    eyre::ensure!(viewer.role() == UserRole::Client, "Ann is a client");
    let visible = seeded.board.tasks_for(session.require()?);
    eyre::ensure!(visible.len() == 1, "Ann sees her one task");

    let mut restored = SessionService::new(Arc::new(seeded.store.clone()), Arc::new(DefaultClock));
    let resumed = restored.restore(seeded.board.users()).await?.cloned();
    eyre::ensure!(resumed == Some(viewer), "sign-in should survive a restart");

    restored.logout().await?;
    eyre::ensure!(
        matches!(restored.require(), Err(SessionError::NotSignedIn)),
        "logout should sign out"
    );
    Ok(())
}
