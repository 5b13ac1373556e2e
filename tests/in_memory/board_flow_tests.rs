//! End-to-end board workflows over the in-memory store.

use super::helpers::seeded_board;
use chrono::{Duration, Utc};
use taskboard::board::{
    domain::{TaskPriority, TaskStatus},
    ports::Collection,
    services::{BoardError, CreateTaskRequest},
    view::{ClientFilter, StatusFilter},
    viewmodel::DashboardViewModel,
};

#[tokio::test(flavor = "multi_thread")]
async fn client_completes_overdue_assignment() -> Result<(), eyre::Report> {
    let mut seeded = seeded_board().await?;
    let ann = seeded.ann.viewer();
    let request = CreateTaskRequest::new("Renew certificates")
        .with_priority(TaskPriority::High)
        .with_due_date(Utc::now() - Duration::days(1))
        .with_assignee(seeded.ann.id().clone());
    let task = seeded.board.create_task(&seeded.admin, request).await?;

    let model = DashboardViewModel::new(ann.clone());
    let before = model.render(&seeded.board);
    eyre::ensure!(before.counts.overdue == 1, "task should start overdue");

    let completed = seeded.board.toggle_task_status(&ann, task.id()).await?;
    eyre::ensure!(
        completed.status() == TaskStatus::Completed && completed.completed_at().is_some(),
        "toggle should complete the task"
    );

    let after = model.render(&seeded.board);
    eyre::ensure!(after.counts.overdue == 0, "completed task is never overdue");
    eyre::ensure!(after.counts.completion_rate == 100, "all of Ann's tasks are done");

    let dashboard = seeded.board.dashboard(&seeded.admin, 7);
    let ann_row = dashboard
        .clients
        .iter()
        .find(|row| row.client_id == *seeded.ann.id())
        .ok_or_else(|| eyre::eyre!("Ann should appear in client performance"))?;
    eyre::ensure!(ann_row.completed == 1, "dashboard should count the completion");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn client_cannot_reach_other_clients_tasks() -> Result<(), eyre::Report> {
    let mut seeded = seeded_board().await?;
    let bobs = seeded
        .board
        .create_task(
            &seeded.admin,
            CreateTaskRequest::new("Bob's report").with_assignee(seeded.bob.id().clone()),
        )
        .await?;
    let ann = seeded.ann.viewer();

    let status_change = seeded
        .board
        .set_task_status(&ann, bobs.id(), TaskStatus::Completed)
        .await;
    let comment = seeded.board.add_comment(&ann, bobs.id(), "mine now").await;

    for result in [status_change.map(|_| ()), comment.map(|_| ())] {
        match result {
            Err(err) if err.is_scope_violation() => {}
            other => return Err(eyre::eyre!("expected scope violation, got {other:?}")),
        }
    }
    eyre::ensure!(
        seeded.board.tasks_for(&ann).is_empty(),
        "Ann should see no tasks"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_filters_compose_with_search() -> Result<(), eyre::Report> {
    let mut seeded = seeded_board().await?;
    for (title, assignee) in [
        ("Fix login bug", Some(seeded.ann.id().clone())),
        ("Login page copy", None),
        ("Update README", Some(seeded.ann.id().clone())),
    ] {
        let mut request = CreateTaskRequest::new(title);
        if let Some(client) = assignee {
            request = request.with_assignee(client);
        }
        seeded.board.create_task(&seeded.admin, request).await?;
    }

    let mut model = DashboardViewModel::new(seeded.admin.clone());
    model.set_search("login");
    model.set_client(ClientFilter::Client(seeded.ann.id().clone()));
    let view = model.render(&seeded.board);

    let titles: Vec<&str> = view.tasks.iter().map(|task| task.title()).collect();
    eyre::ensure!(titles == vec!["Fix login bug"], "unexpected titles {titles:?}");
    eyre::ensure!(view.counts.total == 3, "counts cover the whole scope");
    eyre::ensure!(view.counts.unassigned == Some(1), "one task is unassigned");

    model.set_status(StatusFilter::Only(TaskStatus::Completed));
    eyre::ensure!(
        model.render(&seeded.board).tasks.is_empty(),
        "no task is completed yet"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn every_mutation_is_flushed_to_the_store() -> Result<(), eyre::Report> {
    let mut seeded = seeded_board().await?;
    let task = seeded
        .board
        .create_task(&seeded.admin, CreateTaskRequest::new("Flush me"))
        .await?;
    seeded
        .board
        .assign_task(&seeded.admin, task.id(), Some(seeded.bob.id().clone()))
        .await?;

    let stored = seeded.store.snapshot(Collection::Tasks)?;
    let record = stored
        .first()
        .ok_or_else(|| eyre::eyre!("task should be stored"))?;
    eyre::ensure!(
        record.get("assignedClientId") == Some(&serde_json::json!(seeded.bob.id().as_str())),
        "stored record should carry the assignment: {record}"
    );
    eyre::ensure!(
        seeded.store.snapshot(Collection::Activities)?.len() == 2,
        "creation and assignment should both be logged"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_disappears_from_views() -> Result<(), eyre::Report> {
    let mut seeded = seeded_board().await?;
    let task = seeded
        .board
        .create_task(
            &seeded.admin,
            CreateTaskRequest::new("Short-lived").with_assignee(seeded.ann.id().clone()),
        )
        .await?;

    seeded.board.delete_task(&seeded.admin, task.id()).await?;

    let again = seeded.board.delete_task(&seeded.admin, task.id()).await;
    eyre::ensure!(
        matches!(again, Err(BoardError::TaskNotFound(_))),
        "second delete should report the task missing"
    );
    eyre::ensure!(
        seeded.board.tasks_for(&seeded.ann.viewer()).is_empty(),
        "client view should be empty"
    );
    Ok(())
}
