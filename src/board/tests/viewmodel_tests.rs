//! Dashboard view model and search debounce tests.

use super::support::{FixedClock, now};
use crate::board::{
    adapters::memory::InMemoryRecordStore,
    domain::{TaskStatus, UserId, UserRole, Viewer},
    services::{CreateTaskRequest, TaskBoardService},
    view::{ClientFilter, SortPolicy, StatusFilter},
    viewmodel::{DashboardViewModel, SearchDebouncer},
};
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

fn viewer(id: &str, role: UserRole) -> Viewer {
    Viewer::new(UserId::parse(id).expect("valid id"), role)
}

#[rstest]
#[case(UserRole::Admin, SortPolicy::AdminDefault)]
#[case(UserRole::Client, SortPolicy::ClientDefault)]
fn view_model_starts_with_role_default_sort(
    #[case] role: UserRole,
    #[case] expected: SortPolicy,
) {
    let model = DashboardViewModel::new(viewer("someone", role));

    assert_eq!(model.query().sort, expected);
    assert_eq!(model.query().client, ClientFilter::All);
}

#[test]
fn client_view_model_ignores_client_filter() {
    let mut model = DashboardViewModel::new(viewer("c1", UserRole::Client));

    model.set_client(ClientFilter::Unassigned);

    assert_eq!(model.query().client, ClientFilter::All);
}

#[test]
fn reset_keeps_sort_and_clears_filters() {
    let mut model = DashboardViewModel::new(viewer("admin", UserRole::Admin));
    model.set_client(ClientFilter::Unassigned);
    model.set_status(StatusFilter::Only(TaskStatus::Completed));
    model.set_search("login");

    model.reset_filters();

    assert_eq!(model.query().client, ClientFilter::All);
    assert_eq!(model.query().status, StatusFilter::All);
    assert!(model.query().search.is_empty());
    assert_eq!(model.query().sort, SortPolicy::AdminDefault);
}

#[tokio::test]
async fn render_reflects_mutations_on_the_next_call() {
    let (mut board, _) = TaskBoardService::open(
        Arc::new(InMemoryRecordStore::new()),
        Arc::new(FixedClock::at(now())),
    )
    .await
    .expect("open board");
    let admin = viewer("admin", UserRole::Admin);
    let mut model = DashboardViewModel::new(admin.clone());
    model.set_search("login");
    assert!(model.render(&board).tasks.is_empty());

    board
        .create_task(&admin, CreateTaskRequest::new("Fix login bug"))
        .await
        .expect("create task");
    board
        .create_task(&admin, CreateTaskRequest::new("Update README"))
        .await
        .expect("create task");

    let rendered = model.render(&board);
    assert_eq!(rendered.tasks.len(), 1);
    assert_eq!(rendered.counts.total, 2);
}

#[tokio::test(start_paused = true)]
async fn debouncer_delivers_only_the_last_value_after_quiet_period() {
    let (mut debouncer, mut settled) = SearchDebouncer::new(Duration::from_millis(300));

    debouncer.submit("l");
    tokio::time::sleep(Duration::from_millis(100)).await;
    debouncer.submit("lo");
    tokio::time::sleep(Duration::from_millis(100)).await;
    debouncer.submit("login");

    tokio::time::sleep(Duration::from_millis(299)).await;
    assert!(settled.try_recv().is_err());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(settled.try_recv().ok(), Some("login".to_owned()));
    assert!(settled.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn cancelled_debouncer_delivers_nothing() {
    let (mut debouncer, mut settled) = SearchDebouncer::new(Duration::from_millis(300));

    debouncer.submit("login");
    debouncer.cancel();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(settled.try_recv().is_err());
    assert_eq!(debouncer.quiet_period(), Duration::from_millis(300));
}
