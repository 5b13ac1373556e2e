//! Shared world state for derived view BDD scenarios.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemoryRecordStore,
    domain::{Task, Viewer},
    services::{BoardError, TaskBoardService},
    view::DerivedView,
};

/// Clock that moves one second forward on every reading, so records created
/// in sequence get distinct timestamps.
pub struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2025, 6, 1, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self {
            start,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(tick)
    }
}

/// Board type used by the BDD world.
pub type TestBoard = TaskBoardService<InMemoryRecordStore, SteppingClock>;

/// Scenario world for derived view behaviour tests.
#[derive(Default)]
pub struct DerivedViewWorld {
    pub board: Option<TestBoard>,
    pub admin: Option<Viewer>,
    pub last_view: Option<DerivedView>,
    pub last_result: Option<Result<Task, BoardError>>,
}

impl DerivedViewWorld {
    /// Opens a fresh board with a seeded administrator.
    pub fn open_board(&mut self) -> Result<(), eyre::Report> {
        let (mut board, _) = run_async(TaskBoardService::open(
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(SteppingClock::new()),
        ))?;
        let admin = run_async(board.seed_default_admin("Administrator", "admin@example.com"))?
            .ok_or_else(|| eyre::eyre!("empty board should seed an administrator"))?
            .viewer();
        self.board = Some(board);
        self.admin = Some(admin);
        Ok(())
    }

    /// Returns the open board.
    pub fn board(&self) -> Result<&TestBoard, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("board not opened in scenario world"))
    }

    /// Returns the open board mutably.
    pub fn board_mut(&mut self) -> Result<&mut TestBoard, eyre::Report> {
        self.board
            .as_mut()
            .ok_or_else(|| eyre::eyre!("board not opened in scenario world"))
    }

    /// Returns the seeded administrator.
    pub fn admin(&self) -> Result<Viewer, eyre::Report> {
        self.admin
            .clone()
            .ok_or_else(|| eyre::eyre!("administrator not seeded in scenario world"))
    }

    /// Returns the viewer registered under `email`.
    pub fn viewer_for(&self, email: &str) -> Result<Viewer, eyre::Report> {
        self.board()?
            .user_by_email(email)
            .map(taskboard::board::domain::User::viewer)
            .ok_or_else(|| eyre::eyre!("no user registered as {email}"))
    }

    /// Returns the task titled `title`, as seen by the administrator.
    pub fn task_titled(&self, title: &str) -> Result<Task, eyre::Report> {
        let admin = self.admin()?;
        self.board()?
            .tasks_for(&admin)
            .into_iter()
            .find(|task| task.title() == title)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no task titled {title}"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DerivedViewWorld {
    DerivedViewWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
