//! Shared test helpers for in-memory board integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use taskboard::board::{
    adapters::memory::InMemoryRecordStore,
    domain::{NewUser, User, UserRole, Viewer},
    services::TaskBoardService,
};

/// Board type used by the integration tests.
pub type TestBoard = TaskBoardService<InMemoryRecordStore, DefaultClock>;

/// A board seeded with one administrator and two clients.
pub struct SeededBoard {
    pub store: InMemoryRecordStore,
    pub board: TestBoard,
    pub admin: Viewer,
    pub ann: User,
    pub bob: User,
}

/// Opens an empty in-memory board and registers the standard cast.
///
/// # Errors
///
/// Returns an error if opening the board or registering a user fails.
pub async fn seeded_board() -> Result<SeededBoard, eyre::Report> {
    let store = InMemoryRecordStore::new();
    let (mut board, _) =
        TaskBoardService::open(Arc::new(store.clone()), Arc::new(DefaultClock)).await?;
    let admin = board
        .seed_default_admin("Administrator", "admin@example.com")
        .await?
        .ok_or_else(|| eyre::eyre!("empty board should seed an administrator"))?
        .viewer();
    let ann = register_client(&mut board, &admin, "Ann", "ann@example.com").await?;
    let bob = register_client(&mut board, &admin, "Bob", "bob@example.com").await?;
    Ok(SeededBoard {
        store,
        board,
        admin,
        ann,
        bob,
    })
}

async fn register_client(
    board: &mut TestBoard,
    admin: &Viewer,
    name: &str,
    email: &str,
) -> Result<User, eyre::Report> {
    let new_user = NewUser::new(name, email, UserRole::Client)?;
    Ok(board.create_user(admin, new_user).await?)
}
