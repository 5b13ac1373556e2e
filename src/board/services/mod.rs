//! Service layer for board mutations, derived views, and sign-in.

mod board;
mod error;
mod requests;
mod session;

pub use board::{LoadReport, TaskBoardService};
pub use error::{BoardError, BoardResult};
pub use requests::CreateTaskRequest;
pub use session::{SessionError, SessionService};
