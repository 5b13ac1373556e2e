//! Inputs to the Derived View Engine.

use crate::board::domain::{ParseEnumError, Task, TaskStatus, UserId, UserRole, Viewer};

/// Which tasks a viewer is authorized to see.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewerScope {
    /// Every task (administrators).
    All,
    /// Only tasks assigned to this client.
    Client(UserId),
}

impl ViewerScope {
    /// Returns `true` when `task` lies inside this scope.
    #[must_use]
    pub fn contains(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Client(client_id) => task.is_assigned_to(client_id),
        }
    }

    /// Returns `true` for the administrator scope.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<&Viewer> for ViewerScope {
    fn from(viewer: &Viewer) -> Self {
        match viewer.role() {
            UserRole::Admin => Self::All,
            UserRole::Client => Self::Client(viewer.user_id().clone()),
        }
    }
}

/// Status filter selected in the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// No status filtering.
    #[default]
    All,
    /// Only tasks with exactly this status.
    Only(TaskStatus),
}

impl StatusFilter {
    /// Returns `true` when `task` passes the filter.
    #[must_use]
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => task.status() == status,
        }
    }
}

impl TryFrom<&str> for StatusFilter {
    type Error = ParseEnumError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        TaskStatus::try_from(value)
            .map(Self::Only)
            .map_err(|_| ParseEnumError::new("status filter", value))
    }
}

/// Assignee filter selected in the administrator view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ClientFilter {
    /// No assignee filtering.
    #[default]
    All,
    /// Only tasks without an assignee.
    Unassigned,
    /// Only tasks assigned to this client.
    Client(UserId),
}

impl ClientFilter {
    /// Returns `true` when `task` passes the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Unassigned => task.assigned_client_id().is_none(),
            Self::Client(client_id) => task.is_assigned_to(client_id),
        }
    }
}

/// Ordering applied to the filtered tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortPolicy {
    /// Newest first by creation time; ties keep input order.
    #[default]
    AdminDefault,
    /// Overdue first, then by ascending due date, then undated tasks newest
    /// first.
    ClientDefault,
}

impl From<UserRole> for SortPolicy {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::AdminDefault,
            UserRole::Client => Self::ClientDefault,
        }
    }
}

/// Filter and sort selection for one derived view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewQuery {
    /// Status filter.
    pub status: StatusFilter,
    /// Assignee filter.
    pub client: ClientFilter,
    /// Free-text search; blank means no text filtering.
    pub search: String,
    /// Sort policy.
    pub sort: SortPolicy,
}

impl ViewQuery {
    /// Creates a query with no filters and the given sort policy.
    #[must_use]
    pub fn new(sort: SortPolicy) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Sets the status filter.
    #[must_use]
    pub const fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Sets the assignee filter.
    #[must_use]
    pub fn with_client(mut self, client: ClientFilter) -> Self {
        self.client = client;
        self
    }

    /// Sets the search text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Returns the lowercased, trimmed search needle, or `None` when blank.
    #[must_use]
    pub fn search_needle(&self) -> Option<String> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }
}
