//! Task list state for the admin and client dashboards.

use crate::board::{
    domain::Viewer,
    ports::RecordStore,
    services::TaskBoardService,
    view::{ClientFilter, DerivedView, SortPolicy, StatusFilter, ViewQuery},
};
use mockable::Clock;

/// Filter selection for one viewer's task list.
///
/// Administrators sort newest first and may narrow by assignee. Clients sort
/// by urgency and the assignee filter stays at "all", since their scope is
/// already their own tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardViewModel {
    viewer: Viewer,
    query: ViewQuery,
}

impl DashboardViewModel {
    /// Creates the view model with no filters and the viewer's default sort.
    #[must_use]
    pub fn new(viewer: Viewer) -> Self {
        let query = ViewQuery::new(SortPolicy::from(viewer.role()));
        Self { viewer, query }
    }

    /// Returns the viewer the list is derived for.
    #[must_use]
    pub const fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Returns the current query.
    #[must_use]
    pub const fn query(&self) -> &ViewQuery {
        &self.query
    }

    /// Selects a status filter.
    pub const fn set_status(&mut self, status: StatusFilter) {
        self.query.status = status;
    }

    /// Selects an assignee filter. Ignored for client viewers.
    pub fn set_client(&mut self, client: ClientFilter) {
        if self.viewer.is_admin() {
            self.query.client = client;
        } else {
            tracing::debug!(user_id = %self.viewer.user_id(), "client filter ignored for client viewer");
        }
    }

    /// Replaces the search text.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    /// Clears every filter, keeping the viewer's sort policy.
    pub fn reset_filters(&mut self) {
        self.query = ViewQuery::new(self.query.sort);
    }

    /// Derives the task list from the current board state.
    #[must_use]
    pub fn render<S, C>(&self, board: &TaskBoardService<S, C>) -> DerivedView
    where
        S: RecordStore,
        C: Clock + Send + Sync,
    {
        board.view(&self.viewer, &self.query)
    }
}
