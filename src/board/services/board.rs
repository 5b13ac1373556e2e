//! Board service: the single writer over the in-memory collections.

use super::{BoardError, BoardResult, CreateTaskRequest};
use crate::board::{
    analytics::Dashboard,
    domain::{
        Activity, ActivityKind, BoardDomainError, Category, CategoryId, NewCategory, NewUser,
        Subtask, SubtaskId, Task, TaskId, TaskPatch, TaskStatus, User, UserId, UserRole, Viewer,
        subtask_progress,
    },
    ports::{Collection, RecordStore},
    records::{BoardRecord, DecodedCollection, decode_collection, encode_collection},
    view::{DerivedView, ViewQuery, ViewerScope, derive_view, scope_tasks},
};
use mockable::Clock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Summary of what [`TaskBoardService::open`] read from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    loaded: BTreeMap<Collection, usize>,
    skipped: BTreeMap<Collection, usize>,
}

impl LoadReport {
    /// Returns the number of records accepted from `collection`.
    #[must_use]
    pub fn loaded(&self, collection: Collection) -> usize {
        self.loaded.get(&collection).copied().unwrap_or_default()
    }

    /// Returns the number of records rejected from `collection`.
    #[must_use]
    pub fn skipped(&self, collection: Collection) -> usize {
        self.skipped.get(&collection).copied().unwrap_or_default()
    }

    /// Returns the number of records rejected across all collections.
    #[must_use]
    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    fn note<R: BoardRecord>(&mut self, decoded: &DecodedCollection<R>) {
        self.loaded.insert(R::COLLECTION, decoded.records.len());
        self.skipped.insert(R::COLLECTION, decoded.skipped);
    }
}

#[derive(Debug, Default)]
struct BoardState {
    tasks: Vec<Task>,
    users: Vec<User>,
    categories: Vec<Category>,
    subtasks: Vec<Subtask>,
    activities: Vec<Activity>,
}

impl BoardState {
    fn scoped_task_position(&self, viewer: &Viewer, id: &TaskId) -> BoardResult<usize> {
        let (position, task) = self
            .tasks
            .iter()
            .enumerate()
            .find(|(_, task)| task.id() == id)
            .ok_or_else(|| BoardError::TaskNotFound(id.clone()))?;
        if !ViewerScope::from(viewer).contains(task) {
            return Err(BoardError::ScopeViolation {
                viewer: viewer.user_id().clone(),
                task: id.clone(),
            });
        }
        Ok(position)
    }

    fn scoped_task(&self, viewer: &Viewer, id: &TaskId) -> BoardResult<&Task> {
        let position = self.scoped_task_position(viewer, id)?;
        self.tasks
            .get(position)
            .ok_or_else(|| BoardError::TaskNotFound(id.clone()))
    }

    fn scoped_task_mut(&mut self, viewer: &Viewer, id: &TaskId) -> BoardResult<&mut Task> {
        let position = self.scoped_task_position(viewer, id)?;
        self.tasks
            .get_mut(position)
            .ok_or_else(|| BoardError::TaskNotFound(id.clone()))
    }

    fn subtask_position(&self, id: &SubtaskId) -> BoardResult<usize> {
        self.subtasks
            .iter()
            .position(|subtask| subtask.id() == id)
            .ok_or_else(|| BoardError::SubtaskNotFound(id.clone()))
    }

    fn require_client(&self, id: &UserId) -> BoardResult<()> {
        let user = self
            .users
            .iter()
            .find(|user| user.id() == id)
            .ok_or_else(|| BoardError::UserNotFound(id.clone()))?;
        if !user.is_client() {
            return Err(BoardError::InvalidAssignee(id.clone()));
        }
        Ok(())
    }

    fn require_category(&self, id: &CategoryId) -> BoardResult<()> {
        if self.categories.iter().any(|category| category.id() == id) {
            Ok(())
        } else {
            Err(BoardError::CategoryNotFound(id.clone()))
        }
    }
}

/// Task board orchestration service.
///
/// Owns the authoritative in-memory collections. Every mutation validates and
/// scope-checks first, then applies the change, appends to the activity log,
/// and writes the touched collections back to the store before returning.
pub struct TaskBoardService<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    state: BoardState,
}

impl<S, C> TaskBoardService<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    /// Loads every collection from `store` and returns the ready service.
    ///
    /// Malformed and duplicate records are skipped and counted in the
    /// returned [`LoadReport`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Persistence`] when a collection cannot be read.
    pub async fn open(store: Arc<S>, clock: Arc<C>) -> BoardResult<(Self, LoadReport)> {
        let mut report = LoadReport::default();

        let users = load::<User, S>(&*store, &mut report).await?;
        let categories = load::<Category, S>(&*store, &mut report).await?;
        let tasks = load::<Task, S>(&*store, &mut report).await?;
        let subtasks = load::<Subtask, S>(&*store, &mut report).await?;
        let activities = load::<Activity, S>(&*store, &mut report).await?;

        tracing::info!(
            tasks = tasks.len(),
            users = users.len(),
            skipped = report.total_skipped(),
            "loaded task board"
        );

        let service = Self {
            store,
            clock,
            state: BoardState {
                tasks,
                users,
                categories,
                subtasks,
                activities,
            },
        };
        Ok((service, report))
    }

    /// Registers an administrator when the board has no users at all.
    ///
    /// Returns the created administrator, or `None` when users already exist.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] for a malformed name or email and
    /// [`BoardError::Persistence`] when the new user cannot be written.
    pub async fn seed_default_admin(
        &mut self,
        name: &str,
        email: &str,
    ) -> BoardResult<Option<User>> {
        if !self.state.users.is_empty() {
            return Ok(None);
        }
        let admin = User::create(NewUser::new(name, email, UserRole::Admin)?, &*self.clock);
        self.state.users.push(admin.clone());
        tracing::info!(user_id = %admin.id(), "seeded default administrator");
        self.commit(&[Collection::Users]).await?;
        Ok(Some(admin))
    }

    // Tasks

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AdminRequired`] for client viewers,
    /// [`BoardError::Validation`] for a blank title, lookup errors for an
    /// unknown assignee or category, and [`BoardError::Persistence`] when the
    /// write fails after the task was added.
    pub async fn create_task(
        &mut self,
        viewer: &Viewer,
        request: CreateTaskRequest,
    ) -> BoardResult<Task> {
        require_admin(viewer, "create tasks")?;
        let new_task = request.into_new_task()?;
        if let Some(client_id) = new_task.assignee() {
            self.state.require_client(client_id)?;
        }
        if let Some(category_id) = new_task.category() {
            self.state.require_category(category_id)?;
        }

        let task = Task::create(new_task, Some(viewer.user_id().clone()), &*self.clock);
        self.state.tasks.push(task.clone());
        self.log(
            viewer,
            task.id(),
            ActivityKind::Created,
            format!("Task \"{}\" created", task.title()),
        );
        tracing::info!(task_id = %task.id(), "created task");

        self.commit(&[Collection::Tasks, Collection::Activities])
            .await?;
        Ok(task)
    }

    /// Edits task fields.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AdminRequired`] for client viewers,
    /// [`BoardError::TaskNotFound`], [`BoardError::CategoryNotFound`],
    /// [`BoardError::Validation`] for a blank title, and
    /// [`BoardError::Persistence`] when the write fails after the edit.
    pub async fn update_task(
        &mut self,
        viewer: &Viewer,
        id: &TaskId,
        patch: TaskPatch,
    ) -> BoardResult<Task> {
        require_admin(viewer, "edit tasks")?;
        if let Some(Some(category_id)) = patch.category_change() {
            self.state.require_category(category_id)?;
        }
        if patch.is_empty() {
            return self.state.scoped_task(viewer, id).cloned();
        }

        let task = self.state.scoped_task_mut(viewer, id)?;
        task.apply(patch, &*self.clock)?;
        let updated = task.clone();
        self.log(
            viewer,
            id,
            ActivityKind::Updated,
            format!("Task \"{}\" updated", updated.title()),
        );
        tracing::info!(task_id = %id, "updated task");

        self.commit(&[Collection::Tasks, Collection::Activities])
            .await?;
        Ok(updated)
    }

    /// Assigns a task to a client, or unassigns it with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AdminRequired`] for client viewers,
    /// [`BoardError::TaskNotFound`], [`BoardError::UserNotFound`],
    /// [`BoardError::InvalidAssignee`] for non-client users, and
    /// [`BoardError::Persistence`] when the write fails after the change.
    pub async fn assign_task(
        &mut self,
        viewer: &Viewer,
        id: &TaskId,
        client_id: Option<UserId>,
    ) -> BoardResult<Task> {
        require_admin(viewer, "assign tasks")?;
        if let Some(client) = client_id.as_ref() {
            self.state.require_client(client)?;
        }

        let message = client_id.as_ref().map_or_else(
            || "Task unassigned".to_owned(),
            |client| format!("Task assigned to {client}"),
        );
        let task = self.state.scoped_task_mut(viewer, id)?;
        task.assign(client_id);
        let assigned = task.clone();
        self.log(viewer, id, ActivityKind::Assigned, message);
        tracing::info!(
            task_id = %id,
            assignee = ?assigned.assigned_client_id().map(UserId::as_str),
            "assigned task"
        );

        self.commit(&[Collection::Tasks, Collection::Activities])
            .await?;
        Ok(assigned)
    }

    /// Deletes a task together with its subtasks.
    ///
    /// Activity entries are kept as history and a deletion entry is appended.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AdminRequired`] for client viewers,
    /// [`BoardError::TaskNotFound`], and [`BoardError::Persistence`] when the
    /// write fails after the deletion.
    pub async fn delete_task(&mut self, viewer: &Viewer, id: &TaskId) -> BoardResult<Task> {
        require_admin(viewer, "delete tasks")?;
        let position = self.state.scoped_task_position(viewer, id)?;
        let removed = self.state.tasks.remove(position);
        let subtasks_before = self.state.subtasks.len();
        self.state
            .subtasks
            .retain(|subtask| subtask.parent_task_id() != id);
        let cascaded = subtasks_before - self.state.subtasks.len();
        self.log(
            viewer,
            id,
            ActivityKind::Deleted,
            format!("Task \"{}\" deleted", removed.title()),
        );
        tracing::info!(task_id = %id, subtasks = cascaded, "deleted task");

        self.commit(&[
            Collection::Tasks,
            Collection::Subtasks,
            Collection::Activities,
        ])
        .await?;
        Ok(removed)
    }

    /// Moves a task to `status`. Allowed for administrators and the assigned
    /// client.
    ///
    /// Setting the current status again is a no-op and writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`], [`BoardError::ScopeViolation`]
    /// for clients acting on tasks not assigned to them, and
    /// [`BoardError::Persistence`] when the write fails after the change.
    pub async fn set_task_status(
        &mut self,
        viewer: &Viewer,
        id: &TaskId,
        status: TaskStatus,
    ) -> BoardResult<Task> {
        let task = self.state.scoped_task_mut(viewer, id)?;
        let previous = task.status();
        if !task.set_status(status, &*self.clock) {
            return Ok(task.clone());
        }
        let updated = task.clone();
        self.record_status_change(viewer, &updated, previous).await?;
        Ok(updated)
    }

    /// Flips a task between completed and pending. Allowed for administrators
    /// and the assigned client.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`], [`BoardError::ScopeViolation`]
    /// for clients acting on tasks not assigned to them, and
    /// [`BoardError::Persistence`] when the write fails after the change.
    pub async fn toggle_task_status(&mut self, viewer: &Viewer, id: &TaskId) -> BoardResult<Task> {
        let task = self.state.scoped_task_mut(viewer, id)?;
        let previous = task.status();
        task.toggle_completion(&*self.clock);
        let updated = task.clone();
        self.record_status_change(viewer, &updated, previous).await?;
        Ok(updated)
    }

    async fn record_status_change(
        &mut self,
        viewer: &Viewer,
        task: &Task,
        previous: TaskStatus,
    ) -> BoardResult<()> {
        self.log(
            viewer,
            task.id(),
            ActivityKind::StatusChanged,
            format!(
                "Status changed from {} to {}",
                previous.as_str(),
                task.status().as_str()
            ),
        );
        tracing::info!(
            task_id = %task.id(),
            from = previous.as_str(),
            to = task.status().as_str(),
            "changed task status"
        );
        self.commit(&[Collection::Tasks, Collection::Activities])
            .await
    }

    /// Returns one task, scope-checked against `viewer`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] or [`BoardError::ScopeViolation`].
    pub fn task(&self, viewer: &Viewer, id: &TaskId) -> BoardResult<&Task> {
        self.state.scoped_task(viewer, id)
    }

    /// Returns every task visible to `viewer`, in stored order.
    #[must_use]
    pub fn tasks_for(&self, viewer: &Viewer) -> Vec<&Task> {
        scope_tasks(&self.state.tasks, &ViewerScope::from(viewer))
    }

    /// Derives the filtered, sorted, and summarised view seen by `viewer`.
    #[must_use]
    pub fn view(&self, viewer: &Viewer, query: &ViewQuery) -> DerivedView {
        derive_view(
            &self.state.tasks,
            &ViewerScope::from(viewer),
            query,
            self.clock.utc(),
        )
    }

    /// Computes analytics over the tasks visible to `viewer`.
    ///
    /// Client viewers see only their own performance row.
    #[must_use]
    pub fn dashboard(&self, viewer: &Viewer, trend_days: u16) -> Dashboard {
        let scoped = self.tasks_for(viewer);
        let users: Vec<User> = if viewer.is_admin() {
            self.state.users.clone()
        } else {
            self.state
                .users
                .iter()
                .filter(|user| user.id() == viewer.user_id())
                .cloned()
                .collect()
        };
        Dashboard::compute(
            &scoped,
            &users,
            &self.state.categories,
            self.clock.utc(),
            trend_days,
        )
    }

    // Users

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AdminRequired`] for client viewers,
    /// [`BoardError::DuplicateEmail`] when the address is taken (compared
    /// case-insensitively), and [`BoardError::Persistence`] when the write
    /// fails after the user was added.
    pub async fn create_user(&mut self, viewer: &Viewer, new_user: NewUser) -> BoardResult<User> {
        require_admin(viewer, "register users")?;
        if self.user_by_email(new_user.email()).is_some() {
            return Err(BoardError::DuplicateEmail(new_user.email().to_owned()));
        }
        let user = User::create(new_user, &*self.clock);
        self.state.users.push(user.clone());
        tracing::info!(user_id = %user.id(), role = user.role().as_str(), "registered user");
        self.commit(&[Collection::Users]).await?;
        Ok(user)
    }

    /// Returns every user, in registration order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    /// Returns every client user, in registration order.
    #[must_use]
    pub fn clients(&self) -> Vec<&User> {
        self.state.users.iter().filter(|user| user.is_client()).collect()
    }

    /// Returns a user by identifier.
    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.state.users.iter().find(|user| user.id() == id)
    }

    /// Returns the user registered under `email`, compared case-insensitively.
    #[must_use]
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        let needle = email.trim();
        self.state
            .users
            .iter()
            .find(|user| user.email().eq_ignore_ascii_case(needle))
    }

    // Categories

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AdminRequired`] for client viewers and
    /// [`BoardError::Persistence`] when the write fails after creation.
    pub async fn create_category(
        &mut self,
        viewer: &Viewer,
        new_category: NewCategory,
    ) -> BoardResult<Category> {
        require_admin(viewer, "create categories")?;
        let category = Category::create(new_category, &*self.clock);
        self.state.categories.push(category.clone());
        tracing::info!(category_id = %category.id(), "created category");
        self.commit(&[Collection::Categories]).await?;
        Ok(category)
    }

    /// Deletes a category and detaches it from every task filed under it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AdminRequired`] for client viewers,
    /// [`BoardError::CategoryNotFound`], and [`BoardError::Persistence`] when
    /// the write fails after deletion.
    pub async fn delete_category(
        &mut self,
        viewer: &Viewer,
        id: &CategoryId,
    ) -> BoardResult<Category> {
        require_admin(viewer, "delete categories")?;
        let position = self
            .state
            .categories
            .iter()
            .position(|category| category.id() == id)
            .ok_or_else(|| BoardError::CategoryNotFound(id.clone()))?;
        let removed = self.state.categories.remove(position);
        for task in &mut self.state.tasks {
            task.detach_category(id);
        }
        tracing::info!(category_id = %id, "deleted category");
        self.commit(&[Collection::Categories, Collection::Tasks])
            .await?;
        Ok(removed)
    }

    /// Returns every category, in creation order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    // Subtasks

    /// Adds a subtask to a task. Allowed for administrators and the assigned
    /// client.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`], [`BoardError::ScopeViolation`],
    /// [`BoardError::Validation`] for a blank title, and
    /// [`BoardError::Persistence`] when the write fails after the addition.
    pub async fn add_subtask(
        &mut self,
        viewer: &Viewer,
        task_id: &TaskId,
        title: &str,
    ) -> BoardResult<Subtask> {
        self.state.scoped_task_position(viewer, task_id)?;
        let subtask = Subtask::create(task_id.clone(), title, &*self.clock)?;
        self.state.subtasks.push(subtask.clone());
        self.log(
            viewer,
            task_id,
            ActivityKind::SubtaskAdded,
            format!("Subtask \"{}\" added", subtask.title()),
        );
        tracing::info!(task_id = %task_id, subtask_id = %subtask.id(), "added subtask");
        self.commit(&[Collection::Subtasks, Collection::Activities])
            .await?;
        Ok(subtask)
    }

    /// Checks or unchecks a subtask. Allowed for administrators and the
    /// assigned client of the parent task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::SubtaskNotFound`], [`BoardError::ScopeViolation`],
    /// and [`BoardError::Persistence`] when the write fails after the change.
    pub async fn toggle_subtask(&mut self, viewer: &Viewer, id: &SubtaskId) -> BoardResult<Subtask> {
        let position = self.state.subtask_position(id)?;
        let parent = self.subtask_parent(position, id)?;
        self.state.scoped_task_position(viewer, &parent)?;

        let subtask = self
            .state
            .subtasks
            .get_mut(position)
            .ok_or_else(|| BoardError::SubtaskNotFound(id.clone()))?;
        let completed = subtask.toggle(&*self.clock);
        let toggled = subtask.clone();
        let (kind, verb) = if completed {
            (ActivityKind::SubtaskCompleted, "completed")
        } else {
            (ActivityKind::SubtaskReopened, "reopened")
        };
        self.log(
            viewer,
            &parent,
            kind,
            format!("Subtask \"{}\" {verb}", toggled.title()),
        );
        tracing::info!(subtask_id = %id, completed, "toggled subtask");
        self.commit(&[Collection::Subtasks, Collection::Activities])
            .await?;
        Ok(toggled)
    }

    /// Removes a subtask and records the removal against the parent task.
    /// Allowed for administrators and the assigned client of the parent task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::SubtaskNotFound`], [`BoardError::ScopeViolation`],
    /// and [`BoardError::Persistence`] when the write fails after removal.
    pub async fn delete_subtask(&mut self, viewer: &Viewer, id: &SubtaskId) -> BoardResult<Subtask> {
        let position = self.state.subtask_position(id)?;
        let parent = self.subtask_parent(position, id)?;
        self.state.scoped_task_position(viewer, &parent)?;
        let removed = self.state.subtasks.remove(position);
        self.log(
            viewer,
            &parent,
            ActivityKind::SubtaskDeleted,
            format!("Subtask \"{}\" deleted", removed.title()),
        );
        tracing::info!(subtask_id = %id, "deleted subtask");
        self.commit(&[Collection::Subtasks, Collection::Activities])
            .await?;
        Ok(removed)
    }

    /// Returns the subtasks of a task, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] or [`BoardError::ScopeViolation`].
    pub fn subtasks(&self, viewer: &Viewer, task_id: &TaskId) -> BoardResult<Vec<&Subtask>> {
        self.state.scoped_task_position(viewer, task_id)?;
        Ok(self
            .state
            .subtasks
            .iter()
            .filter(|subtask| subtask.parent_task_id() == task_id)
            .collect())
    }

    /// Returns the completed percentage of a task's subtasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] or [`BoardError::ScopeViolation`].
    pub fn subtask_progress(&self, viewer: &Viewer, task_id: &TaskId) -> BoardResult<u8> {
        Ok(subtask_progress(self.subtasks(viewer, task_id)?))
    }

    fn subtask_parent(&self, position: usize, id: &SubtaskId) -> BoardResult<TaskId> {
        self.state
            .subtasks
            .get(position)
            .map(|subtask| subtask.parent_task_id().clone())
            .ok_or_else(|| BoardError::SubtaskNotFound(id.clone()))
    }

    // Activity log

    /// Leaves a note on a task. Allowed for administrators and the assigned
    /// client.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`], [`BoardError::ScopeViolation`],
    /// [`BoardError::Validation`] for a blank message, and
    /// [`BoardError::Persistence`] when the write fails after logging.
    pub async fn add_comment(
        &mut self,
        viewer: &Viewer,
        task_id: &TaskId,
        message: &str,
    ) -> BoardResult<Activity> {
        self.state.scoped_task_position(viewer, task_id)?;
        let text = message.trim();
        if text.is_empty() {
            return Err(BoardDomainError::EmptyComment.into());
        }
        let activity = self.log(viewer, task_id, ActivityKind::Commented, text);
        self.commit(&[Collection::Activities]).await?;
        Ok(activity)
    }

    /// Returns the activity log of a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] or [`BoardError::ScopeViolation`].
    pub fn activities_for(&self, viewer: &Viewer, task_id: &TaskId) -> BoardResult<Vec<&Activity>> {
        self.state.scoped_task_position(viewer, task_id)?;
        Ok(self
            .state
            .activities
            .iter()
            .filter(|activity| activity.task_id() == task_id)
            .collect())
    }

    /// Returns up to `limit` of the most recent activities visible to
    /// `viewer`, newest first.
    ///
    /// Administrators see the whole log, including entries for deleted
    /// tasks; clients see entries for tasks currently assigned to them.
    #[must_use]
    pub fn recent_activities(&self, viewer: &Viewer, limit: usize) -> Vec<&Activity> {
        let scope = ViewerScope::from(viewer);
        let visible = |activity: &&Activity| {
            scope.is_all()
                || self
                    .state
                    .tasks
                    .iter()
                    .any(|task| task.id() == activity.task_id() && scope.contains(task))
        };
        let mut recent: Vec<&Activity> = self.state.activities.iter().rev().filter(visible).collect();
        recent.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        recent.truncate(limit);
        recent
    }

    fn log(
        &mut self,
        viewer: &Viewer,
        task_id: &TaskId,
        kind: ActivityKind,
        message: impl Into<String>,
    ) -> Activity {
        let activity = Activity::record(
            task_id.clone(),
            Some(viewer.user_id().clone()),
            kind,
            message,
            &*self.clock,
        );
        self.state.activities.push(activity.clone());
        activity
    }

    // Persistence

    /// Writes the listed collections, attempting every one even after a
    /// failure, and reports the first failure.
    async fn commit(&self, collections: &[Collection]) -> BoardResult<()> {
        let mut first_failure = None;
        for &collection in collections {
            if let Err(err) = self.persist(collection).await {
                tracing::warn!(
                    %collection,
                    error = %err,
                    "change kept in memory but not persisted"
                );
                first_failure.get_or_insert(err);
            }
        }
        first_failure.map_or(Ok(()), Err)
    }

    async fn persist(&self, collection: Collection) -> BoardResult<()> {
        let records: Vec<Value> = match collection {
            Collection::Tasks => encode_collection(&self.state.tasks)?,
            Collection::Users => encode_collection(&self.state.users)?,
            Collection::Categories => encode_collection(&self.state.categories)?,
            Collection::Subtasks => encode_collection(&self.state.subtasks)?,
            Collection::Activities => encode_collection(&self.state.activities)?,
            Collection::Session => return Ok(()),
        };
        self.store.save(collection, &records).await?;
        Ok(())
    }
}

fn require_admin(viewer: &Viewer, action: &'static str) -> BoardResult<()> {
    if viewer.is_admin() {
        Ok(())
    } else {
        Err(BoardError::AdminRequired {
            viewer: viewer.user_id().clone(),
            action,
        })
    }
}

async fn load<R, S>(store: &S, report: &mut LoadReport) -> BoardResult<Vec<R>>
where
    R: BoardRecord,
    S: RecordStore + ?Sized,
{
    let values = store.load(R::COLLECTION).await?;
    let decoded = decode_collection::<R>(values);
    report.note(&decoded);
    Ok(decoded.records)
}
