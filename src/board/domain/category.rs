//! Task categories.

use super::{BoardDomainError, CategoryId};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Colour assigned to categories created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#6b7280";

/// Validated input for creating a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    name: String,
    color: String,
    description: String,
}

impl NewCategory {
    /// Creates category input with the default colour.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyCategoryName`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyCategoryName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            color: DEFAULT_CATEGORY_COLOR.to_owned(),
            description: String::new(),
        })
    }

    /// Sets the display colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A named grouping that tasks can be filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
    color: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl Category {
    /// Creates a category.
    #[must_use]
    pub fn create(new_category: NewCategory, clock: &impl Clock) -> Self {
        Self::from_persisted(CategoryId::new(), new_category, clock.utc())
    }

    /// Reconstructs a category from persisted fields.
    #[must_use]
    pub fn from_persisted(
        id: CategoryId,
        new_category: NewCategory,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: new_category.name,
            color: new_category.color,
            description: new_category.description,
            created_at,
        }
    }

    /// Returns the category identifier.
    #[must_use]
    pub const fn id(&self) -> &CategoryId {
        &self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display colour.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
