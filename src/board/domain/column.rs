//! Column value objects.

use super::{BoardDomainError, ColumnId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, non-empty column title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnTitle(String);

impl ColumnTitle {
    /// Creates a validated column title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnTitle`] when the title is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyColumnTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wraps a title known to be non-empty.
    pub(crate) fn from_trusted(value: &str) -> Self {
        Self(value.to_owned())
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ColumnTitle {
    type Error = BoardDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColumnTitle> for String {
    fn from(value: ColumnTitle) -> Self {
        value.0
    }
}

impl fmt::Display for ColumnTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cosmetic colour tag attached to a column. Carries no behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnTheme(String);

impl ColumnTheme {
    /// Wraps a theme tag such as `blue` or `#aabbcc`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the theme tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A workflow stage that groups tasks sharing a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    title: ColumnTitle,
    order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wip_limit: Option<u32>,
    #[serde(default)]
    is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<ColumnTheme>,
}

impl Column {
    /// Creates a custom (non-default) column.
    #[must_use]
    pub const fn new(id: ColumnId, title: ColumnTitle, order: u32) -> Self {
        Self {
            id,
            title,
            order,
            wip_limit: None,
            is_default: false,
            theme: None,
        }
    }

    /// Creates a protected default column.
    #[must_use]
    pub const fn new_default(id: ColumnId, title: ColumnTitle, order: u32) -> Self {
        Self {
            id,
            title,
            order,
            wip_limit: None,
            is_default: true,
            theme: None,
        }
    }

    /// Sets the work-in-progress limit.
    #[must_use]
    pub const fn with_wip_limit(mut self, limit: Option<u32>) -> Self {
        self.wip_limit = limit;
        self
    }

    /// Sets the theme tag.
    #[must_use]
    pub fn with_theme(mut self, theme: ColumnTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Returns the column title.
    #[must_use]
    pub const fn title(&self) -> &ColumnTitle {
        &self.title
    }

    /// Returns the column's position in the board ordering.
    #[must_use]
    pub const fn order(&self) -> u32 {
        self.order
    }

    /// Returns the work-in-progress limit, if any.
    #[must_use]
    pub const fn wip_limit(&self) -> Option<u32> {
        self.wip_limit
    }

    /// Returns whether this is a protected default column.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }

    /// Returns the theme tag, if any.
    #[must_use]
    pub const fn theme(&self) -> Option<&ColumnTheme> {
        self.theme.as_ref()
    }

    /// Returns whether `occupancy` tasks already fill the column.
    #[must_use]
    pub fn is_full(&self, occupancy: usize) -> bool {
        self.wip_limit
            .is_some_and(|limit| occupancy >= usize::try_from(limit).unwrap_or(usize::MAX))
    }

    pub(crate) const fn set_wip_limit(&mut self, limit: Option<u32>) {
        self.wip_limit = limit;
    }

    pub(crate) fn set_title(&mut self, title: ColumnTitle) {
        self.title = title;
    }

    pub(crate) fn set_theme(&mut self, theme: Option<ColumnTheme>) {
        self.theme = theme;
    }
}
