//! Ordered set of board columns.

use super::{BoardDomainError, Column, ColumnId, ColumnTheme, ColumnTitle};
use std::collections::{BTreeMap, HashMap};

/// Identifiers and titles of the columns every new board starts with.
const DEFAULT_COLUMNS: [(&str, &str); 4] = [
    ("backlog", "Backlog"),
    ("todo", "To Do"),
    ("in_progress", "In Progress"),
    ("done", "Done"),
];

/// Identifier of the entry column among [`DEFAULT_COLUMNS`].
const DEFAULT_ENTRY_COLUMN: &str = "todo";

/// Owns the board's columns, their ordering and the entry column marker.
///
/// Columns are held in a lookup table keyed by identifier, with a separate
/// order index, so `order` values are unique by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRegistry {
    columns: HashMap<ColumnId, Column>,
    order_index: BTreeMap<u32, ColumnId>,
    entry: ColumnId,
}

impl ColumnRegistry {
    /// Builds a registry from existing columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateOrder`] or
    /// [`BoardDomainError::DuplicateColumn`] on collisions, and
    /// [`BoardDomainError::InconsistentSnapshot`] when no column is marked
    /// default or the entry column is missing.
    pub fn new(
        columns: impl IntoIterator<Item = Column>,
        entry: ColumnId,
    ) -> Result<Self, BoardDomainError> {
        let mut registry = Self {
            columns: HashMap::new(),
            order_index: BTreeMap::new(),
            entry,
        };
        for column in columns {
            registry.add(column)?;
        }

        if !registry.columns.values().any(Column::is_default) {
            return Err(BoardDomainError::InconsistentSnapshot(
                "at least one column must be marked default".to_owned(),
            ));
        }
        if !registry.contains(&registry.entry) {
            return Err(BoardDomainError::InconsistentSnapshot(format!(
                "entry column {} does not exist",
                registry.entry
            )));
        }
        Ok(registry)
    }

    /// Builds the standard board: backlog, to do (entry), in progress and
    /// done, all protected.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut columns = HashMap::new();
        let mut order_index = BTreeMap::new();
        for (order, (slug, title)) in (1..).zip(DEFAULT_COLUMNS) {
            let id = ColumnId::slug_from_title(slug);
            let column = Column::new_default(id.clone(), ColumnTitle::from_trusted(title), order);
            order_index.insert(order, id.clone());
            columns.insert(id, column);
        }
        Self {
            columns,
            order_index,
            entry: ColumnId::slug_from_title(DEFAULT_ENTRY_COLUMN),
        }
    }

    /// Returns all columns sorted by `order`.
    #[must_use]
    pub fn list(&self) -> Vec<&Column> {
        self.order_index
            .values()
            .filter_map(|id| self.columns.get(id))
            .collect()
    }

    /// Returns the column with the given identifier.
    #[must_use]
    pub fn get(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    /// Returns whether the column exists.
    #[must_use]
    pub fn contains(&self, id: &ColumnId) -> bool {
        self.columns.contains_key(id)
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns whether the registry holds no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the order value a newly appended column receives.
    #[must_use]
    pub fn next_order(&self) -> u32 {
        self.order_index
            .last_key_value()
            .map_or(1, |(order, _)| order.saturating_add(1))
    }

    /// Returns an identifier derived from `title` that no column uses yet.
    #[must_use]
    pub fn available_id_for(&self, title: &ColumnTitle) -> ColumnId {
        let base = ColumnId::slug_from_title(title.as_str());
        if !self.contains(&base) {
            return base;
        }
        (2..)
            .map(|suffix| base.with_suffix(suffix))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or(base)
    }

    /// Returns the canonical column for new and duplicated tasks.
    #[must_use]
    pub const fn entry_column(&self) -> &ColumnId {
        &self.entry
    }

    /// Marks a column as the entry column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] if the column is absent.
    pub fn set_entry_column(&mut self, id: &ColumnId) -> Result<(), BoardDomainError> {
        if !self.contains(id) {
            return Err(BoardDomainError::ColumnNotFound(id.clone()));
        }
        self.entry = id.clone();
        Ok(())
    }

    /// Inserts a column.
    ///
    /// Never overwrites: order and identifier collisions are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateOrder`] when the order value is
    /// taken and [`BoardDomainError::DuplicateColumn`] when the identifier is.
    pub fn add(&mut self, column: Column) -> Result<(), BoardDomainError> {
        if let Some(existing) = self.order_index.get(&column.order()) {
            return Err(BoardDomainError::DuplicateOrder {
                order: column.order(),
                existing: existing.clone(),
            });
        }
        if self.contains(column.id()) {
            return Err(BoardDomainError::DuplicateColumn(column.id().clone()));
        }
        self.order_index.insert(column.order(), column.id().clone());
        self.columns.insert(column.id().clone(), column);
        Ok(())
    }

    /// Removes a non-default column.
    ///
    /// The entry column is protected in the same way as default columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ProtectedColumn`] for default and entry
    /// columns and [`BoardDomainError::ColumnNotFound`] when absent.
    pub fn remove(&mut self, id: &ColumnId) -> Result<Column, BoardDomainError> {
        self.ensure_removable(id)?;
        let column = self
            .columns
            .remove(id)
            .ok_or_else(|| BoardDomainError::ColumnNotFound(id.clone()))?;
        self.order_index.remove(&column.order());
        Ok(column)
    }

    /// Checks whether [`Self::remove`] would accept `id`.
    ///
    /// # Errors
    ///
    /// See [`Self::remove`].
    pub fn ensure_removable(&self, id: &ColumnId) -> Result<(), BoardDomainError> {
        let column = self
            .get(id)
            .ok_or_else(|| BoardDomainError::ColumnNotFound(id.clone()))?;
        if column.is_default() || *id == self.entry {
            return Err(BoardDomainError::ProtectedColumn(id.clone()));
        }
        Ok(())
    }

    /// Stores a new work-in-progress limit.
    ///
    /// Existing over-limit occupancy is tolerated; limits are only enforced
    /// when a task moves.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] when absent.
    pub fn set_limit(&mut self, id: &ColumnId, limit: Option<u32>) -> Result<(), BoardDomainError> {
        self.column_mut(id)?.set_wip_limit(limit);
        Ok(())
    }

    /// Renames a column. The identifier stays stable.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] when absent.
    pub fn rename(&mut self, id: &ColumnId, title: ColumnTitle) -> Result<(), BoardDomainError> {
        self.column_mut(id)?.set_title(title);
        Ok(())
    }

    /// Replaces or clears the cosmetic theme tag.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] when absent.
    pub fn set_theme(
        &mut self,
        id: &ColumnId,
        theme: Option<ColumnTheme>,
    ) -> Result<(), BoardDomainError> {
        self.column_mut(id)?.set_theme(theme);
        Ok(())
    }

    fn column_mut(&mut self, id: &ColumnId) -> Result<&mut Column, BoardDomainError> {
        self.columns
            .get_mut(id)
            .ok_or_else(|| BoardDomainError::ColumnNotFound(id.clone()))
    }
}

impl Default for ColumnRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
