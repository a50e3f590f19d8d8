//! Service layer for column creation, deletion and configuration.

use super::BoardState;
use crate::board::domain::{
    BoardDomainError, BoardEvent, BoardResult, Column, ColumnId, ColumnTheme, ColumnTitle, TaskId,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Request payload for deleting a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteColumnRequest {
    column: ColumnId,
    fallback: ColumnId,
    #[serde(default)]
    confirmed: bool,
}

impl DeleteColumnRequest {
    /// Creates an unconfirmed deletion request.
    ///
    /// Unconfirmed requests only succeed for empty columns.
    #[must_use]
    pub const fn new(column: ColumnId, fallback: ColumnId) -> Self {
        Self {
            column,
            fallback,
            confirmed: false,
        }
    }

    /// Confirms that occupants may be migrated to the fallback column.
    #[must_use]
    pub const fn confirm_migration(mut self) -> Self {
        self.confirmed = true;
        self
    }

    /// Returns the column to delete.
    #[must_use]
    pub const fn column(&self) -> &ColumnId {
        &self.column
    }

    /// Returns the column receiving migrated tasks.
    #[must_use]
    pub const fn fallback(&self) -> &ColumnId {
        &self.fallback
    }
}

/// Result of a successful column deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDeletion {
    /// Removed column.
    pub column: Column,
    /// Column that received the occupants.
    pub fallback: ColumnId,
    /// Migrated tasks, in insertion order.
    pub migrated: Vec<TaskId>,
}

/// Column lifecycle orchestration service.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnLifecycleService;

impl ColumnLifecycleService {
    /// Creates a column lifecycle service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Appends a custom column after the last one.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnTitle`] for a blank title.
    pub fn create_column(
        self,
        state: &mut BoardState,
        title: &str,
        wip_limit: Option<u32>,
    ) -> BoardResult<Column> {
        let column_title = ColumnTitle::new(title)?;
        let registry = state.registry_mut();
        let id = registry.available_id_for(&column_title);
        let column = Column::new(id, column_title, registry.next_order()).with_wip_limit(wip_limit);
        registry.add(column.clone())?;

        info!(column = %column.id(), order = column.order(), "column created");
        state.record(BoardEvent::ColumnCreated {
            column: column.id().clone(),
            order: column.order(),
        });
        Ok(column)
    }

    /// Deletes a non-default column, migrating its tasks to the fallback.
    ///
    /// Every check runs before anything changes, so a rejected request
    /// neither moves nor removes anything. The fallback's limit is not
    /// consulted during migration.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ProtectedColumn`] for default or entry
    /// columns, [`BoardDomainError::ColumnNotFound`] when the column is
    /// absent, [`BoardDomainError::InvalidFallback`] when the fallback is
    /// absent or is the column itself, and
    /// [`BoardDomainError::MigrationNotConfirmed`] when the column holds
    /// tasks and the request was not confirmed.
    pub fn delete_column(
        self,
        state: &mut BoardState,
        request: &DeleteColumnRequest,
    ) -> BoardResult<ColumnDeletion> {
        if let Err(err) = Self::check_deletion(state, request) {
            warn!(column = %request.column, error = %err, "column deletion rejected");
            return Err(err);
        }

        let migrated = state
            .store_mut()
            .reassign_status(&request.column, &request.fallback);
        let column = state.registry_mut().remove(&request.column)?;

        info!(
            column = %request.column,
            fallback = %request.fallback,
            migrated = migrated.len(),
            "column deleted"
        );
        state.record(BoardEvent::ColumnDeleted {
            column: request.column.clone(),
            fallback: request.fallback.clone(),
            migrated: migrated.clone(),
        });
        Ok(ColumnDeletion {
            column,
            fallback: request.fallback.clone(),
            migrated,
        })
    }

    fn check_deletion(state: &BoardState, request: &DeleteColumnRequest) -> BoardResult<()> {
        state.registry().ensure_removable(&request.column)?;
        if request.fallback == request.column || !state.registry().contains(&request.fallback) {
            return Err(BoardDomainError::InvalidFallback(request.fallback.clone()));
        }
        let occupancy = state.store().count_in(&request.column);
        if occupancy > 0 && !request.confirmed {
            return Err(BoardDomainError::MigrationNotConfirmed {
                column: request.column.clone(),
                occupancy,
            });
        }
        Ok(())
    }

    /// Stores a new limit without checking current occupancy.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] when absent.
    pub fn set_column_limit(
        self,
        state: &mut BoardState,
        column: &ColumnId,
        limit: Option<u32>,
    ) -> BoardResult<()> {
        state.registry_mut().set_limit(column, limit)?;
        let occupancy = state.store().count_in(column);
        info!(column = %column, ?limit, occupancy, "column limit changed");
        state.record(BoardEvent::ColumnLimitChanged {
            column: column.clone(),
            limit,
        });
        Ok(())
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnTitle`] for a blank title and
    /// [`BoardDomainError::ColumnNotFound`] when absent.
    pub fn rename_column(
        self,
        state: &mut BoardState,
        column: &ColumnId,
        title: &str,
    ) -> BoardResult<()> {
        let column_title = ColumnTitle::new(title)?;
        state.registry_mut().rename(column, column_title)?;
        info!(column = %column, "column renamed");
        state.record(BoardEvent::ColumnUpdated {
            column: column.clone(),
        });
        Ok(())
    }

    /// Replaces or clears a column's cosmetic theme.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] when absent.
    pub fn set_column_theme(
        self,
        state: &mut BoardState,
        column: &ColumnId,
        theme: Option<ColumnTheme>,
    ) -> BoardResult<()> {
        state.registry_mut().set_theme(column, theme)?;
        state.record(BoardEvent::ColumnUpdated {
            column: column.clone(),
        });
        Ok(())
    }

    /// Marks a column as the entry column for new and duplicated tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] when absent.
    pub fn set_entry_column(self, state: &mut BoardState, column: &ColumnId) -> BoardResult<()> {
        state.registry_mut().set_entry_column(column)?;
        info!(column = %column, "entry column changed");
        state.record(BoardEvent::ColumnUpdated {
            column: column.clone(),
        });
        Ok(())
    }
}
