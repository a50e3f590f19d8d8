//! Then steps for board workflow BDD scenarios.

use super::world::BoardWorld;
use atelier::board::domain::{BoardDomainError, ColumnId, DropOutcome, RejectionReason};
use rstest_bdd_macros::then;

#[then("the drop is rejected because the limit was exceeded")]
fn drop_rejected(world: &BoardWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_drop
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing drop outcome"))?;
    if !matches!(
        outcome,
        Ok(DropOutcome::Rejected {
            reason: RejectionReason::LimitExceeded { .. },
            ..
        })
    ) {
        return Err(eyre::eyre!("expected LimitExceeded rejection, got {outcome:?}"));
    }
    Ok(())
}

#[then("the drop moves the task")]
fn drop_moves(world: &BoardWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_drop
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing drop outcome"))?;
    if !matches!(outcome, Ok(DropOutcome::Moved { .. })) {
        return Err(eyre::eyre!("expected a move, got {outcome:?}"));
    }
    Ok(())
}

#[then(r#"the task "{title}" is in column "{column}""#)]
fn task_in_column(world: &BoardWorld, title: String, column: String) -> Result<(), eyre::Report> {
    let id = world.task_named(&title)?;
    let task = world
        .board()?
        .task(id)
        .ok_or_else(|| eyre::eyre!("task {title} disappeared"))?;
    eyre::ensure!(
        task.status().as_str() == column,
        "expected {title} in {column}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"column "{column}" contains {count:u32} tasks"#)]
fn column_contains(world: &BoardWorld, column: String, count: u32) -> Result<(), eyre::Report> {
    let column = ColumnId::new(column)?;
    let found = world.board()?.tasks_by_status(&column).len();
    eyre::ensure!(
        found == usize::try_from(count)?,
        "expected {count} tasks in {column}, found {found}"
    );
    Ok(())
}

#[then("the new column has order {order:u32}")]
fn new_column_order(world: &BoardWorld, order: u32) -> Result<(), eyre::Report> {
    let created = world
        .last_column
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing column creation result"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("column creation failed: {err}"))?;
    eyre::ensure!(
        created.order() == order,
        "expected order {order}, found {}",
        created.order()
    );
    Ok(())
}

#[then("the new column is not a default column")]
fn new_column_not_default(world: &BoardWorld) -> Result<(), eyre::Report> {
    let created = world
        .last_column
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing column creation result"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("column creation failed: {err}"))?;
    eyre::ensure!(!created.is_default(), "new column is marked default");
    Ok(())
}

#[then(r#"column "{column}" no longer exists"#)]
fn column_gone(world: &BoardWorld, column: String) -> Result<(), eyre::Report> {
    let listed = world
        .board()?
        .columns()
        .iter()
        .any(|existing| existing.id().as_str() == column);
    eyre::ensure!(!listed, "column {column} is still listed");
    Ok(())
}

#[then(r#"column "{column}" still exists"#)]
fn column_present(world: &BoardWorld, column: String) -> Result<(), eyre::Report> {
    let listed = world
        .board()?
        .columns()
        .iter()
        .any(|existing| existing.id().as_str() == column);
    eyre::ensure!(listed, "column {column} is missing");
    Ok(())
}

#[then("the deletion fails because the column is protected")]
fn deletion_protected(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_deletion
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing deletion result"))?;
    if !matches!(result, Err(BoardDomainError::ProtectedColumn(_))) {
        return Err(eyre::eyre!("expected ProtectedColumn error, got {result:?}"));
    }
    Ok(())
}
