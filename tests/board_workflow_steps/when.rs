//! When steps for board workflow BDD scenarios.

use super::world::BoardWorld;
use atelier::board::{domain::ColumnId, services::DeleteColumnRequest};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"the task "{title}" is dragged into column "{column}""#)]
fn drag_task(world: &mut BoardWorld, title: String, column: String) -> Result<(), eyre::Report> {
    let task = world.task_named(&title)?;
    let target = ColumnId::new(column)?;
    let board = world.board_mut()?;
    board.begin_drag(task).wrap_err("begin drag")?;
    let outcome = board.drop(&target);
    world.last_drop = Some(outcome);
    Ok(())
}

#[when(r#"a column titled "{title}" is created"#)]
fn create_column(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let created = world.board_mut()?.create_column(&title, None);
    world.last_column = Some(created);
    Ok(())
}

#[when(r#"column "{column}" is deleted with fallback "{fallback}""#)]
fn delete_column(
    world: &mut BoardWorld,
    column: String,
    fallback: String,
) -> Result<(), eyre::Report> {
    let request =
        DeleteColumnRequest::new(ColumnId::new(column)?, ColumnId::new(fallback)?)
            .confirm_migration();
    let deletion = world.board_mut()?.delete_column(&request);
    world.last_deletion = Some(deletion);
    Ok(())
}
