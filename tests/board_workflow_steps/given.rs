//! Given steps for board workflow BDD scenarios.

use super::world::{BoardWorld, default_snapshot, scenario_member};
use atelier::board::domain::{ColumnId, NewTask};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("an empty board")]
fn empty_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world.load(default_snapshot())
}

#[given("a board whose columns end at order {order:u32}")]
fn board_ending_at(world: &mut BoardWorld, order: u32) -> Result<(), eyre::Report> {
    let mut snapshot = default_snapshot();
    snapshot.columns.retain(|column| column.order() <= order);
    world.load(snapshot)
}

#[given(r#"a column titled "{title}" limited to {limit:u32} tasks"#)]
fn limited_column(world: &mut BoardWorld, title: String, limit: u32) -> Result<(), eyre::Report> {
    world
        .board_mut()?
        .create_column(&title, Some(limit))
        .wrap_err("create limited column")?;
    Ok(())
}

#[given(r#"an unlimited column titled "{title}""#)]
fn unlimited_column(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    world
        .board_mut()?
        .create_column(&title, None)
        .wrap_err("create unlimited column")?;
    Ok(())
}

#[given(r#"{count:u32} tasks in column "{column}""#)]
fn tasks_in_column(
    world: &mut BoardWorld,
    count: u32,
    column: String,
) -> Result<(), eyre::Report> {
    let column = ColumnId::new(column)?;
    let board = world.board_mut()?;
    for index in 0..count {
        board
            .create_task(
                &column,
                NewTask::new(format!("Filler {index}"), scenario_member()),
            )
            .wrap_err("create filler task")?;
    }
    Ok(())
}

#[given(r#"a task "{title}" in column "{column}""#)]
fn named_task(world: &mut BoardWorld, title: String, column: String) -> Result<(), eyre::Report> {
    let column = ColumnId::new(column)?;
    let task = world
        .board_mut()?
        .create_task(&column, NewTask::new(title.clone(), scenario_member()))
        .wrap_err("create named task")?;
    world.named_tasks.insert(title, task.id());
    Ok(())
}
