//! Applies a scripted command sequence to a board snapshot.
//!
//! Usage:
//!
//! ```text
//! board_replay <config-path|-> <snapshot-path|-> <commands-path>
//! ```
//!
//! Passing `-` for the configuration uses the engine defaults; passing `-`
//! for the snapshot starts from the four default columns of an empty
//! project. The command script is a JSON array of [`BoardCommand`] values,
//! for example:
//!
//! ```json
//! [
//!   { "command": "create_column", "title": "Review", "wip_limit": 2 },
//!   { "command": "set_column_limit", "column": "in_progress", "limit": 3 }
//! ]
//! ```
//!
//! Rejected commands are logged and skipped. The resulting snapshot is
//! written to stdout as JSON. Set `RUST_LOG` to control log verbosity.

use atelier::board::{
    adapters::memory::RecordingScroller,
    config::{BoardConfig, ConfigError},
    domain::{BoardDomainError, BoardSnapshot, ProjectId},
    services::{Board, BoardCommand},
};
use mockable::DefaultClock;
use std::{
    env,
    ffi::OsString,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const STDIN_MARKER: &str = "-";
const DEFAULT_PROJECT: &str = "replay";

/// Errors that stop a replay.
#[derive(Debug, Error)]
enum ReplayError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot rejected: {0}")]
    Snapshot(#[from] BoardDomainError),
    #[error("failed to write snapshot: {0}")]
    Output(#[source] io::Error),
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayArgs {
    config: Option<PathBuf>,
    snapshot: Option<PathBuf>,
    commands: PathBuf,
}

/// Counts of applied and rejected commands.
#[derive(Debug, Default, PartialEq, Eq)]
struct ReplaySummary {
    applied: usize,
    rejected: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("atelier=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = parse_args(collect_args(env::args_os().skip(1))?.into_iter())?;
    let config = match &args.config {
        Some(path) => BoardConfig::from_json_str(&read_file(path)?)?,
        None => BoardConfig::default(),
    };
    let snapshot = match &args.snapshot {
        Some(path) => parse_json(&read_file(path)?, "snapshot")?,
        None => BoardSnapshot::with_default_columns(ProjectId::new(DEFAULT_PROJECT), Vec::new()),
    };
    let commands: Vec<BoardCommand> = parse_json(&read_file(&args.commands)?, "command script")?;

    let mut board = Board::from_snapshot(
        snapshot,
        config,
        Arc::new(DefaultClock),
        Arc::new(RecordingScroller::new()),
    )?;
    let summary = replay(&mut board, commands);
    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        "replay finished"
    );

    write_snapshot(&board.snapshot(), &mut io::stdout().lock())?;
    Ok(())
}

fn collect_args(args: impl Iterator<Item = OsString>) -> Result<Vec<String>, ReplayError> {
    args.map(|arg_os| {
        arg_os
            .into_string()
            .map_err(|_| ReplayError::InvalidArgs("argument is not valid UTF-8".into()))
    })
    .collect()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<ReplayArgs, ReplayError> {
    let config = args
        .next()
        .ok_or_else(|| ReplayError::InvalidArgs("missing config path argument".into()))?;
    let snapshot = args
        .next()
        .ok_or_else(|| ReplayError::InvalidArgs("missing snapshot path argument".into()))?;
    let commands = args
        .next()
        .ok_or_else(|| ReplayError::InvalidArgs("missing commands path argument".into()))?;
    if let Some(extra) = args.next() {
        return Err(ReplayError::InvalidArgs(format!(
            "unexpected extra argument: {extra}"
        )));
    }
    if commands == STDIN_MARKER {
        return Err(ReplayError::InvalidArgs(
            "the command script must be a file".into(),
        ));
    }
    Ok(ReplayArgs {
        config: optional_path(config),
        snapshot: optional_path(snapshot),
        commands: PathBuf::from(commands),
    })
}

fn optional_path(arg: String) -> Option<PathBuf> {
    (arg != STDIN_MARKER).then(|| PathBuf::from(arg))
}

fn read_file(path: &Path) -> Result<String, ReplayError> {
    std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(
    document: &str,
    what: &'static str,
) -> Result<T, ReplayError> {
    serde_json::from_str(document).map_err(|source| ReplayError::Parse { what, source })
}

fn replay<C, S>(board: &mut Board<C, S>, commands: Vec<BoardCommand>) -> ReplaySummary
where
    C: mockable::Clock + Send + Sync,
    S: atelier::board::ports::BoardScroller,
{
    let mut summary = ReplaySummary::default();
    for (index, command) in commands.into_iter().enumerate() {
        match board.execute(command) {
            Ok(output) => {
                summary.applied += 1;
                info!(index, ?output, "command applied");
            }
            Err(err) => {
                summary.rejected += 1;
                warn!(index, error = %err, "command rejected");
            }
        }
        for event in board.take_events() {
            info!(?event, "board event");
        }
    }
    summary
}

fn write_snapshot(snapshot: &BoardSnapshot, out: &mut impl Write) -> Result<(), ReplayError> {
    serde_json::to_writer_pretty(&mut *out, snapshot)
        .map_err(|err| ReplayError::Output(err.into()))?;
    writeln!(out).map_err(ReplayError::Output)
}
