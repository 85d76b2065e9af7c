use anyhow::Context;
use std::fs::File;
use std::io::Write;
use tracing::info;

use crate::board::{self, JsonBoard};
use crate::cli::load::open_output;
use crate::cli::{BoardCommands, BoardExportArgs, BoardSyncArgs};
use crate::config::Config;

pub fn execute(command: BoardCommands) -> anyhow::Result<()> {
    match command {
        BoardCommands::Export(args) => export(args),
        BoardCommands::Sync(args) => sync(args),
    }
}

fn export(args: BoardExportArgs) -> anyhow::Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let board = JsonBoard::load(&args.snapshot)?;

    let rows = board::export_cards(&board, &config.board);
    info!("Exporting {} cards", rows.len());

    let mut out = open_output(args.output.as_deref())?;
    board::write_card_csv(&mut out, &rows)?;
    out.flush()?;
    Ok(())
}

fn sync(args: BoardSyncArgs) -> anyhow::Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let mut board = JsonBoard::load(&args.snapshot)?;

    let file = File::open(&args.csv)
        .with_context(|| format!("Failed to open card CSV {:?}", args.csv))?;
    let rows = board::read_sync_rows(file)?;
    let actions = board::plan_sync(&board, &rows, &config.board);

    if actions.is_empty() {
        info!("Board already matches {:?}", args.csv);
        return Ok(());
    }

    if args.dry_run {
        info!("DRY RUN - previewing label edits:");
        for action in &actions {
            println!("  {}", action);
        }
        return Ok(());
    }

    let applied = board::apply_sync(&mut board, &actions)?;
    board.save(&args.snapshot)?;
    info!("Applied {} label edits to {:?}", applied, args.snapshot);
    Ok(())
}
