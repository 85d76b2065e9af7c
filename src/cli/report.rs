use std::io::Write;
use tracing::info;

use crate::cli::load::{load, open_output};
use crate::cli::{CsvArgs, ReportArgs, ResourcesArgs};
use crate::output;
use crate::rollup::{resources_at_or_above, PriorityFloor};

pub fn dump(args: ReportArgs, verbose: bool) -> anyhow::Result<()> {
    let loaded = load(&args.source, verbose)?;
    let mut out = open_output(args.output.as_deref())?;
    output::write_tree(&mut out, &loaded.plan)?;
    out.flush()?;
    Ok(())
}

pub fn resources(args: ResourcesArgs, verbose: bool) -> anyhow::Result<()> {
    let loaded = load(&args.report.source, verbose)?;

    let floor = match args.min_priority {
        Some(priority) => PriorityFloor::AtLeast(priority),
        None => PriorityFloor::All,
    };
    let totals = resources_at_or_above(&loaded.plan, floor);
    info!("{} teams, {} total", totals.per_team.len(), totals.total);

    let mut out = open_output(args.report.output.as_deref())?;
    output::write_resources(&mut out, &totals)?;
    out.flush()?;
    Ok(())
}

pub fn csv(args: CsvArgs, verbose: bool) -> anyhow::Result<()> {
    let loaded = load(&args.report.source, verbose)?;
    let goals = &loaded.config.topline_goals;

    let mut out = open_output(args.report.output.as_deref())?;
    if args.projects {
        output::write_csv_projects(&mut out, &loaded.plan, goals)?;
    } else {
        output::write_csv_all(&mut out, &loaded.plan, goals)?;
    }
    out.flush()?;
    Ok(())
}

pub fn prioritized(args: ReportArgs, verbose: bool) -> anyhow::Result<()> {
    let loaded = load(&args.source, verbose)?;
    let mut out = open_output(args.output.as_deref())?;
    output::write_prioritized(
        &mut out,
        &loaded.plan,
        &loaded.rollup,
        loaded.config.priority_threshold,
    )?;
    out.flush()?;
    Ok(())
}

pub fn asks(args: ReportArgs, verbose: bool) -> anyhow::Result<()> {
    let loaded = load(&args.source, verbose)?;
    let mut out = open_output(args.output.as_deref())?;
    output::write_asks(&mut out, &loaded.plan, &loaded.rollup)?;
    out.flush()?;
    Ok(())
}

pub fn teams(args: ReportArgs, verbose: bool) -> anyhow::Result<()> {
    let loaded = load(&args.source, verbose)?;
    let mut out = open_output(args.output.as_deref())?;
    output::write_teams(&mut out, &loaded.plan, &loaded.rollup)?;
    out.flush()?;
    Ok(())
}
