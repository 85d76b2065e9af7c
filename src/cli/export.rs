use std::io::Write;
use tracing::info;

use crate::cli::load::{load, open_output};
use crate::cli::ReportArgs;
use crate::output;

pub fn execute(args: ReportArgs, verbose: bool) -> anyhow::Result<()> {
    let loaded = load(&args.source, verbose)?;

    let mut out = open_output(args.output.as_deref())?;
    output::write_export(&mut out, &loaded.plan, &loaded.rollup, &loaded.diagnostics)?;
    out.flush()?;

    if let Some(path) = &args.output {
        info!("Export written to {:?}", path);
    }
    Ok(())
}
