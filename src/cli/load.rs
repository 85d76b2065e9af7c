use anyhow::Context;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::cli::SourceArgs;
use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::input;
use crate::outline::{self, Plan};
use crate::rollup::{self, Rollup};

/// A parsed and aggregated plan, ready for reporting
pub struct Loaded {
    pub config: Config,
    pub plan: Plan,
    pub rollup: Rollup,
    /// Parser findings followed by aggregation findings
    pub diagnostics: Vec<Diagnostic>,
}

/// Config, then input, parse and aggregation. Diagnostics are logged here.
pub fn load(source: &SourceArgs, verbose: bool) -> anyhow::Result<Loaded> {
    let mut config = Config::load_or_default(source.config.as_deref())?;

    // Apply CLI overrides
    if let Some(input) = &source.input {
        config.input = input.clone();
    }
    if source.no_stage {
        config.stage_input = false;
    }

    config.validate()?;

    info!("Reading planning document {:?}", config.input);
    let lines = input::load_lines(&config.input, config.stage_input)?;

    let parsed = outline::parse(&lines, &config.parse_options(verbose))?;
    let mut plan = parsed.plan;
    let rollup = rollup::aggregate(&mut plan, &config.rollup_options());

    let diagnostics: Vec<Diagnostic> = parsed
        .diagnostics
        .into_iter()
        .chain(rollup.diagnostics.iter().cloned())
        .collect();
    for diagnostic in &diagnostics {
        diagnostic.log();
    }

    Ok(Loaded {
        config,
        plan,
        rollup,
        diagnostics,
    })
}

/// Buffered writer for a report file, or stdout
pub fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {:?}", path))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
