use tracing::error;

use crate::cli::load::load;
use crate::cli::CheckArgs;
use crate::diagnostic::{warning_count, Severity};

pub fn execute(args: CheckArgs, verbose: bool) -> anyhow::Result<()> {
    let loaded = load(&args.source, verbose)?;

    for diagnostic in &loaded.diagnostics {
        let level = match diagnostic.severity() {
            Severity::Info => "info",
            Severity::Warning => "warning",
        };
        println!("{}: {}", level, diagnostic);
    }

    let warnings = warning_count(&loaded.diagnostics);
    println!(
        "{} initiatives, {} targets, {} warnings",
        loaded.plan.all_initiatives().count(),
        loaded.plan.targets().count(),
        warnings
    );

    // Exit with error if warnings and flag set
    if args.strict && warnings > 0 {
        error!("Exiting with error: {} warnings", warnings);
        std::process::exit(1);
    }

    Ok(())
}
