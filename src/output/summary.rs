//! Machine-readable export of the parsed and aggregated plan

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use crate::diagnostic::Diagnostic;
use crate::error::OutputError;
use crate::outline::{Plan, Priority, TargetId};
use crate::rollup::{resources_at_or_above, DollarAsk, PriorityFloor, Rollup, TeamTotals};

#[derive(Debug, Serialize)]
pub struct PlanExport<'a> {
    pub generated_at: DateTime<Utc>,
    pub plan: &'a Plan,
    pub resources: TeamTotals,
    pub buckets: &'a BTreeMap<Priority, Vec<TargetId>>,
    pub crosstab: &'a BTreeMap<String, BTreeMap<String, f64>>,
    pub dollar_asks: &'a [DollarAsk],
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> PlanExport<'a> {
    pub fn new(plan: &'a Plan, rollup: &'a Rollup, diagnostics: &'a [Diagnostic]) -> Self {
        Self {
            generated_at: Utc::now(),
            plan,
            resources: resources_at_or_above(plan, PriorityFloor::All),
            buckets: &rollup.buckets,
            crosstab: &rollup.crosstab,
            dollar_asks: &rollup.dollar_asks,
            diagnostics,
        }
    }
}

/// Pretty JSON of the plan and everything derived from it. `diagnostics`
/// covers both parsing and aggregation.
pub fn write_export(
    out: &mut impl Write,
    plan: &Plan,
    rollup: &Rollup,
    diagnostics: &[Diagnostic],
) -> Result<(), OutputError> {
    let export = PlanExport::new(plan, rollup, diagnostics);
    let json = serde_json::to_string_pretty(&export)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{parse, ParseOptions};
    use crate::output::tests::{aggregated_sample, render};
    use crate::rollup::{aggregate, RollupOptions};

    #[test]
    fn test_export_json_shape() {
        let (plan, rollup) = aggregated_sample();
        let text = render(|buf| write_export(buf, &plan, &rollup, &rollup.diagnostics));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert!(value["generated_at"].is_string());
        assert_eq!(value["plan"]["initiatives"][0]["name"], "Search Quality");
        assert_eq!(value["plan"]["maintenance"]["name"], "Platform Maintenance");
        assert_eq!(value["plan"]["teams"]["PE"]["ftes"], 10.0);
        assert_eq!(value["resources"]["total"], 6.5);
        assert_eq!(value["buckets"]["P8"][0]["target"], 0);
        assert_eq!(value["buckets"]["?"][0]["target"], 1);
        assert_eq!(value["crosstab"]["PE"]["Platform Maintenance"], 3.0);
        assert_eq!(value["dollar_asks"][0]["amount"], 50000.0);
        assert_eq!(value["diagnostics"][0]["kind"], "missing_owner");
    }

    #[test]
    fn test_export_carries_parse_diagnostics() {
        let doc = "\
* Initiative: Search [dana]
   * Project/Deliverable: Index [alice]
      * Target: T
         * Priority: 3
         * Resources: eng two
";
        let options = ParseOptions {
            maintenance_name: "Platform Maintenance".to_string(),
            verbose: false,
        };
        let parsed = parse(doc.lines(), &options).unwrap();
        let mut plan = parsed.plan;
        let rollup = aggregate(&mut plan, &RollupOptions { priority_threshold: 5 });
        let diagnostics: Vec<Diagnostic> = parsed
            .diagnostics
            .into_iter()
            .chain(rollup.diagnostics.iter().cloned())
            .collect();

        let text = render(|buf| write_export(buf, &plan, &rollup, &diagnostics));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let kinds: Vec<&str> = value["diagnostics"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|d| d["kind"].as_str())
            .collect();
        assert_eq!(kinds, vec!["invalid_resource_fragment"]);
    }
}
