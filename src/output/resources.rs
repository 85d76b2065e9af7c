//! Resourcing reports: team totals, priority ladder, dollar asks and team gaps

use std::io::Write;

use crate::error::OutputError;
use crate::outline::Plan;
use crate::rollup::{Rollup, TeamTotals};

/// `team: amount` per team, then the grand total
pub fn write_resources(out: &mut impl Write, totals: &TeamTotals) -> Result<(), OutputError> {
    let mut content = String::new();
    for (team, amount) in &totals.per_team {
        content.push_str(&format!("{}: {}\n", team, amount));
    }
    content.push_str(&format!("Total: {}\n", totals.total));

    out.write_all(content.as_bytes())?;
    Ok(())
}

/// Priority buckets from most to least important, with a running headcount.
/// Targets at or above `threshold` are starred.
pub fn write_prioritized(
    out: &mut impl Write,
    plan: &Plan,
    rollup: &Rollup,
    threshold: u8,
) -> Result<(), OutputError> {
    let mut content = String::new();
    let mut cumulative = 0.0;

    for (priority, ids) in rollup.buckets.iter().rev() {
        content.push_str(&format!("== {} ==\n", priority));
        let marker = if priority.level().is_some_and(|level| level >= threshold) {
            '*'
        } else {
            ' '
        };

        for target_ref in ids.iter().filter_map(|id| plan.target(*id)) {
            let headcount = target_ref.target.total_resources();
            cumulative += headcount;
            content.push_str(&format!(
                "{} {} / {} / {}: {} (cumulative {})\n",
                marker,
                target_ref.initiative.name,
                target_ref.project.name,
                target_ref.target.name,
                headcount,
                cumulative
            ));
        }
    }

    out.write_all(content.as_bytes())?;
    Ok(())
}

/// Dollar-denominated asks, never mixed with headcount
pub fn write_asks(out: &mut impl Write, plan: &Plan, rollup: &Rollup) -> Result<(), OutputError> {
    let mut content = String::new();
    let mut total = 0.0;

    for ask in &rollup.dollar_asks {
        let Some(target_ref) = plan.target(ask.target) else {
            continue;
        };
        total += ask.amount;
        content.push_str(&format!(
            "{} / {} / {} [{}]: {} ${}\n",
            target_ref.initiative.name,
            target_ref.project.name,
            target_ref.target.name,
            target_ref.effective_priority(),
            ask.team,
            ask.amount
        ));
    }
    content.push_str(&format!("Total: ${}\n", total));

    out.write_all(content.as_bytes())?;
    Ok(())
}

/// Per team: asks by initiative, total ask, declared headcount and the gap
/// between the two
pub fn write_teams(out: &mut impl Write, plan: &Plan, rollup: &Rollup) -> Result<(), OutputError> {
    let mut content = String::new();

    let undeclared_in_asks = plan
        .teams
        .keys()
        .filter(|short| !rollup.crosstab.contains_key(*short));
    let teams = rollup.crosstab.keys().chain(undeclared_in_asks);

    for short in teams {
        let ask = rollup.team_ask(short);
        match plan.teams.get(short) {
            Some(team) if team.name != *short => {
                content.push_str(&format!("{} ({})\n", team.name, short))
            }
            _ => content.push_str(&format!("{}\n", short)),
        }

        if let Some(by_initiative) = rollup.crosstab.get(short) {
            for (initiative, amount) in by_initiative {
                content.push_str(&format!("  {}: {}\n", initiative, amount));
            }
        }
        content.push_str(&format!("  Ask: {}\n", ask));

        match plan.teams.get(short) {
            Some(team) => {
                let current = team.headcount();
                content.push_str(&format!("  Current: {}\n", current));
                content.push_str(&format!("  Gap: {}\n", ask - current));
            }
            None => content.push_str("  Current: undeclared\n"),
        }
    }

    out.write_all(content.as_bytes())?;
    Ok(())
}
