//! Spreadsheet rows for the planning tracker

use std::collections::HashMap;
use std::io::Write;

use crate::error::OutputError;
use crate::outline::{Initiative, Plan};

/// One row per project of every ordinary initiative, with its targets
pub fn write_csv_all(
    out: &mut impl Write,
    plan: &Plan,
    topline_goals: &HashMap<String, String>,
) -> Result<(), OutputError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);

    for initiative in &plan.initiatives {
        for project in &initiative.projects {
            let targets = project
                .targets
                .iter()
                .map(|target| match target.when.as_ref().or(project.when.as_ref()) {
                    Some(when) => format!("{} [{}]", target.name, when),
                    None => target.name.clone(),
                })
                .collect::<Vec<_>>()
                .join("\n");

            // Goal lookup is per row so an initiative without projects never fails
            let goal = goal_label(initiative, topline_goals)?;
            writer.write_record([
                goal,
                initiative.name.as_str(),
                "",
                project.name.as_str(),
                "",
                targets.as_str(),
                project.when.as_deref().unwrap_or(""),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// One row per project of every ordinary initiative
pub fn write_csv_projects(
    out: &mut impl Write,
    plan: &Plan,
    topline_goals: &HashMap<String, String>,
) -> Result<(), OutputError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);

    for initiative in &plan.initiatives {
        for project in &initiative.projects {
            let goal = goal_label(initiative, topline_goals)?;
            writer.write_record([
                goal,
                initiative.name.as_str(),
                "",
                project.name.as_str(),
                "",
                "",
                project.when.as_deref().unwrap_or(""),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn goal_label<'a>(
    initiative: &Initiative,
    topline_goals: &'a HashMap<String, String>,
) -> Result<&'a str, OutputError> {
    let goal = initiative
        .topline_goals
        .first()
        .ok_or_else(|| OutputError::MissingToplineGoal(initiative.name.clone()))?;

    topline_goals
        .get(goal)
        .map(String::as_str)
        .ok_or_else(|| OutputError::UnknownToplineGoal {
            initiative: initiative.name.clone(),
            goal: goal.clone(),
        })
}
