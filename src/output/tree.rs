//! Indented plain-text dump of the whole plan

use std::io::Write;

use crate::error::OutputError;
use crate::outline::{Initiative, Plan, Priority, ResourceMap};

pub fn write_tree(out: &mut impl Write, plan: &Plan) -> Result<(), OutputError> {
    let mut content = String::new();

    if !plan.teams.is_empty() {
        content.push_str("Teams\n");
        for (short, team) in &plan.teams {
            let label = if *short == team.name {
                team.name.clone()
            } else {
                format!("{} ({})", team.name, short)
            };
            content.push_str(&format!(
                "  {}: {} FTEs, {} contractors, {} reqs = {}\n",
                label,
                team.ftes,
                team.contractors,
                team.reqs,
                team.headcount()
            ));
            if let Some(member) = &team.board_member {
                content.push_str(&format!("    board member: {}\n", member));
            }
        }
        content.push('\n');
    }

    for (_, initiative) in plan.all_initiatives() {
        push_initiative(&mut content, initiative);
    }

    out.write_all(content.as_bytes())?;
    Ok(())
}

fn push_initiative(content: &mut String, initiative: &Initiative) {
    content.push_str(&format!(
        "{}{}\n",
        initiative.name,
        owner_suffix(initiative.owner.as_deref())
    ));
    content.push_str(&format!("goals: {}\n", initiative.topline_goals.join("; ")));
    content.push_str(&format!("kpis: {}\n", initiative.kpis.join("; ")));

    for project in &initiative.projects {
        content.push_str(&format!(
            "  project: {}{}{}\n",
            project.name,
            owner_suffix(project.owner.as_deref()),
            priority_suffix(project.priority)
        ));
        if let Some(when) = &project.when {
            content.push_str(&format!("    when: {}\n", when));
        }
        if let Some(investment) = &project.strategic_investment {
            content.push_str(&format!("    strategic investment: {}\n", investment));
        }
        if !project.resources.is_empty() {
            content.push_str(&format!(
                "    resources: {} (total {})\n",
                format_resources(&project.resources),
                project.total_resources
            ));
        }

        for target in &project.targets {
            content.push_str(&format!(
                "    target: {}{}{}\n",
                target.name,
                owner_suffix(target.owner.as_deref()),
                priority_suffix(target.priority)
            ));
            if let Some(when) = &target.when {
                content.push_str(&format!("      when: {}\n", when));
            }
            match &target.resources {
                Some(resources) => content.push_str(&format!(
                    "      resources: {}\n",
                    format_resources(resources)
                )),
                None => content.push_str("      resources: undeclared\n"),
            }
            if let Some(bug) = &target.bug {
                content.push_str(&format!("      bug: {}\n", bug));
            }
        }
    }
}

fn owner_suffix(owner: Option<&str>) -> String {
    owner.map(|o| format!(" [{}]", o)).unwrap_or_default()
}

fn priority_suffix(priority: Priority) -> String {
    if priority.is_set() {
        format!(" ({})", priority)
    } else {
        String::new()
    }
}

/// `team amount` pairs in key order; dollar asks keep their `$`
pub(crate) fn format_resources(resources: &ResourceMap) -> String {
    resources
        .iter()
        .map(|(team, amount)| match team.strip_suffix(crate::outline::MONETARY_TAG) {
            Some(team) => format!("{} ${}", team, amount),
            None => format!("{} {}", team, amount),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
