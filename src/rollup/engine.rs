//! Second pass over a fully parsed plan: project roll-ups, priority buckets,
//! team/initiative cross-tab and dollar asks

use tracing::{debug, info};

use super::types::{DollarAsk, PriorityFloor, Rollup, RollupOptions, TeamTotals};
use crate::diagnostic::Diagnostic;
use crate::outline::{
    is_monetary, InitiativeId, Plan, ResourceMap, TargetId, MONETARY_TAG, NO_TEAM,
};

/// Aggregate resourcing. Project `resources` and `total_resources` are
/// written in place; everything else is returned.
pub fn aggregate(plan: &mut Plan, options: &RollupOptions) -> Rollup {
    let mut rollup = Rollup::default();
    let ids: Vec<InitiativeId> = plan.initiative_ids().collect();

    for initiative_id in ids {
        let Some(initiative) = plan.initiative_mut(initiative_id) else {
            continue;
        };
        let is_maintenance = initiative_id == InitiativeId::Maintenance;
        let initiative_name = initiative.name.clone();

        for (p, project) in initiative.projects.iter_mut().enumerate() {
            // Maintenance work has no owner concept
            if !is_maintenance && project.owner.is_none() {
                rollup.diagnostics.push(Diagnostic::MissingOwner {
                    initiative: initiative_name.clone(),
                    project: project.name.clone(),
                });
            }

            let strategic = project.is_strategic();
            let mut folded = ResourceMap::default();

            for (t, target) in project.targets.iter().enumerate() {
                let id = TargetId {
                    initiative: initiative_id,
                    project: p,
                    target: t,
                };

                let Some(resources) = &target.resources else {
                    rollup.diagnostics.push(Diagnostic::MissingResources {
                        project: project.name.clone(),
                        target: target.name.clone(),
                    });
                    continue;
                };

                let priority = target.effective_priority(project.priority);
                if !is_maintenance && !strategic {
                    rollup.buckets.entry(priority).or_default().push(id);
                }

                for (team, amount) in resources.iter() {
                    if team.is_empty() {
                        rollup.diagnostics.push(Diagnostic::EmptyTeamKey {
                            project: project.name.clone(),
                            target: target.name.clone(),
                        });
                        continue;
                    }

                    if is_monetary(team) {
                        rollup.dollar_asks.push(DollarAsk {
                            target: id,
                            team: team.trim_end_matches(MONETARY_TAG).to_string(),
                            amount,
                        });
                        continue;
                    }

                    if priority.is_positive() || strategic {
                        folded.add(team, amount);
                    }

                    let counted = priority
                        .level()
                        .is_some_and(|level| level >= options.priority_threshold);
                    if counted && team != NO_TEAM {
                        *rollup
                            .crosstab
                            .entry(team.to_string())
                            .or_default()
                            .entry(initiative_name.clone())
                            .or_insert(0.0) += amount;
                    }
                }
            }

            project.total_resources = folded.headcount_total();
            project.resources = folded;
            debug!(
                "Project {}: {} resources folded",
                project.name, project.total_resources
            );
        }
    }

    info!(
        "Aggregated {} priority buckets, {} teams in cross-tab, {} dollar asks",
        rollup.buckets.len(),
        rollup.crosstab.len(),
        rollup.dollar_asks.len()
    );
    rollup
}

/// Headcount per team across all initiatives, maintenance included, for
/// targets whose effective priority passes `floor`
pub fn resources_at_or_above(plan: &Plan, floor: PriorityFloor) -> TeamTotals {
    let mut totals = TeamTotals::default();

    for target_ref in plan.targets() {
        if !floor.admits(target_ref.effective_priority()) {
            continue;
        }
        let Some(resources) = &target_ref.target.resources else {
            continue;
        };

        for (team, amount) in resources.iter() {
            if team.is_empty() || is_monetary(team) || team == NO_TEAM {
                continue;
            }
            *totals.per_team.entry(team.to_string()).or_insert(0.0) += amount;
            totals.total += amount;
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::model::{Project, Target};
    use crate::outline::{parse, Initiative, ParseOptions, Priority};

    const SAMPLE: &str = include_str!("../../tests/fixtures/plan.txt");

    fn options() -> RollupOptions {
        RollupOptions {
            priority_threshold: 5,
        }
    }

    fn sample_plan() -> Plan {
        let parse_options = ParseOptions {
            maintenance_name: "Platform Maintenance".to_string(),
            verbose: false,
        };
        parse(SAMPLE.lines(), &parse_options).unwrap().plan
    }

    #[test]
    fn test_project_rollups() {
        let mut plan = sample_plan();
        aggregate(&mut plan, &options());

        let indexing = &plan.initiatives[0].projects[0];
        assert_eq!(indexing.resources.get("PE"), Some(2.0));
        assert_eq!(indexing.resources.get("Security"), Some(0.5));
        assert_eq!(indexing.resources.get("PE ($)"), None);
        assert_eq!(indexing.total_resources, 2.5);

        // Strategic investment counts even without a priority
        let ranking = &plan.initiatives[0].projects[1];
        assert_eq!(ranking.total_resources, 1.0);

        let maintenance = plan.maintenance.as_ref().unwrap();
        assert_eq!(maintenance.projects[0].total_resources, 3.0);
    }

    #[test]
    fn test_buckets_skip_strategic_and_maintenance() {
        let mut plan = sample_plan();
        let rollup = aggregate(&mut plan, &options());

        let bucketed: Vec<_> = rollup
            .buckets
            .iter()
            .flat_map(|(priority, ids)| ids.iter().map(move |id| (*priority, *id)))
            .map(|(priority, id)| (priority, plan.target(id).unwrap().target.name.clone()))
            .collect();

        assert_eq!(
            bucketed,
            vec![
                (Priority::Unknown, "Hosting budget".to_string()),
                (Priority::Level(8), "Shard the index".to_string()),
            ]
        );
    }

    #[test]
    fn test_dollar_asks_are_separate() {
        let mut plan = sample_plan();
        let rollup = aggregate(&mut plan, &options());

        assert_eq!(rollup.dollar_asks.len(), 1);
        let ask = &rollup.dollar_asks[0];
        assert_eq!(ask.team, "PE");
        assert_eq!(ask.amount, 50000.0);
        assert_eq!(plan.target(ask.target).unwrap().target.name, "Hosting budget");
    }

    #[test]
    fn test_crosstab_respects_threshold() {
        let mut plan = sample_plan();
        let rollup = aggregate(&mut plan, &options());

        assert_eq!(rollup.crosstab["PE"]["Search Quality"], 2.0);
        assert_eq!(rollup.crosstab["PE"]["Platform Maintenance"], 3.0);
        assert_eq!(rollup.crosstab["Security"]["Search Quality"], 0.5);
        assert_eq!(rollup.team_ask("PE"), 5.0);
        assert_eq!(rollup.team_ask("QA"), 0.0);

        let strict = aggregate(
            &mut plan,
            &RollupOptions {
                priority_threshold: 9,
            },
        );
        assert_eq!(strict.team_ask("PE"), 3.0);
        assert!(!strict.crosstab.contains_key("Security"));
    }

    #[test]
    fn test_missing_owner_only_outside_maintenance() {
        let mut plan = sample_plan();
        let rollup = aggregate(&mut plan, &options());

        assert_eq!(
            rollup.diagnostics,
            vec![Diagnostic::MissingOwner {
                initiative: "Search Quality".to_string(),
                project: "Ranking Experiments".to_string(),
            }]
        );
    }

    #[test]
    fn test_resources_at_or_above() {
        let plan = sample_plan();

        let all = resources_at_or_above(&plan, PriorityFloor::All);
        assert_eq!(all.per_team["PE"], 6.0);
        assert_eq!(all.per_team["Security"], 0.5);
        assert_eq!(all.total, 6.5);

        let high = resources_at_or_above(&plan, PriorityFloor::AtLeast(5));
        assert_eq!(high.per_team["PE"], 5.0);
        assert_eq!(high.total, 5.5);

        let top = resources_at_or_above(&plan, PriorityFloor::AtLeast(11));
        assert_eq!(top.per_team["PE"], 3.0);
        assert!(!top.per_team.contains_key("Security"));
    }

    #[test]
    fn test_single_target_round_trip() {
        let doc = "\
* Initiative: Search
   * Project/Deliverable: Index [erin]
      * Target: Shard
         * Priority: 6
         * Resources: eng 3, ops 1.5, eng 0.5
";
        let parse_options = ParseOptions {
            maintenance_name: "Platform Maintenance".to_string(),
            verbose: false,
        };
        let mut plan = parse(doc.lines(), &parse_options).unwrap().plan;
        let rollup = aggregate(&mut plan, &options());

        let project = &plan.initiatives[0].projects[0];
        assert_eq!(project.total_resources, project.targets[0].total_resources());
        assert_eq!(project.total_resources, 5.0);

        let appearances: usize = rollup
            .buckets
            .values()
            .map(|ids| ids.iter().filter(|id| id.target == 0).count())
            .sum();
        assert_eq!(appearances, 1);
        assert_eq!(rollup.buckets[&Priority::Level(6)].len(), 1);
        assert!(rollup.diagnostics.is_empty());
    }

    #[test]
    fn test_data_quality_diagnostics() {
        let mut target_missing = Target::new("Undeclared".to_string(), None);
        target_missing.priority = Priority::Level(3);

        let mut target_blank_team = Target::new("Blank team".to_string(), None);
        target_blank_team.priority = Priority::Level(3);
        let mut resources = ResourceMap::default();
        resources.add("", 2.0);
        resources.add("eng", 1.0);
        target_blank_team.resources = Some(resources);

        let mut project = Project::new("Index".to_string(), Some("erin".to_string()));
        project.targets = vec![target_missing, target_blank_team];
        let mut initiative = Initiative::new("Search".to_string(), None);
        initiative.projects.push(project);

        let mut plan = Plan {
            initiatives: vec![initiative],
            ..Default::default()
        };
        let rollup = aggregate(&mut plan, &options());

        assert_eq!(
            rollup.diagnostics,
            vec![
                Diagnostic::MissingResources {
                    project: "Index".to_string(),
                    target: "Undeclared".to_string(),
                },
                Diagnostic::EmptyTeamKey {
                    project: "Index".to_string(),
                    target: "Blank team".to_string(),
                },
            ]
        );

        let project = &plan.initiatives[0].projects[0];
        assert_eq!(project.total_resources, 1.0);
        assert_eq!(project.resources.get(""), None);

        // Targets without any declaration stay out of the buckets
        assert_eq!(rollup.buckets[&Priority::Level(3)].len(), 1);
    }

    #[test]
    fn test_zero_priority_is_not_folded() {
        let doc = "\
* Initiative: Search
   * Project/Deliverable: Index [erin]
      * Priority: 0
      * Target: Shard
         * Resources: eng 3
";
        let parse_options = ParseOptions {
            maintenance_name: "Platform Maintenance".to_string(),
            verbose: false,
        };
        let mut plan = parse(doc.lines(), &parse_options).unwrap().plan;
        let rollup = aggregate(&mut plan, &options());

        assert_eq!(plan.initiatives[0].projects[0].total_resources, 0.0);
        assert_eq!(rollup.buckets[&Priority::Level(0)].len(), 1);
        assert!(rollup.crosstab.is_empty());
    }
}
