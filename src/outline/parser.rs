//! Line-oriented state machine over the planning outline.
//!
//! The parser makes one forward pass. Entity attachment depends on the
//! "current" team, initiative and project, so lines must be fed in document
//! order and nothing is revisited once classified.

use regex::Regex;
use tracing::{debug, info};

use super::line::{self, Line};
use super::model::{
    split_owner, split_short_name, Initiative, InitiativeId, Plan, Priority, PriorityParseError,
    Project, Target, Team,
};
use crate::diagnostic::Diagnostic;
use crate::error::OutlineError;

const NOT_GOING_TO_HAPPEN: &str = "* Not going to happen";
const TEAMS_HEADER: &str = "Teams:";

const TEAM: &str = "* Team:";
const CURRENT_FTES: &str = "* Current FTEs:";
const CURRENT_CONTRACTORS: &str = "* Current Contractors:";
const OPEN_REQS: &str = "* Open reqs:";
const BOARD_MEMBER: &str = "* Board member:";

const INITIATIVE: &str = "* Initiative:";
const TOPLINE_GOALS: &str = "* Supported topline goals:";
const KPIS: &str = "* Key Performance Indicators (KPI):";
const PROJECT: &str = "* Project/Deliverable:";
const TARGET: &str = "* Target:";

const WHEN: &str = "* When:";
const DEPENDENCIES: &str = "* Dependencies:";
const PRIORITY: &str = "* Priority:";
const NOTES: &str = "* Notes:";
const FEEDBACK_NOTES: &str = "* Feedback Notes:";
const DRIVERS: &str = "* Drivers:";
const STRATEGIC_INVESTMENT: &str = "* Strategic investment:";
const RESOURCES: &str = "* Resources:";
const INTERN_ELIGIBLE: &str = "* Intern eligible:";
const BUG: &str = "* Bug:";

const PROJECT_DEPTH: usize = 2;
const TARGET_DEPTH: usize = 3;

/// Fields whose owner (project or target) is decided by indentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopedField {
    When,
    Dependencies,
    Priority,
    Note,
}

const SCOPED_FIELDS: [(&str, ScopedField); 5] = [
    (WHEN, ScopedField::When),
    (DEPENDENCIES, ScopedField::Dependencies),
    (PRIORITY, ScopedField::Priority),
    (NOTES, ScopedField::Note),
    (FEEDBACK_NOTES, ScopedField::Note),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TeamCount {
    Ftes,
    Contractors,
    Reqs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Scanning,
    Preamble,
    Finished,
}

/// Whether the caller should keep feeding lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Initiative name that designates the maintenance initiative
    pub maintenance_name: String,
    /// Record unrecognized lines as diagnostics
    pub verbose: bool,
}

#[derive(Debug)]
pub struct ParsedOutline {
    pub plan: Plan,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct OutlineParser<'o> {
    options: &'o ParseOptions,
    edit_marker: Regex,
    plan: Plan,
    diagnostics: Vec<Diagnostic>,
    section: Section,
    preamble_closed: bool,
    current_team: Option<String>,
    current_initiative: Option<InitiativeId>,
    current_project: Option<usize>,
    /// The open project's priority was fixed when it was opened
    priority_pinned: bool,
    in_topline_goals: bool,
    in_kpis: bool,
}

impl<'o> OutlineParser<'o> {
    pub fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            edit_marker: line::edit_marker(),
            plan: Plan::default(),
            diagnostics: Vec::new(),
            section: Section::Scanning,
            preamble_closed: false,
            current_team: None,
            current_initiative: None,
            current_project: None,
            priority_pinned: false,
            in_topline_goals: false,
            in_kpis: false,
        }
    }

    /// Classify one raw line (1-based `number`) and apply it to the plan
    pub fn feed(&mut self, number: usize, raw: &str) -> Result<Flow, OutlineError> {
        if self.section == Section::Finished {
            return Ok(Flow::Stop);
        }

        let Some(line) = line::preprocess(number, raw, &self.edit_marker) else {
            return Ok(Flow::Continue);
        };

        if line.text.starts_with(NOT_GOING_TO_HAPPEN) {
            debug!("Line {}: not-going-to-happen marker, ignoring the rest", number);
            self.section = Section::Finished;
            return Ok(Flow::Stop);
        }

        if line.original.trim_end() == TEAMS_HEADER && !self.preamble_closed {
            self.section = Section::Preamble;
            return Ok(Flow::Continue);
        }

        if self.section == Section::Preamble {
            if !line.text.starts_with(INITIATIVE) {
                self.team_line(&line)?;
                return Ok(Flow::Continue);
            }
            self.section = Section::Scanning;
        }

        self.scan_line(&line)?;
        Ok(Flow::Continue)
    }

    pub fn finish(self) -> ParsedOutline {
        ParsedOutline {
            plan: self.plan,
            diagnostics: self.diagnostics,
        }
    }

    fn team_line(&mut self, line: &Line) -> Result<(), OutlineError> {
        if let Some(declared) = line.value_after(TEAM) {
            let (name, short) =
                split_short_name(declared).ok_or_else(|| OutlineError::UnclosedParenthesis {
                    line: line.number,
                    text: declared.to_string(),
                })?;
            debug!("Team {} ({})", name, short);
            self.plan
                .teams
                .insert(short.clone(), Team::new(name, short.clone()));
            self.current_team = Some(short);
            return Ok(());
        }

        let counts = [
            (CURRENT_FTES, TeamCount::Ftes),
            (CURRENT_CONTRACTORS, TeamCount::Contractors),
            (OPEN_REQS, TeamCount::Reqs),
        ];
        for (marker, count) in counts {
            if let Some(value) = line.value_after(marker) {
                self.team_count(line, count, value);
                return Ok(());
            }
        }

        if let Some(value) = line.value_after(BOARD_MEMBER) {
            if let Some(team) = self.current_team(line) {
                team.board_member = non_empty(value);
            }
            return Ok(());
        }

        self.unrecognized(line);
        Ok(())
    }

    fn team_count(&mut self, line: &Line, count: TeamCount, value: &str) {
        // An empty value keeps the zero default
        if value.is_empty() {
            return;
        }

        let parsed = value.parse::<f64>().ok().filter(|v| v.is_finite());
        let Some(team) = self.current_team(line) else {
            return;
        };

        match parsed {
            Some(n) => match count {
                TeamCount::Ftes => team.ftes = n,
                TeamCount::Contractors => team.contractors = n,
                TeamCount::Reqs => team.reqs = n,
            },
            None => {
                let team = team.name.clone();
                self.diagnostics.push(Diagnostic::InvalidTeamCount {
                    line: line.number,
                    team,
                    value: value.to_string(),
                });
            }
        }
    }

    fn current_team(&mut self, line: &Line) -> Option<&mut Team> {
        let short = match &self.current_team {
            Some(short) => short.clone(),
            None => {
                self.diagnostics.push(Diagnostic::TeamFieldOutsideTeam {
                    line: line.number,
                    text: line.text.clone(),
                });
                return None;
            }
        };
        self.plan.teams.get_mut(&short)
    }

    fn scan_line(&mut self, line: &Line) -> Result<(), OutlineError> {
        if let Some(declared) = line.value_after(INITIATIVE) {
            return self.open_initiative(line, declared);
        }

        if line.text.starts_with(TOPLINE_GOALS) {
            self.current_initiative_mut(line, TOPLINE_GOALS)?;
            self.in_topline_goals = true;
            return Ok(());
        }

        if line.text.starts_with(KPIS) {
            self.current_initiative_mut(line, KPIS)?;
            self.in_topline_goals = false;
            self.in_kpis = true;
            return Ok(());
        }

        if let Some(declared) = line.value_after(PROJECT) {
            return self.open_project(line, PROJECT, declared, Priority::NotSet);
        }

        // Within maintenance, each team is its own always-included project
        if self.current_initiative == Some(InitiativeId::Maintenance) {
            if let Some(declared) = line.value_after(TEAM) {
                return self.open_project(line, TEAM, declared, Priority::Level(Priority::MAX));
            }
        }

        if let Some(declared) = line.value_after(TARGET) {
            let (name, owner) = owner_of(line, declared)?;
            let project = self.current_project_mut(line, TARGET)?;
            project.targets.push(Target::new(name, owner));
            return Ok(());
        }

        if self.field_line(line)? {
            return Ok(());
        }

        if self.in_topline_goals {
            let item = line.list_item().to_string();
            self.current_initiative_mut(line, TOPLINE_GOALS)?
                .topline_goals
                .push(item);
        } else if self.in_kpis {
            let item = line.list_item().to_string();
            self.current_initiative_mut(line, KPIS)?.kpis.push(item);
        } else {
            self.unrecognized(line);
        }
        Ok(())
    }

    fn open_initiative(&mut self, line: &Line, declared: &str) -> Result<(), OutlineError> {
        let (name, owner) = owner_of(line, declared)?;

        self.preamble_closed = true;
        self.current_project = None;

        if name == self.options.maintenance_name {
            if self.plan.maintenance.is_some() {
                debug!("Line {}: reopening maintenance initiative", line.number);
            } else {
                self.plan.maintenance = Some(Initiative::new(name, owner));
            }
            self.current_initiative = Some(InitiativeId::Maintenance);
        } else {
            debug!("Line {}: initiative {}", line.number, name);
            self.plan.initiatives.push(Initiative::new(name, owner));
            self.current_initiative = Some(InitiativeId::Ordinary(self.plan.initiatives.len() - 1));
        }
        Ok(())
    }

    fn open_project(
        &mut self,
        line: &Line,
        marker: &str,
        declared: &str,
        priority: Priority,
    ) -> Result<(), OutlineError> {
        let (name, owner) = owner_of(line, declared)?;

        self.in_topline_goals = false;
        self.in_kpis = false;

        let mut project = Project::new(name, owner);
        project.priority = priority;
        self.priority_pinned = marker == TEAM;

        let initiative = self.current_initiative_mut(line, marker)?;
        let idx = initiative.projects.len();
        initiative.projects.push(project);
        self.current_project = Some(idx);
        Ok(())
    }

    /// Apply a field marker line. Returns false when the line is not a field.
    fn field_line(&mut self, line: &Line) -> Result<bool, OutlineError> {
        for (marker, field) in SCOPED_FIELDS {
            let Some(value) = line.value_after(marker) else {
                continue;
            };
            return match line.depth() {
                Some(PROJECT_DEPTH) => self.project_field(line, marker, field, value).map(|_| true),
                Some(TARGET_DEPTH) => self.target_field(line, marker, field, value).map(|_| true),
                _ => Ok(false),
            };
        }

        if let Some(value) = line.value_after(DRIVERS) {
            let project = self.current_project_mut(line, DRIVERS)?;
            push_text(&mut project.drivers, value);
            return Ok(true);
        }

        if let Some(value) = line.value_after(STRATEGIC_INVESTMENT) {
            let project = self.current_project_mut(line, STRATEGIC_INVESTMENT)?;
            project.strategic_investment = non_empty(value);
            return Ok(true);
        }

        if let Some(value) = line.value_after(RESOURCES) {
            let diagnostics = self
                .current_target_mut(line, RESOURCES)?
                .add_resources(value);
            self.diagnostics.extend(diagnostics);
            return Ok(true);
        }

        if let Some(value) = line.value_after(INTERN_ELIGIBLE) {
            self.current_target_mut(line, INTERN_ELIGIBLE)?.intern_eligible = is_affirmative(value);
            return Ok(true);
        }

        if let Some(value) = line.value_after(BUG) {
            self.current_target_mut(line, BUG)?.bug = non_empty(value);
            return Ok(true);
        }

        Ok(false)
    }

    fn project_field(
        &mut self,
        line: &Line,
        marker: &str,
        field: ScopedField,
        value: &str,
    ) -> Result<(), OutlineError> {
        let priority = scoped_priority(line, field, value)?;
        let pinned = self.priority_pinned;
        let project = self.current_project_mut(line, marker)?;
        match field {
            ScopedField::When => project.when = non_empty(value),
            ScopedField::Dependencies => project.dependencies = value.to_string(),
            ScopedField::Priority if pinned => {
                debug!(
                    "Line {}: keeping maximum priority for maintenance team {}",
                    line.number, project.name
                );
            }
            ScopedField::Priority => {
                if let Some(priority) = priority {
                    project.priority = priority;
                }
            }
            ScopedField::Note => push_text(&mut project.notes, value),
        }
        Ok(())
    }

    fn target_field(
        &mut self,
        line: &Line,
        marker: &str,
        field: ScopedField,
        value: &str,
    ) -> Result<(), OutlineError> {
        let priority = scoped_priority(line, field, value)?;
        let target = self.current_target_mut(line, marker)?;
        match field {
            ScopedField::When => target.when = non_empty(value),
            ScopedField::Dependencies => target.dependencies = value.to_string(),
            ScopedField::Priority => {
                if let Some(priority) = priority {
                    target.priority = priority;
                }
            }
            ScopedField::Note => push_text(&mut target.notes, value),
        }
        Ok(())
    }

    fn current_initiative_mut(
        &mut self,
        line: &Line,
        marker: &str,
    ) -> Result<&mut Initiative, OutlineError> {
        self.current_initiative
            .and_then(|id| self.plan.initiative_mut(id))
            .ok_or_else(|| OutlineError::NoOpenInitiative {
                line: line.number,
                marker: marker.to_string(),
            })
    }

    fn current_project_mut(
        &mut self,
        line: &Line,
        marker: &str,
    ) -> Result<&mut Project, OutlineError> {
        let missing = || OutlineError::NoOpenProject {
            line: line.number,
            marker: marker.to_string(),
        };
        let (Some(id), Some(idx)) = (self.current_initiative, self.current_project) else {
            return Err(missing());
        };
        self.plan
            .initiative_mut(id)
            .and_then(|initiative| initiative.projects.get_mut(idx))
            .ok_or_else(missing)
    }

    fn current_target_mut(&mut self, line: &Line, marker: &str) -> Result<&mut Target, OutlineError> {
        self.current_project_mut(line, marker)?
            .targets
            .last_mut()
            .ok_or_else(|| OutlineError::NoOpenTarget {
                line: line.number,
                marker: marker.to_string(),
            })
    }

    fn unrecognized(&mut self, line: &Line) {
        if self.options.verbose {
            debug!("Ignoring line {}: {}", line.number, line.original);
            self.diagnostics.push(Diagnostic::UnrecognizedLine {
                line: line.number,
                text: line.original.to_string(),
            });
        }
    }
}

/// Parse a whole document. Stops early at the not-going-to-happen marker.
pub fn parse<I, S>(lines: I, options: &ParseOptions) -> Result<ParsedOutline, OutlineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = OutlineParser::new(options);
    for (idx, raw) in lines.into_iter().enumerate() {
        if parser.feed(idx + 1, raw.as_ref())? == Flow::Stop {
            break;
        }
    }

    let parsed = parser.finish();
    info!(
        "Parsed {} initiatives ({} maintenance projects), {} teams",
        parsed.plan.initiatives.len(),
        parsed
            .plan
            .maintenance
            .as_ref()
            .map(|m| m.projects.len())
            .unwrap_or(0),
        parsed.plan.teams.len()
    );
    Ok(parsed)
}

fn owner_of(line: &Line, declared: &str) -> Result<(String, Option<String>), OutlineError> {
    split_owner(declared).ok_or_else(|| OutlineError::UnclosedBracket {
        line: line.number,
        text: declared.to_string(),
    })
}

fn scoped_priority(
    line: &Line,
    field: ScopedField,
    value: &str,
) -> Result<Option<Priority>, OutlineError> {
    if field != ScopedField::Priority || value.is_empty() {
        return Ok(None);
    }
    Priority::parse(value).map(Some).map_err(|e| match e {
        PriorityParseError::OutOfRange(value) => OutlineError::PriorityOutOfRange {
            line: line.number,
            value,
        },
        PriorityParseError::Invalid(value) => OutlineError::InvalidPriority {
            line: line.number,
            value,
        },
    })
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn push_text(list: &mut Vec<String>, value: &str) {
    if !value.is_empty() {
        list.push(value.to_string());
    }
}

fn is_affirmative(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "yes" | "y" | "true" | "x"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::ledger::NO_TEAM;

    const SAMPLE: &str = include_str!("../../tests/fixtures/plan.txt");

    fn options() -> ParseOptions {
        ParseOptions {
            maintenance_name: "Platform Maintenance".to_string(),
            verbose: false,
        }
    }

    fn parse_str(doc: &str) -> Result<ParsedOutline, OutlineError> {
        parse(doc.lines(), &options())
    }

    #[test]
    fn test_parse_sample_structure() {
        let parsed = parse_str(SAMPLE).unwrap();
        let plan = &parsed.plan;

        assert_eq!(plan.initiatives.len(), 1);
        let search = &plan.initiatives[0];
        assert_eq!(search.name, "Search Quality");
        assert_eq!(search.owner.as_deref(), Some("dana"));
        assert_eq!(search.topline_goals, vec!["Build for Quality"]);
        assert_eq!(search.kpis, vec!["Query latency p95 under 200ms"]);
        assert_eq!(search.projects.len(), 2);

        let indexing = &search.projects[0];
        assert_eq!(indexing.name, "Faster Indexing");
        assert_eq!(indexing.owner.as_deref(), Some("alice"));
        assert_eq!(indexing.when.as_deref(), Some("Q2"));
        assert_eq!(indexing.priority, Priority::Level(8));
        assert_eq!(indexing.drivers, vec!["Latency complaints"]);
        assert_eq!(indexing.notes, vec!["Needs new hardware"]);
        assert_eq!(indexing.targets.len(), 2);

        let shard = &indexing.targets[0];
        assert_eq!(shard.owner.as_deref(), Some("bob"));
        assert_eq!(shard.when.as_deref(), Some("Q1"));
        assert_eq!(shard.bug.as_deref(), Some("1234567"));
        assert_eq!(shard.priority, Priority::NotSet);
        assert_eq!(shard.effective_priority(indexing.priority), Priority::Level(8));
        let resources = shard.resources.as_ref().unwrap();
        assert_eq!(resources.get("PE"), Some(2.0));
        assert_eq!(resources.get("Security"), Some(0.5));

        let hosting = &indexing.targets[1];
        assert_eq!(hosting.priority, Priority::Unknown);
        assert_eq!(hosting.total_resources(), 0.0);

        let ranking = &search.projects[1];
        assert_eq!(ranking.strategic_investment.as_deref(), Some("ML platform"));
        assert!(ranking.owner.is_none());
    }

    #[test]
    fn test_preamble_teams() {
        let plan = parse_str(SAMPLE).unwrap().plan;
        assert_eq!(plan.teams.len(), 2);

        let pe = &plan.teams["PE"];
        assert_eq!(pe.name, "Platform Engineering");
        assert_eq!(pe.headcount(), 15.0);
        assert_eq!(pe.board_member.as_deref(), Some("Platform Engineering Team"));

        let security = &plan.teams["Security"];
        assert_eq!(security.ftes, 4.0);
        assert_eq!(security.reqs, 0.0);
    }

    #[test]
    fn test_maintenance_team_projects_get_max_priority() {
        let plan = parse_str(SAMPLE).unwrap().plan;
        let maintenance = plan.maintenance.as_ref().unwrap();
        assert_eq!(maintenance.name, "Platform Maintenance");
        assert_eq!(maintenance.projects.len(), 1);
        assert_eq!(maintenance.projects[0].name, "Platform Engineering");
        assert_eq!(maintenance.projects[0].priority, Priority::Level(Priority::MAX));
        assert_eq!(
            maintenance.projects[0].targets[0].resources.as_ref().unwrap().get("PE"),
            Some(3.0)
        );
    }

    #[test]
    fn test_maintenance_team_priority_cannot_be_lowered() {
        let doc = "\
* Initiative: Platform Maintenance
   * Team: Ops
      * Priority: 2
      * Target: Patching
         * Priority: 4
   * Project/Deliverable: Migration
      * Priority: 2
";
        let plan = parse_str(doc).unwrap().plan;
        let maintenance = plan.maintenance.as_ref().unwrap();
        let ops = &maintenance.projects[0];
        assert_eq!(ops.priority, Priority::Level(Priority::MAX));
        assert_eq!(ops.targets[0].priority, Priority::Level(4));
        assert_eq!(maintenance.projects[1].priority, Priority::Level(2));
    }

    #[test]
    fn test_team_count_problems_are_diagnostics() {
        let doc = "\
Teams:
   * Current FTEs: 5
* Team: Ops
   * Current FTEs: many
   * Open reqs: 2
* Initiative: Search
";
        let parsed = parse_str(doc).unwrap();
        assert_eq!(
            parsed.diagnostics,
            vec![
                Diagnostic::TeamFieldOutsideTeam {
                    line: 2,
                    text: "* Current FTEs: 5".to_string()
                },
                Diagnostic::InvalidTeamCount {
                    line: 4,
                    team: "Ops".to_string(),
                    value: "many".to_string()
                },
            ]
        );
        let ops = &parsed.plan.teams["Ops"];
        assert_eq!(ops.ftes, 0.0);
        assert_eq!(ops.reqs, 2.0);
    }

    #[test]
    fn test_content_after_sentinel_is_ignored() {
        let plan = parse_str(SAMPLE).unwrap().plan;
        assert!(plan.initiatives.iter().all(|i| i.name != "Moonshot"));
    }

    #[test]
    fn test_sentinel_first_yields_empty_plan() {
        let doc = "\
* Not going to happen
* Initiative: Moonshot
   * Project/Deliverable: Teleporter
      * Target: Prototype
";
        let parsed = parse(doc.lines(), &ParseOptions {
            verbose: true,
            ..options()
        })
        .unwrap();
        assert!(parsed.plan.initiatives.is_empty());
        assert!(parsed.plan.maintenance.is_none());
        assert_eq!(parsed.plan.targets().count(), 0);
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_unclosed_owner_is_fatal() {
        let doc = "\
* Initiative: Search
   * Project/Deliverable: Search Improvements [alice
";
        let err = parse_str(doc).unwrap_err();
        assert_eq!(
            err,
            OutlineError::UnclosedBracket {
                line: 2,
                text: "Search Improvements [alice".to_string()
            }
        );
    }

    #[test]
    fn test_unclosed_team_short_name_is_fatal() {
        let doc = "Teams:\n* Team: Platform Engineering (PE\n";
        assert!(matches!(
            parse_str(doc),
            Err(OutlineError::UnclosedParenthesis { line: 2, .. })
        ));
    }

    #[test]
    fn test_priority_out_of_range_is_fatal() {
        let doc = "\
* Initiative: Search
   * Project/Deliverable: Index
      * Priority: 12
";
        assert_eq!(
            parse_str(doc).unwrap_err(),
            OutlineError::PriorityOutOfRange { line: 3, value: 12 }
        );

        let doc = doc.replace("12", "soon");
        assert!(matches!(
            parse_str(&doc),
            Err(OutlineError::InvalidPriority { line: 3, .. })
        ));
    }

    #[test]
    fn test_indentation_selects_project_or_target() {
        let doc = "\
* Initiative: Search
   * Project/Deliverable: Index
      * Target: Shard
      * When: H2
         * When: Q3
         * Dependencies: Storage
      * Dependencies: Networking
         * Priority: 3
         * Feedback Notes: ask legal
";
        let plan = parse_str(doc).unwrap().plan;
        let project = &plan.initiatives[0].projects[0];
        let target = &project.targets[0];

        assert_eq!(project.when.as_deref(), Some("H2"));
        assert_eq!(project.dependencies, "Networking");
        assert_eq!(project.priority, Priority::NotSet);
        assert_eq!(target.when.as_deref(), Some("Q3"));
        assert_eq!(target.dependencies, "Storage");
        assert_eq!(target.priority, Priority::Level(3));
        assert_eq!(target.notes, vec!["ask legal"]);
    }

    #[test]
    fn test_target_fields() {
        let doc = "\
* Initiative: Search
   * Project/Deliverable: Index
      * Target: Shard
         * Intern eligible: Yes
      * Target: Rebalance
         * Intern eligible: no
";
        let plan = parse_str(doc).unwrap().plan;
        let targets = &plan.initiatives[0].projects[0].targets;
        assert!(targets[0].intern_eligible);
        assert!(!targets[1].intern_eligible);
        assert!(targets[0].resources.is_none());
    }

    #[test]
    fn test_missing_parents_are_fatal() {
        assert!(matches!(
            parse_str("* Project/Deliverable: Orphan\n"),
            Err(OutlineError::NoOpenInitiative { line: 1, .. })
        ));
        assert!(matches!(
            parse_str("* Initiative: Search\n   * Target: Orphan\n"),
            Err(OutlineError::NoOpenProject { line: 2, .. })
        ));
        assert!(matches!(
            parse_str("* Initiative: Search\n   * Project/Deliverable: P\n      * Resources: PE 1\n"),
            Err(OutlineError::NoOpenTarget { line: 3, .. })
        ));
    }

    #[test]
    fn test_explicit_zero_resources() {
        let doc = "\
* Initiative: Search
   * Project/Deliverable: Index
      * Target: Nothing needed
         * Resources: 0
";
        let parsed = parse_str(doc).unwrap();
        assert!(parsed.diagnostics.is_empty());
        let target = &parsed.plan.initiatives[0].projects[0].targets[0];
        assert_eq!(target.resources.as_ref().unwrap().get(NO_TEAM), Some(0.0));
    }

    #[test]
    fn test_resource_problems_are_diagnostics() {
        let doc = "\
* Initiative: Search
   * Project/Deliverable: Index
      * Target: Shard
         * Resources: PE two, Security ?
";
        let parsed = parse_str(doc).unwrap();
        assert_eq!(parsed.diagnostics.len(), 2);
        assert!(parsed.plan.initiatives[0].projects[0].targets[0]
            .resources
            .as_ref()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_teams_header_after_initiative_is_not_a_preamble() {
        let doc = "\
* Initiative: Search
Teams:
* Team: Late (LT)
";
        let plan = parse_str(doc).unwrap().plan;
        assert!(plan.teams.is_empty());
    }

    #[test]
    fn test_verbose_records_unrecognized_lines() {
        let doc = "\
* Initiative: Search
   * Project/Deliverable: Index
      * Status: green
";
        let quiet = parse_str(doc).unwrap();
        assert!(quiet.diagnostics.is_empty());

        let verbose = parse(doc.lines(), &ParseOptions {
            verbose: true,
            ..options()
        })
        .unwrap();
        assert_eq!(
            verbose.diagnostics,
            vec![Diagnostic::UnrecognizedLine {
                line: 3,
                text: "      * Status: green".to_string()
            }]
        );
    }

    #[test]
    fn test_edit_markers_do_not_leak_into_names() {
        let doc = "\
* Initiative: Search[a]
   * Project/Deliverable: Index [carol][b]
";
        let plan = parse_str(doc).unwrap().plan;
        assert_eq!(plan.initiatives[0].name, "Search");
        assert_eq!(plan.initiatives[0].projects[0].owner.as_deref(), Some("carol"));
    }

    #[test]
    fn test_maintenance_reopens_instead_of_replacing() {
        let doc = "\
* Initiative: Platform Maintenance
   * Team: Ops
* Initiative: Search
* Initiative: Platform Maintenance
   * Team: Security
";
        let plan = parse_str(doc).unwrap().plan;
        assert_eq!(plan.initiatives.len(), 1);
        assert_eq!(plan.maintenance.unwrap().projects.len(), 2);
    }

    #[test]
    fn test_team_marker_outside_maintenance_is_not_a_project() {
        let doc = "\
* Initiative: Search
   * Team: Ops
";
        let parsed = parse_str(doc).unwrap();
        assert!(parsed.plan.initiatives[0].projects.is_empty());
    }
}
