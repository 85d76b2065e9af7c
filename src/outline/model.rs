//! Entity graph built by the outline parser: teams, initiatives, projects and targets

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use super::ledger::{self, ResourceMap};
use crate::diagnostic::Diagnostic;

/// Priority of a project or target.
///
/// `NotSet` (no priority line at all) and `Unknown` (an explicit `?`) are
/// distinct: reports filter and group on the exact variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    #[default]
    NotSet,
    Unknown,
    Level(u8),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriorityParseError {
    #[error("priority {0} is out of range")]
    OutOfRange(i64),

    #[error("'{0}' is not a priority")]
    Invalid(String),
}

impl Priority {
    pub const MAX: u8 = 11;

    /// Parse an explicit priority value: an integer in `0..=MAX` or `?`
    pub fn parse(value: &str) -> Result<Self, PriorityParseError> {
        let value = value.trim();
        if value == "?" {
            return Ok(Priority::Unknown);
        }

        let n: i64 = value
            .parse()
            .map_err(|_| PriorityParseError::Invalid(value.to_string()))?;

        match u8::try_from(n) {
            Ok(level) if level <= Self::MAX => Ok(Priority::Level(level)),
            _ => Err(PriorityParseError::OutOfRange(n)),
        }
    }

    pub fn level(self) -> Option<u8> {
        match self {
            Priority::Level(n) => Some(n),
            _ => None,
        }
    }

    /// True only for explicit levels above zero
    pub fn is_positive(self) -> bool {
        matches!(self, Priority::Level(n) if n > 0)
    }

    pub fn is_set(self) -> bool {
        self != Priority::NotSet
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::NotSet => write!(f, "unset"),
            Priority::Unknown => write!(f, "?"),
            Priority::Level(n) => write!(f, "P{}", n),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Split `"Name [owner]"` into name and owner.
///
/// Returns `None` when an owner part is opened but not closed.
pub fn split_owner(declared: &str) -> Option<(String, Option<String>)> {
    match declared.split_once('[') {
        None => Some((declared.trim().to_string(), None)),
        Some((name, rest)) => {
            let rest = rest.trim_end();
            let owner = rest.strip_suffix(']')?;
            Some((name.trim().to_string(), Some(owner.trim().to_string())))
        }
    }
}

/// Split `"Team Name (SHORT)"` into full name and short identifier.
///
/// The short identifier falls back to the full name. Returns `None` when the
/// parenthesis is not closed.
pub fn split_short_name(declared: &str) -> Option<(String, String)> {
    match declared.split_once('(') {
        None => {
            let name = declared.trim().to_string();
            Some((name.clone(), name))
        }
        Some((name, rest)) => {
            let short = rest.trim_end().strip_suffix(')')?;
            Some((name.trim().to_string(), short.trim().to_string()))
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Team {
    pub name: String,
    pub short: String,
    pub ftes: f64,
    pub contractors: f64,
    pub reqs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_member: Option<String>,
}

impl Team {
    pub fn new(name: String, short: String) -> Self {
        Self {
            name,
            short,
            ..Default::default()
        }
    }

    pub fn headcount(&self) -> f64 {
        self.ftes + self.contractors + self.reqs
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Initiative {
    pub name: String,
    pub owner: Option<String>,
    pub topline_goals: Vec<String>,
    pub kpis: Vec<String>,
    pub projects: Vec<Project>,
}

impl Initiative {
    pub fn new(name: String, owner: Option<String>) -> Self {
        Self {
            name,
            owner,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Project {
    pub name: String,
    pub owner: Option<String>,
    pub when: Option<String>,
    pub dependencies: String,
    pub drivers: Vec<String>,
    pub notes: Vec<String>,
    pub targets: Vec<Target>,
    /// Roll-up filled in by aggregation
    pub resources: ResourceMap,
    pub total_resources: f64,
    pub priority: Priority,
    pub strategic_investment: Option<String>,
}

impl Project {
    pub fn new(name: String, owner: Option<String>) -> Self {
        Self {
            name,
            owner,
            ..Default::default()
        }
    }

    pub fn is_strategic(&self) -> bool {
        self.strategic_investment.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Target {
    pub name: String,
    pub owner: Option<String>,
    pub when: Option<String>,
    pub dependencies: String,
    pub notes: Vec<String>,
    /// `None` when the target has no resource declaration line at all
    pub resources: Option<ResourceMap>,
    pub priority: Priority,
    pub intern_eligible: bool,
    pub bug: Option<String>,
}

impl Target {
    pub fn new(name: String, owner: Option<String>) -> Self {
        Self {
            name,
            owner,
            ..Default::default()
        }
    }

    /// Fold one resource declaration into this target's mapping
    pub fn add_resources(&mut self, declaration: &str) -> Vec<Diagnostic> {
        let parsed = ledger::parse_declaration(declaration);
        let resources = self.resources.get_or_insert_with(ResourceMap::default);

        for (team, amount) in parsed.allocations {
            resources.add(&team, amount);
        }

        let tbd = parsed.tbd.into_iter().map(|team| Diagnostic::ResourcingTbd {
            target: self.name.clone(),
            team,
        });
        let invalid = parsed
            .errors
            .into_iter()
            .map(|error| Diagnostic::InvalidResourceFragment {
                target: self.name.clone(),
                error,
            });
        tbd.chain(invalid).collect()
    }

    /// Headcount-only total: excludes monetary and empty team keys
    pub fn total_resources(&self) -> f64 {
        self.resources
            .as_ref()
            .map(ResourceMap::headcount_total)
            .unwrap_or(0.0)
    }

    /// Own priority when set (including an explicit `?`), else the project's
    pub fn effective_priority(&self, project_priority: Priority) -> Priority {
        if self.priority.is_set() {
            self.priority
        } else {
            project_priority
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InitiativeId {
    Ordinary(usize),
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TargetId {
    pub initiative: InitiativeId,
    pub project: usize,
    pub target: usize,
}

/// A target together with its owning project and initiative
#[derive(Debug, Clone, Copy)]
pub struct TargetRef<'a> {
    pub id: TargetId,
    pub initiative: &'a Initiative,
    pub project: &'a Project,
    pub target: &'a Target,
}

impl TargetRef<'_> {
    pub fn effective_priority(&self) -> Priority {
        self.target.effective_priority(self.project.priority)
    }
}

/// The complete parsed outline
#[derive(Debug, Clone, Default, Serialize)]
pub struct Plan {
    pub initiatives: Vec<Initiative>,
    pub maintenance: Option<Initiative>,
    /// Teams keyed by short identifier, in declaration order
    pub teams: IndexMap<String, Team>,
}

impl Plan {
    pub fn initiative(&self, id: InitiativeId) -> Option<&Initiative> {
        match id {
            InitiativeId::Ordinary(idx) => self.initiatives.get(idx),
            InitiativeId::Maintenance => self.maintenance.as_ref(),
        }
    }

    pub fn initiative_mut(&mut self, id: InitiativeId) -> Option<&mut Initiative> {
        match id {
            InitiativeId::Ordinary(idx) => self.initiatives.get_mut(idx),
            InitiativeId::Maintenance => self.maintenance.as_mut(),
        }
    }

    /// Ordinary initiatives in document order, then maintenance
    pub fn initiative_ids(&self) -> impl Iterator<Item = InitiativeId> {
        let maintenance = self.maintenance.as_ref().map(|_| InitiativeId::Maintenance);
        (0..self.initiatives.len())
            .map(InitiativeId::Ordinary)
            .chain(maintenance)
    }

    pub fn all_initiatives(&self) -> impl Iterator<Item = (InitiativeId, &Initiative)> {
        self.initiative_ids()
            .filter_map(move |id| self.initiative(id).map(|i| (id, i)))
    }

    /// Every target of every initiative, maintenance last
    pub fn targets(&self) -> impl Iterator<Item = TargetRef<'_>> {
        self.all_initiatives().flat_map(|(initiative_id, initiative)| {
            initiative
                .projects
                .iter()
                .enumerate()
                .flat_map(move |(p, project)| {
                    project.targets.iter().enumerate().map(move |(t, target)| TargetRef {
                        id: TargetId {
                            initiative: initiative_id,
                            project: p,
                            target: t,
                        },
                        initiative,
                        project,
                        target,
                    })
                })
        })
    }

    pub fn target(&self, id: TargetId) -> Option<TargetRef<'_>> {
        let initiative = self.initiative(id.initiative)?;
        let project = initiative.projects.get(id.project)?;
        let target = project.targets.get(id.target)?;
        Some(TargetRef {
            id,
            initiative,
            project,
            target,
        })
    }
}
