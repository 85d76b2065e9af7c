//! Recoverable data-quality findings collected while parsing and aggregating.
//!
//! Diagnostics never change control flow: the plan is always fully built and
//! every report still runs.

use serde::Serialize;
use tracing::{info, warn};

use crate::outline::FragmentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Only recorded when verbose diagnostics are requested
    UnrecognizedLine { line: usize, text: String },
    TeamFieldOutsideTeam { line: usize, text: String },
    InvalidTeamCount {
        line: usize,
        team: String,
        value: String,
    },
    ResourcingTbd { target: String, team: String },
    InvalidResourceFragment { target: String, error: FragmentError },
    MissingOwner { initiative: String, project: String },
    MissingResources { project: String, target: String },
    EmptyTeamKey { project: String, target: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::UnrecognizedLine { .. } | Diagnostic::ResourcingTbd { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }

    /// Emit through tracing at the level matching the severity
    pub fn log(&self) {
        match self.severity() {
            Severity::Info => info!("{}", self),
            Severity::Warning => warn!("{}", self),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnrecognizedLine { line, text } => {
                write!(f, "Ignored line {}: {}", line, text)
            }
            Diagnostic::TeamFieldOutsideTeam { line, text } => {
                write!(f, "Team field before any team on line {}: {}", line, text)
            }
            Diagnostic::InvalidTeamCount { line, team, value } => write!(
                f,
                "Invalid count '{}' for team {} on line {}",
                value, team, line
            ),
            Diagnostic::ResourcingTbd { target, team } => {
                write!(f, "Resourcing in {} TBD for {}", team, target)
            }
            Diagnostic::InvalidResourceFragment { target, error } => {
                write!(f, "Invalid resource declaration in target {}: {}", target, error)
            }
            Diagnostic::MissingOwner {
                initiative,
                project,
            } => write!(f, "Missing owner for project {} ({})", project, initiative),
            Diagnostic::MissingResources { project, target } => {
                write!(f, "Resource declaration missing from {}, {}", project, target)
            }
            Diagnostic::EmptyTeamKey { project, target } => {
                write!(f, "Missing team name for target {} ({})", target, project)
            }
        }
    }
}

/// Number of warning-level diagnostics
pub fn warning_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics
        .iter()
        .filter(|d| d.severity() == Severity::Warning)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_split() {
        let diagnostics = vec![
            Diagnostic::ResourcingTbd {
                target: "Crawler".to_string(),
                team: "eng".to_string(),
            },
            Diagnostic::MissingResources {
                project: "Index".to_string(),
                target: "Crawler".to_string(),
            },
        ];
        assert_eq!(warning_count(&diagnostics), 1);
        assert_eq!(
            diagnostics[0].to_string(),
            "Resourcing in eng TBD for Crawler"
        );
    }
}
