use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Priority threshold {0} is above the maximum priority {max}", max = crate::outline::Priority::MAX)]
    ThresholdOutOfRange(u8),

    #[error("Maintenance initiative name must not be empty")]
    EmptyMaintenanceName,
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Planning document not found at '{0}' (nor a staged .tmp copy)")]
    NotFound(PathBuf),

    #[error("Failed to stage '{path}': {source}")]
    Stage {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Structural problems in the outline. Any of these aborts the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OutlineError {
    #[error("line {line}: closing bracket missing in '{text}'")]
    UnclosedBracket { line: usize, text: String },

    #[error("line {line}: closing parenthesis missing in team '{text}'")]
    UnclosedParenthesis { line: usize, text: String },

    #[error("line {line}: priority {value} is outside 0..={max}", max = crate::outline::Priority::MAX)]
    PriorityOutOfRange { line: usize, value: i64 },

    #[error("line {line}: invalid priority '{value}' (expected 0-11 or '?')")]
    InvalidPriority { line: usize, value: String },

    #[error("line {line}: '{marker}' appears before any initiative")]
    NoOpenInitiative { line: usize, marker: String },

    #[error("line {line}: '{marker}' appears outside of any project")]
    NoOpenProject { line: usize, marker: String },

    #[error("line {line}: '{marker}' appears before any target of the current project")]
    NoOpenTarget { line: usize, marker: String },
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write report: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Initiative '{0}' declares no topline goal")]
    MissingToplineGoal(String),

    #[error("Invalid topline goal '{goal}' in initiative '{initiative}'")]
    UnknownToplineGoal { initiative: String, goal: String },
}

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Failed to read board snapshot '{path}': {source}")]
    ReadSnapshot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write board snapshot '{path}': {source}")]
    WriteSnapshot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid board snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Card {0} is not on the board")]
    UnknownCard(String),

    #[error("Label '{0}' is not defined on the board")]
    UnknownLabel(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
