use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Planning document to read
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Move the document to `<input>.tmp` before reading it
    #[serde(default = "default_true")]
    pub stage_input: bool,

    /// Initiative collecting keep-the-lights-on work
    #[serde(default = "default_maintenance_initiative")]
    pub maintenance_initiative: String,

    /// Lowest priority counted in the per-team asks
    #[serde(default = "default_priority_threshold")]
    pub priority_threshold: u8,

    /// Topline goal to the label used in CSV exports
    #[serde(default = "default_topline_goals")]
    pub topline_goals: HashMap<String, String>,

    #[serde(default)]
    pub board: BoardConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct BoardConfig {
    /// List whose cards are the projects other cards link to
    #[serde(default = "default_projects_list")]
    pub projects_list: String,

    /// Lists left out of the card export
    #[serde(default = "default_skip_lists")]
    pub skip_lists: Vec<String>,

    #[serde(default = "default_need_priority_label")]
    pub need_priority_label: String,

    #[serde(default = "default_needs_review_label")]
    pub needs_review_label: String,

    /// Member full names ending with this are teams, not people
    #[serde(default = "default_team_suffix")]
    pub team_suffix: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            projects_list: default_projects_list(),
            skip_lists: default_skip_lists(),
            need_priority_label: default_need_priority_label(),
            needs_review_label: default_needs_review_label(),
            team_suffix: default_team_suffix(),
        }
    }
}
