use std::collections::HashMap;
use std::path::PathBuf;

pub fn default_version() -> u32 {
    1
}

pub fn default_input() -> PathBuf {
    let file = PathBuf::from("Downloads").join("2016Initiatives.txt");
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(file),
        None => file,
    }
}

pub fn default_true() -> bool {
    true
}

pub fn default_maintenance_initiative() -> String {
    "Platform Maintenance".to_string()
}

pub fn default_priority_threshold() -> u8 {
    5
}

pub fn default_topline_goals() -> HashMap<String, String> {
    [
        ("Build for Quality", "A. Build for Quality"),
        ("Invite Participation", "B. Invite Participation"),
        (
            "Be Clear, Compelling & Focused",
            "C. Be Clear, Compelling & Focused",
        ),
        ("Grow Our Influence", "D. Grow Our Influence"),
        ("Prototype the Future", "E. Prototype the Future"),
    ]
    .into_iter()
    .map(|(goal, label)| (goal.to_string(), label.to_string()))
    .collect()
}

pub fn default_projects_list() -> String {
    "Programs/Projects".to_string()
}

pub fn default_skip_lists() -> Vec<String> {
    vec![
        "Programs/Projects".to_string(),
        "2017 Platform OKR's".to_string(),
    ]
}

pub fn default_need_priority_label() -> String {
    "Need Priority".to_string()
}

pub fn default_needs_review_label() -> String {
    "Needs Review".to_string()
}

pub fn default_team_suffix() -> String {
    " Team".to_string()
}
