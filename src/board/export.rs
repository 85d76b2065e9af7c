//! Card export: one CSV row per card with its priority labels, project,
//! owners and declared resource needs

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::Write;
use tracing::warn;

use super::{Card, CardBoard};
use crate::config::BoardConfig;
use crate::error::BoardError;

const PROJECT_MARKERS: [&str; 2] = ["Project: ", "Projects: "];
const RESOURCE_MARKER: &str = "Resource needs (in 1/2 person years): ";
const OLD_PRIORITY_LEVELS: u8 = 12;
const NEW_PRIORITY_LEVELS: u8 = 4;

const HEADER: [&str; 11] = [
    "Title",
    "Project",
    "List Name",
    "Labels",
    "Old Priority",
    "New Priority",
    "Needs Priority",
    "Needs Review",
    "Team",
    "Responsible",
    "id",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardRow {
    pub title: String,
    pub project: Option<String>,
    pub list_name: String,
    /// Remaining labels once priority labels are pulled out
    pub labels: Vec<String>,
    pub old_priority: Option<u8>,
    pub new_priority: Option<u8>,
    pub needs_priority: bool,
    pub needs_review: bool,
    pub team: Option<String>,
    pub responsible: Vec<String>,
    pub id: String,
    pub resources: BTreeMap<String, f64>,
}

#[derive(Debug, PartialEq)]
enum ResourceNeeds {
    Absent,
    Declared(BTreeMap<String, f64>),
    Malformed(String),
}

/// Build export rows for every card outside the skipped lists
pub fn export_cards(board: &impl CardBoard, config: &BoardConfig) -> Vec<CardRow> {
    let project_urls: HashMap<&str, &str> = board
        .cards()
        .iter()
        .filter(|card| board.list_name(&card.id_list) == Some(config.projects_list.as_str()))
        .map(|card| (card.short_url.as_str(), card.name.as_str()))
        .collect();

    let mut rows = Vec::new();

    for card in board.cards() {
        let Some(list_name) = board.list_name(&card.id_list) else {
            continue;
        };
        if config.skip_lists.iter().any(|skipped| skipped == list_name) {
            continue;
        }

        let resources = match resource_needs(card) {
            ResourceNeeds::Absent => BTreeMap::new(),
            ResourceNeeds::Declared(resources) => resources,
            ResourceNeeds::Malformed(declared) => {
                warn!(
                    "Invalid resource declaration '{}' in card {}",
                    declared, card.name
                );
                continue;
            }
        };

        let mut labels = board.label_names(card);
        let needs_priority = labels.contains(&config.need_priority_label);
        let needs_review = labels.contains(&config.needs_review_label);
        let old_priority = take_priority_label(&mut labels, "Old-P", OLD_PRIORITY_LEVELS);
        let new_priority = take_priority_label(&mut labels, "P", NEW_PRIORITY_LEVELS);

        let project = project_url(&card.desc)
            .and_then(|url| project_urls.get(url))
            .map(|name| name.to_string());

        let mut team = None;
        let mut responsible = Vec::new();
        for name in card.id_members.iter().filter_map(|id| board.member_name(id)) {
            if name.ends_with(&config.team_suffix) {
                team = Some(name.to_string());
            } else {
                responsible.push(name.to_string());
            }
        }

        rows.push(CardRow {
            title: card.name.clone(),
            project,
            list_name: list_name.to_string(),
            labels,
            old_priority,
            new_priority,
            needs_priority,
            needs_review,
            team,
            responsible,
            id: card.id.clone(),
            resources,
        });
    }

    rows
}

/// Header row, then one row per card with a `res-<name>` column for every
/// resource name seen on any card
pub fn write_card_csv(out: &mut impl Write, rows: &[CardRow]) -> Result<(), BoardError> {
    let resource_names: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.resources.keys().map(String::as_str))
        .collect();

    let mut writer = csv::Writer::from_writer(out);

    let header = HEADER
        .iter()
        .map(|column| column.to_string())
        .chain(resource_names.iter().map(|name| format!("res-{}", name)));
    writer.write_record(header)?;

    for row in rows {
        let fields = [
            row.title.clone(),
            row.project.clone().unwrap_or_default(),
            row.list_name.clone(),
            row.labels.join(", "),
            optional_number(row.old_priority),
            optional_number(row.new_priority),
            flag(row.needs_priority),
            flag(row.needs_review),
            row.team.clone().unwrap_or_default(),
            row.responsible.join(", "),
            row.id.clone(),
        ];
        let resources = resource_names.iter().map(|name| match row.resources.get(*name) {
            Some(amount) if *amount != 0.0 => amount.to_string(),
            _ => String::new(),
        });
        writer.write_record(fields.into_iter().chain(resources))?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Remove the lowest-numbered `<prefix><n>` label below `levels` and return n
fn take_priority_label(labels: &mut Vec<String>, prefix: &str, levels: u8) -> Option<u8> {
    (0..levels).find_map(|level| {
        let label = format!("{}{}", prefix, level);
        let idx = labels.iter().position(|l| *l == label)?;
        labels.remove(idx);
        Some(level)
    })
}

fn project_url(desc: &str) -> Option<&str> {
    PROJECT_MARKERS.iter().find_map(|marker| {
        let (_, rest) = desc.split_once(marker)?;
        rest.lines().next()
    })
}

/// Parse `(<total> {json})` after the resource marker. Single quotes are
/// accepted in place of double quotes.
fn resource_needs(card: &Card) -> ResourceNeeds {
    let Some((_, rest)) = card.desc.split_once(RESOURCE_MARKER) else {
        return ResourceNeeds::Absent;
    };
    let declared = rest.lines().next().unwrap_or("").trim().replace('\'', "\"");
    if declared.is_empty() {
        return ResourceNeeds::Absent;
    }

    let Some(inner) = declared
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
    else {
        return ResourceNeeds::Malformed(declared);
    };
    let Some((total, json)) = inner.split_once(' ') else {
        return ResourceNeeds::Malformed(declared);
    };

    let Ok(total) = total.parse::<f64>() else {
        return ResourceNeeds::Malformed(declared);
    };
    let Ok(resources) = serde_json::from_str::<BTreeMap<String, f64>>(json) else {
        return ResourceNeeds::Malformed(declared);
    };

    let sum: f64 = resources.values().sum();
    if sum != total {
        warn!(
            "Total ({:.2}) does not match sum ({:.2}) in card {}",
            total, sum, card.name
        );
    }

    ResourceNeeds::Declared(resources)
}

fn optional_number(value: Option<u8>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

fn flag(set: bool) -> String {
    let mark = if set { "x" } else { "" };
    mark.to_string()
}
