//! Push priorities from an edited card CSV back onto the board

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, info, warn};

use super::{CardBoard, PRIORITY_LABELS};
use crate::config::BoardConfig;
use crate::error::BoardError;

/// The columns of an exported card CSV that sync reads
#[derive(Debug, Clone, Deserialize)]
pub struct SyncRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "New Priority", default)]
    pub new_priority: String,
    #[serde(rename = "id")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    AddLabel {
        card_id: String,
        card: String,
        label: String,
    },
    RemoveLabel {
        card_id: String,
        card: String,
        label: String,
    },
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncAction::AddLabel { card, label, .. } => {
                write!(f, "Adding label {} to card {}", label, card)
            }
            SyncAction::RemoveLabel { card, label, .. } => {
                write!(f, "Removing label {} from card {}", label, card)
            }
        }
    }
}

pub fn read_sync_rows(reader: impl Read) -> Result<Vec<SyncRow>, BoardError> {
    let mut reader = csv::Reader::from_reader(reader);
    let rows = reader.deserialize().collect::<Result<Vec<SyncRow>, _>>()?;
    Ok(rows)
}

/// Work out the label edits that bring every listed card to its new priority.
///
/// Label state is tracked across rows, so a card listed twice is planned
/// against the edits of its earlier rows.
pub fn plan_sync(board: &impl CardBoard, rows: &[SyncRow], config: &BoardConfig) -> Vec<SyncAction> {
    let mut labels_by_card: HashMap<&str, Vec<String>> = HashMap::new();
    let mut actions = Vec::new();

    for row in rows {
        let Some(card) = board.card(&row.id) else {
            warn!("Card {} ({}) missing from board, skipping", row.title, row.id);
            continue;
        };

        let priority = format!("P{}", row.new_priority.trim());
        if !PRIORITY_LABELS.contains(&priority.as_str()) {
            debug!("No usable priority for card {}", card.name);
            continue;
        }

        let labels = labels_by_card
            .entry(card.id.as_str())
            .or_insert_with(|| board.label_names(card));

        let mut edit = |labels: &mut Vec<String>, action: SyncAction| {
            match &action {
                SyncAction::AddLabel { label, .. } => labels.push(label.clone()),
                SyncAction::RemoveLabel { label, .. } => labels.retain(|l| l != label),
            }
            actions.push(action);
        };

        if !labels.contains(&priority) {
            let stale: Vec<String> = labels
                .iter()
                .filter(|l| PRIORITY_LABELS.contains(&l.as_str()))
                .cloned()
                .collect();
            for label in stale {
                edit(
                    labels,
                    SyncAction::RemoveLabel {
                        card_id: card.id.clone(),
                        card: card.name.clone(),
                        label,
                    },
                );
            }
            edit(
                labels,
                SyncAction::AddLabel {
                    card_id: card.id.clone(),
                    card: card.name.clone(),
                    label: priority,
                },
            );
        }

        if labels.contains(&config.need_priority_label) {
            let prioritized = labels
                .iter()
                .any(|l| PRIORITY_LABELS.contains(&l.as_str()));
            if prioritized {
                edit(
                    labels,
                    SyncAction::RemoveLabel {
                        card_id: card.id.clone(),
                        card: card.name.clone(),
                        label: config.need_priority_label.clone(),
                    },
                );
            } else {
                debug!("Not removing {} from card {}", config.need_priority_label, card.name);
            }
        }
    }

    actions
}

/// Apply planned edits, returning how many were applied
pub fn apply_sync(board: &mut impl CardBoard, actions: &[SyncAction]) -> Result<usize, BoardError> {
    for action in actions {
        info!("{}", action);
        match action {
            SyncAction::AddLabel { card_id, label, .. } => {
                let label_id = resolve_label(board, label)?;
                board.add_label(card_id, &label_id)?;
            }
            SyncAction::RemoveLabel { card_id, label, .. } => {
                let label_id = resolve_label(board, label)?;
                board.remove_label(card_id, &label_id)?;
            }
        }
    }
    Ok(actions.len())
}

fn resolve_label(board: &impl CardBoard, name: &str) -> Result<String, BoardError> {
    board
        .label_id(name)
        .map(str::to_string)
        .ok_or_else(|| BoardError::UnknownLabel(name.to_string()))
}
