//! Board JSON snapshot as a local stand-in for the remote board

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::{Card, CardBoard};
use crate::error::BoardError;

#[derive(Debug, Clone, Deserialize, Serialize)]
struct Named {
    id: String,
    name: String,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct Member {
    id: String,
    full_name: String,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JsonBoard {
    #[serde(default)]
    lists: Vec<Named>,
    #[serde(default)]
    labels: Vec<Named>,
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    cards: Vec<Card>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl JsonBoard {
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let content = fs::read_to_string(path).map_err(|e| BoardError::ReadSnapshot {
            path: path.to_path_buf(),
            source: e,
        })?;
        let board = Self::from_json(&content)?;
        debug!(
            "Loaded board snapshot {} with {} cards",
            path.display(),
            board.cards.len()
        );
        Ok(board)
    }

    pub fn save(&self, path: &Path) -> Result<(), BoardError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| BoardError::WriteSnapshot {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn card_mut(&mut self, id: &str) -> Result<&mut Card, BoardError> {
        self.cards
            .iter_mut()
            .find(|card| card.id == id)
            .ok_or_else(|| BoardError::UnknownCard(id.to_string()))
    }
}

impl CardBoard for JsonBoard {
    fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    fn list_name(&self, list_id: &str) -> Option<&str> {
        find_name(&self.lists, list_id)
    }

    fn label_name(&self, label_id: &str) -> Option<&str> {
        find_name(&self.labels, label_id)
    }

    fn label_id(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.name == name)
            .map(|label| label.id.as_str())
    }

    fn member_name(&self, member_id: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|member| member.id == member_id)
            .map(|member| member.full_name.as_str())
    }

    fn add_label(&mut self, card_id: &str, label_id: &str) -> Result<(), BoardError> {
        let card = self.card_mut(card_id)?;
        if !card.id_labels.iter().any(|id| id == label_id) {
            card.id_labels.push(label_id.to_string());
        }
        Ok(())
    }

    fn remove_label(&mut self, card_id: &str, label_id: &str) -> Result<(), BoardError> {
        let card = self.card_mut(card_id)?;
        card.id_labels.retain(|id| id != label_id);
        Ok(())
    }
}

fn find_name<'a>(items: &'a [Named], id: &str) -> Option<&'a str> {
    items
        .iter()
        .find(|item| item.id == id)
        .map(|item| item.name.as_str())
}
