//! Card-board collaborator: priority export to CSV and priority sync back
//! onto the board

mod export;
mod snapshot;
mod sync;

pub use export::{export_cards, write_card_csv};
pub use snapshot::JsonBoard;
pub use sync::{apply_sync, plan_sync, read_sync_rows};

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Labels carrying the current priority of a card
pub const PRIORITY_LABELS: [&str; 4] = ["P0", "P1", "P2", "P3"];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub id_list: String,
    #[serde(default)]
    pub id_labels: Vec<String>,
    #[serde(default)]
    pub id_members: Vec<String>,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub short_url: String,
    /// Fields this tool does not interpret, kept for round-tripping
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Read and label-edit access to a board of cards
pub trait CardBoard {
    fn cards(&self) -> &[Card];

    fn card(&self, id: &str) -> Option<&Card>;

    fn list_name(&self, list_id: &str) -> Option<&str>;

    fn label_name(&self, label_id: &str) -> Option<&str>;

    fn label_id(&self, name: &str) -> Option<&str>;

    fn member_name(&self, member_id: &str) -> Option<&str>;

    fn add_label(&mut self, card_id: &str, label_id: &str) -> Result<(), BoardError>;

    fn remove_label(&mut self, card_id: &str, label_id: &str) -> Result<(), BoardError>;

    /// Names of the labels on a card, in card order
    fn label_names(&self, card: &Card) -> Vec<String> {
        card.id_labels
            .iter()
            .filter_map(|id| self.label_name(id))
            .map(str::to_string)
            .collect()
    }
}
