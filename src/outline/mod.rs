//! Planning outline: line preprocessing, entity graph, resource ledger and parser

pub mod ledger;
pub mod line;
pub mod model;
pub mod parser;

pub use ledger::{is_monetary, FragmentError, ResourceMap, MONETARY_TAG, NO_TEAM};
pub use model::{Initiative, InitiativeId, Plan, Priority, TargetId};
pub use parser::{parse, ParseOptions};
