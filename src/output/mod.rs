mod resources;
mod spreadsheet;
mod summary;
mod tree;

pub use resources::{write_asks, write_prioritized, write_resources, write_teams};
pub use spreadsheet::{write_csv_all, write_csv_projects};
pub use summary::write_export;
pub use tree::write_tree;
