//! Output renderers for extracted announcement lists.

pub mod feed;
pub mod table;

pub use feed::{latest_seen, latest_seen_in_file, render_feed};
pub use table::render_table;
