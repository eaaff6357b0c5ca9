pub mod formatter;

pub use formatter::{format_json, format_standings_table, format_tsv, should_use_colors};
