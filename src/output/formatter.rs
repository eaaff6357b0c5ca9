use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::standings::StandingRow;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the leaderboard as an aligned table
/// Columns: position, total, sex, category, races, time/age-grade split, name
/// Position column: 4 chars (fits "999."), right-aligned
/// Total column: 5 chars, right-aligned
pub fn format_standings_table(rows: &[StandingRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No counting results yet.".to_string();
    }

    let term_width = get_terminal_width();
    let position_width = 4;
    let total_width = 5;
    let separator = "  ";

    rows.iter()
        .map(|row| {
            let position_str = format!("{:>width$}", format!("{}.", row.position), width = position_width);
            let total_str = format!("{:>width$}", row.total_score, width = total_width);
            let details = format!(
                "{} {:<6} {:>2} races  {:>3}+{:<3}",
                row.sex.short_label(),
                row.category,
                row.races,
                row.time_score,
                row.age_grade_score
            );

            let fixed_width = position_width + 1 + total_width + separator.len() * 2 + details.len();
            let name = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_name(&row.name, width - fixed_width)
                } else {
                    // Very narrow terminal, show truncated
                    truncate_name(&row.name, 20)
                }
            } else {
                // No terminal (pipe), don't truncate
                row.name.clone()
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    position_str.dimmed(),
                    total_str.bold(),
                    separator,
                    details.cyan(),
                    separator,
                    name
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    position_str, total_str, separator, details, separator, name
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the leaderboard as tab-separated values for scripting
/// Columns: position, name, sex, category, races, time score, age-grade score, total
/// (no headers, no colors)
pub fn format_tsv(rows: &[StandingRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    rows.iter()
        .map(|row| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                row.position,
                row.name,
                row.sex.short_label(),
                row.category,
                row.races,
                row.time_score,
                row.age_grade_score,
                row.total_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the leaderboard as pretty-printed JSON
pub fn format_json(rows: &[StandingRow]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}
