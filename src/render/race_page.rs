use crate::config::Config;
use crate::model::RaceTable;
use crate::parse::format_date;
use crate::scoring::Championship;

use super::html::{self, escape, link, Table};
use super::{
    age_grade_cell, athlete_link, category_of, counting_marker, date_cell, home_link,
    nested_assets, race_page_path, score_cells, time_cell,
};

const COUNTING_CAPTION: &str = "* denotes race contributes to athlete's total score";

/// Results page for one race. Club races carry score columns; 5k and
/// marathon results are only scored on the combined boards.
pub fn render(champs: &Championship, race: &RaceTable, config: &Config) -> String {
    let assets = nested_assets(config);
    let mut body = html::heading(1, &format!("{}, {}", race.name, format_date(race.date)));

    if race.status.is_completed() {
        body.push_str(&html::list([format!("Number of club runners: {}", race.entries.len())]));

        let mut headers = vec!["Athlete", "Sex", "Category", "Time", "Age %"];
        if race.is_club() {
            headers.extend(["Time score", "Age % score", "Race score"]);
        }
        let mut table = Table::new(headers).with_caption(COUNTING_CAPTION);

        for id in race.entries_by_time(champs.store()) {
            let result = champs.result(id);
            let mut cells = vec![
                athlete_link(
                    champs,
                    &assets,
                    &result.athlete,
                    &format!("{}{}", result.athlete, counting_marker(champs, id)),
                ),
                result.sex.short_label().to_string(),
                escape(&category_of(champs, &result.athlete)),
                time_cell(result),
                age_grade_cell(result),
            ];
            if race.is_club() {
                cells.extend(score_cells(result));
            }
            table.push_row(cells);
        }
        body.push_str(&table.render());
    } else {
        body.push_str(&html::paragraph(&format!(
            "Online entries available {}",
            link(&race.source, "here")
        )));
    }

    body.push_str(&home_link(&assets));
    html::document(&race.name, &assets, &body)
}

/// Page for a combined best-5k or best-marathon leaderboard.
pub fn render_combined(champs: &Championship, combined: &RaceTable, config: &Config) -> String {
    let assets = nested_assets(config);
    let title = match &config.season {
        Some(season) => format!("{}, {}", combined.name, season),
        None => combined.name.clone(),
    };
    let mut body = html::heading(1, &title);

    let mut table = Table::new([
        "Athlete",
        "Sex",
        "Category",
        "Race",
        "Date",
        "Time",
        "Age %",
        "Time score",
        "Age % score",
        "Race score",
    ])
    .with_caption(COUNTING_CAPTION);

    for id in combined.entries_by_time(champs.store()) {
        let result = champs.result(id);
        let mut cells = vec![
            athlete_link(
                champs,
                &assets,
                &result.athlete,
                &format!("{}{}", result.athlete, counting_marker(champs, id)),
            ),
            result.sex.short_label().to_string(),
            escape(&category_of(champs, &result.athlete)),
            link(&assets.href(&race_page_path(&result.race_name)), &result.race_name),
            date_cell(result),
            time_cell(result),
            age_grade_cell(result),
        ];
        cells.extend(score_cells(result));
        table.push_row(cells);
    }
    body.push_str(&table.render());

    body.push_str(&home_link(&assets));
    html::document(&combined.name, &assets, &body)
}
