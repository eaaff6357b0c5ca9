use crate::config::Config;
use crate::model::{AthleteRecord, BestResult, ResultId};
use crate::scoring::Championship;
use crate::standings::{format_position, positions};

use super::html::{self, link, Assets, Table};
use super::{
    age_grade_cell, counting_marker, date_cell, home_link, nested_assets, race_page_path,
    score_cells, time_cell,
};

const COUNTING_CAPTION: &str = "* denotes race contributes to athlete's total score";

/// Summary page for one athlete: positions, club races with the two
/// combined bests and totals, then 5k and marathon history.
pub fn render(champs: &Championship, athlete: &AthleteRecord, config: &Config) -> String {
    let assets = nested_assets(config);
    let store = champs.store();
    let positions = positions(champs, athlete);

    let mut body = html::heading(1, &athlete.name);
    body.push_str(&html::list([
        format!(
            "Category: {} {}",
            html::escape(&athlete.age_category(champs.as_of())),
            athlete.sex.label()
        ),
        format!("Total score: {}", athlete.total_score(store)),
        format!("Overall position: {}", format_position(positions.overall)),
        format!("Sex position: {}", format_position(positions.sex)),
        format!("Category position: {}", format_position(positions.category)),
    ]));

    body.push_str(&html::heading(2, "Club races"));
    body.push_str(&club_table(champs, athlete, &assets));

    let combined_5k = assets.href(&race_page_path(&champs.combined_5k().name));
    let five_ks = athlete.five_k_results(store);
    body.push_str(&html::heading(2, "5k races"));
    if !five_ks.is_empty() {
        body.push_str(&not_scored_note("5k races", &link(&combined_5k, "best 5k leaderboard")));
    }
    body.push_str(&history_table(champs, &five_ks, &assets));

    let combined_marathon = assets.href(&race_page_path(&champs.combined_marathon().name));
    let marathons = athlete.marathon_results(store);
    body.push_str(&html::heading(2, "Marathons"));
    if !marathons.is_empty() {
        body.push_str(&not_scored_note(
            "Marathons",
            &link(&combined_marathon, "best marathon leaderboard"),
        ));
    }
    body.push_str(&history_table(champs, &marathons, &assets));

    body.push_str(&home_link(&assets));
    html::document(&athlete.name, &assets, &body)
}

fn not_scored_note(what: &str, board_link: &str) -> String {
    html::paragraph(&format!(
        "{} are not scored individually. Instead, your fastest time contributes to the {}, \
         which is then scored as if it were a single race.",
        what, board_link
    ))
}

fn race_cells(champs: &Championship, id: ResultId, label: &str, href: &str) -> Vec<String> {
    let result = champs.result(id);
    vec![
        link(href, &format!("{}{}", label, counting_marker(champs, id))),
        date_cell(result),
        time_cell(result),
        age_grade_cell(result),
    ]
}

/// Every club result, then the best 5k and marathon rows and a totals row.
fn club_table(champs: &Championship, athlete: &AthleteRecord, assets: &Assets) -> String {
    let store = champs.store();
    let club = athlete.nominated_results(store);
    let bests = [
        (athlete.best_5k, "Best 5k", &champs.combined_5k().name),
        (athlete.best_marathon, "Marathon", &champs.combined_marathon().name),
    ];
    if club.is_empty() && !bests.iter().any(|(best, _, _)| best.is_present()) {
        return html::paragraph("None");
    }

    let mut table = Table::new([
        "Race",
        "Date",
        "Time",
        "Age %",
        "Time score",
        "Age % score",
        "Race score",
    ])
    .with_caption(COUNTING_CAPTION);

    for id in club {
        let race_name = &champs.result(id).race_name;
        let mut cells = race_cells(champs, id, race_name, &assets.href(&race_page_path(race_name)));
        cells.extend(score_cells(champs.result(id)));
        table.push_row(cells);
    }
    for (best, label, board) in bests {
        if let BestResult::Present(id) = best {
            let mut cells = race_cells(champs, id, label, &assets.href(&race_page_path(board)));
            cells.extend(score_cells(champs.result(id)));
            table.push_row(cells);
        }
    }
    table.push_row(vec![
        "<b>Totals</b>".to_string(),
        String::new(),
        String::new(),
        String::new(),
        athlete.time_score(store).to_string(),
        athlete.age_grade_score(store).to_string(),
        athlete.total_score(store).to_string(),
    ]);

    table.render()
}

/// Unscored 5k or marathon history.
fn history_table(champs: &Championship, results: &[ResultId], assets: &Assets) -> String {
    if results.is_empty() {
        return html::paragraph("None");
    }

    let mut table = Table::new(["Race", "Date", "Time", "Age %"]).with_caption(COUNTING_CAPTION);
    for &id in results {
        let race_name = &champs.result(id).race_name;
        table.push_row(race_cells(champs, id, race_name, &assets.href(&race_page_path(race_name))));
    }
    table.render()
}
