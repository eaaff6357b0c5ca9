use crate::config::Config;
use crate::parse::format_date;
use crate::scoring::Championship;
use crate::standings::overall_standings;

use super::html::{self, escape, link, Table};
use super::{athlete_link, race_page_path, root_assets};

/// Overall leaderboard, club race list and links to the combined boards.
pub fn render(champs: &Championship, config: &Config) -> String {
    let assets = root_assets(config);
    let mut body = String::new();

    body.push_str(&html::heading(1, &config.title));
    body.push_str(&html::heading(2, "Overall leaderboard"));

    let mut table = Table::new([
        "Athlete",
        "Sex",
        "Category",
        "Num. races",
        "Time score",
        "Age % score",
        "Total score",
    ]);
    for row in overall_standings(champs, None) {
        table.push_row(vec![
            athlete_link(champs, &assets, &row.name, &row.name),
            row.sex.short_label().to_string(),
            escape(&row.category),
            row.races.to_string(),
            row.time_score.to_string(),
            row.age_grade_score.to_string(),
            row.total_score.to_string(),
        ]);
    }
    body.push_str(&table.render());

    let club_races = champs.races().iter().filter(|race| race.is_club()).map(|race| {
        let target = if race.status.is_completed() {
            link(&assets.href(&race_page_path(&race.name)), "results")
        } else {
            link(&race.source, "entries")
        };
        format!("{}, {} - {}", escape(&race.name), format_date(race.date), target)
    });
    body.push_str(&html::heading(2, "Club Races"));
    body.push_str(&html::list(club_races));

    body.push_str(&html::heading(2, "Combined Races"));
    body.push_str(&html::list([
        link(
            &assets.href(&race_page_path(&champs.combined_5k().name)),
            "5K leaderboard",
        ),
        link(
            &assets.href(&race_page_path(&champs.combined_marathon().name)),
            "Marathon leaderboard",
        ),
    ]));

    html::document(&config.title, &assets, &body)
}
