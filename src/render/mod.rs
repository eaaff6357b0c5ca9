//! Static HTML site for a scored championship.
//!
//! Layout under the output directory:
//! - `index.html`
//! - `races/<slug>_summary.html`, one per race plus the two combined boards
//! - `athletes/<slug>_summary.html`, for athletes with a nonzero total
//! - the stylesheet and filter script, unless already present

pub mod athlete_page;
pub mod html;
pub mod index;
pub mod race_page;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use tracing::{debug, info};

use crate::config::Config;
use crate::model::{AthleteRecord, RaceResult, ResultId};
use crate::parse::{format_date, format_time};
use crate::scoring::Championship;
use html::{escape, link, Assets};

pub const INDEX_PAGE: &str = "index.html";

const DEFAULT_STYLESHEET: &str = include_str!("assets/styles.css");
const DEFAULT_SCRIPT: &str = include_str!("assets/filters.js");

pub use crate::parse::slug;

/// Site-relative path of a race's page.
pub fn race_page_path(race_name: &str) -> String {
    format!("races/{}_summary.html", slug(race_name))
}

/// Site-relative path of an athlete's page.
pub fn athlete_page_path(athlete_name: &str) -> String {
    format!("athletes/{}_summary.html", slug(athlete_name))
}

/// Athletes without points get no page.
pub fn has_page(champs: &Championship, athlete: &AthleteRecord) -> bool {
    athlete.total_score(champs.store()) > 0
}

/// Asset links for a page at the site root.
pub(crate) fn root_assets(config: &Config) -> Assets<'_> {
    Assets {
        root: "",
        stylesheet: &config.stylesheet,
        script: &config.script,
    }
}

/// Asset links for a page one directory below the root.
pub(crate) fn nested_assets(config: &Config) -> Assets<'_> {
    Assets {
        root: "../",
        stylesheet: &config.stylesheet,
        script: &config.script,
    }
}

/// Athlete name linked to their page when they have one.
pub(crate) fn athlete_link(champs: &Championship, assets: &Assets, name: &str, text: &str) -> String {
    match champs.athlete(name) {
        Some(athlete) if has_page(champs, athlete) => {
            link(&assets.href(&athlete_page_path(name)), text)
        }
        _ => escape(text),
    }
}

/// `*` when the result counts toward its athlete's total.
pub(crate) fn counting_marker(champs: &Championship, id: ResultId) -> &'static str {
    if champs.counts(id) {
        "*"
    } else {
        ""
    }
}

pub(crate) fn age_grade_cell(result: &RaceResult) -> String {
    result
        .age_grade_percent
        .map(|pct| format!("{:.2}", pct))
        .unwrap_or_else(|| "-".to_string())
}

pub(crate) fn time_cell(result: &RaceResult) -> String {
    format_time(result.time_secs)
}

pub(crate) fn date_cell(result: &RaceResult) -> String {
    format_date(result.race_date)
}

pub(crate) fn score_cells(result: &RaceResult) -> [String; 3] {
    [
        result.time_score.to_string(),
        result.age_grade_score.to_string(),
        result.total_score().to_string(),
    ]
}

pub(crate) fn category_of(champs: &Championship, athlete_name: &str) -> String {
    champs
        .athlete(athlete_name)
        .map(|athlete| athlete.age_category(champs.as_of()))
        .unwrap_or_default()
}

pub(crate) fn home_link(assets: &Assets) -> String {
    html::paragraph(&format!("<br><br>{}", link(&assets.href(INDEX_PAGE), "Home")))
}

/// Write one page atomically, creating its directory if needed.
fn write_page(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;

    debug!("Wrote {}", path.display());
    Ok(())
}

/// Write the bundled stylesheet and script to their configured paths.
/// Existing files are kept so a site can carry its own, and absolute URLs
/// are left alone.
fn write_assets(config: &Config) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (relative, contents) in [
        (&config.stylesheet, DEFAULT_STYLESHEET),
        (&config.script, DEFAULT_SCRIPT),
    ] {
        if relative.contains("://") || relative.starts_with('/') {
            debug!("Not writing external asset {}", relative);
            continue;
        }
        let path = config.output_dir.join(relative);
        if path.exists() {
            debug!("Keeping existing {}", path.display());
            continue;
        }
        write_page(&path, contents)?;
        written.push(path);
    }
    Ok(written)
}

/// Render every page into `config.output_dir`. Returns the written paths,
/// index first.
pub fn write_site(champs: &Championship, config: &Config) -> Result<Vec<PathBuf>> {
    let out = &config.output_dir;
    let mut pages: Vec<(String, String)> = vec![(INDEX_PAGE.to_string(), index::render(champs, config))];

    for race in champs.races() {
        pages.push((race_page_path(&race.name), race_page::render(champs, race, config)));
    }
    for combined in [champs.combined_5k(), champs.combined_marathon()] {
        pages.push((
            race_page_path(&combined.name),
            race_page::render_combined(champs, combined, config),
        ));
    }
    for athlete in champs.athletes().iter().filter(|a| has_page(champs, a)) {
        pages.push((
            athlete_page_path(&athlete.name),
            athlete_page::render(champs, athlete, config),
        ));
    }

    let mut written = Vec::with_capacity(pages.len());
    for (relative, contents) in pages {
        let path = out.join(relative);
        write_page(&path, &contents)?;
        written.push(path);
    }

    info!("Wrote {} pages to {}", written.len(), out.display());
    for asset in write_assets(config)? {
        info!("Wrote {}", asset.display());
    }
    Ok(written)
}
