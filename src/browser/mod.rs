use std::path::Path;

use anyhow::{Context, Result};

/// Open a generated page in the user's default browser
///
/// # Arguments
/// * `page` - Path to an HTML file written by `build`
///
/// # Errors
/// Returns error if the page does not exist or the browser cannot be opened
pub fn open_page(page: &Path) -> Result<()> {
    let page = page
        .canonicalize()
        .with_context(|| format!("Page not found at {}, run `race-champ build` first", page.display()))?;
    let url = format!("file://{}", page.display());
    webbrowser::open(&url).with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(())
}
