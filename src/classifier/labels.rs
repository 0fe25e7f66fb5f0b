use anyhow::{bail, Result};

/// Fetches the newline-delimited label list. Blocking, done once at startup;
/// an unreachable label file is fatal.
pub fn fetch_labels(url: &str) -> Result<Vec<String>> {
    log::info!("Fetching action labels from {}", url);
    let body = reqwest::blocking::get(url)?.error_for_status()?.text()?;

    let labels = parse_labels(&body);
    if labels.is_empty() {
        bail!("Label file at {} contained no labels", url);
    }
    Ok(labels)
}

/// One label per line, trimmed; blank lines are skipped. Line order defines
/// the label index.
pub fn parse_labels(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
