//! CSV export of matched listings.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, TimeZone};
use mpscout_core::{ListingRecord, ResultSet, SearchQuery};

/// `{product}_{city}_{YYYYMMDDHHMMSS}.csv`, with path separators replaced.
pub(crate) fn csv_filename<Tz>(product: &str, city: &str, at: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}_{}_{}.csv",
        sanitize(product),
        sanitize(city),
        at.format("%Y%m%d%H%M%S")
    )
}

fn sanitize(part: &str) -> String {
    part.trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}

/// Writes records with a `title,price,location,url` header.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub(crate) fn write_csv<W: std::io::Write>(
    writer: W,
    records: &[ListingRecord],
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record).context("failed to serialize listing")?;
    }
    wtr.flush().context("failed to flush CSV writer")?;
    Ok(())
}

/// Exports `results` into `dir` and returns the written path.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub(crate) fn export_results<Tz>(
    dir: &Path,
    query: &SearchQuery,
    results: &ResultSet,
    at: DateTime<Tz>,
) -> anyhow::Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let path = dir.join(csv_filename(&query.product, &query.city, at));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(file, &results.records)?;
    tracing::info!(path = %path.display(), records = results.len(), "exported results");
    Ok(path)
}
