//! Offline enrichment of a dataset file with postcode coordinates.

use std::path::Path;

use bizdir_core::AppConfig;
use bizdir_source::{raw_has_coordinates, GeoClient, RawBusiness};

/// Reads a JSON array of businesses from `input`, geocodes every row
/// missing coordinates and writes the rows to `output`.
///
/// Rows are written back as they were read apart from the added `lat`/`lng`
/// keys: none are dropped, re-keyed or renamed.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, the geocoder
/// client cannot be built, or the output cannot be written. Individual
/// lookup failures only leave that row without coordinates.
pub(crate) async fn run_geocode(
    config: &AppConfig,
    input: &Path,
    output: &Path,
) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(input)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", input.display()))?;
    let mut rows: Vec<RawBusiness> = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("{} is not a JSON array of objects: {e}", input.display()))?;

    let missing = rows.iter().filter(|r| !raw_has_coordinates(r)).count();
    tracing::info!(total = rows.len(), missing, "geocoding dataset");

    let geo = GeoClient::new(
        &config.geocoder_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build geocoder client: {e}"))?;
    let updated = geo.geocode_rows(&mut rows, config.geocode_delay_ms).await;

    let json = serde_json::to_string_pretty(&rows)?;
    tokio::fs::write(output, json)
        .await
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", output.display()))?;

    tracing::info!(updated, output = %output.display(), "geocoded dataset written");
    println!(
        "geocoded {updated} of {missing} rows missing coordinates; wrote {}",
        output.display()
    );
    Ok(())
}
