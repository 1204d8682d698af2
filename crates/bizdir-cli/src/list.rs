//! Listing command handlers: drive a `ListingController` over the
//! provider's dataset and print the visible page.

use bizdir_core::{AppConfig, BusinessRecord, SortOption};
use bizdir_listing::{
    cuisine_info, star_count, ListingController, PageRecorder, SessionPageStore,
};
use bizdir_source::SourceProvider;

/// Parameters for one `list` invocation.
#[derive(Debug)]
pub(crate) struct ListOptions {
    pub search: String,
    pub min_rating: Option<f64>,
    pub sort: SortOption,
    pub page: usize,
    pub width: u32,
}

/// Load the directory, apply the listing parameters and print one page.
///
/// # Errors
///
/// Returns an error only if the HTTP client cannot be constructed; an
/// unreachable API falls back to the bundled dataset.
pub(crate) async fn run_list(config: &AppConfig, options: ListOptions) -> anyhow::Result<()> {
    let provider = SourceProvider::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build directory client: {e}"))?;

    let mut listing = ListingController::with_recorder(options.width, SessionPageStore::new());
    listing.initialize(&provider, options.min_rating).await;
    listing.set_search_term(options.search);
    listing.set_sort_option(options.sort);

    if options.page != 1 && !listing.go_to_page(options.page) {
        tracing::warn!(
            requested = options.page,
            total_pages = listing.total_pages(),
            "page out of range; showing page 1"
        );
    }

    print!("{}", render_page(&listing));
    Ok(())
}

/// Print a single business as pretty JSON.
///
/// # Errors
///
/// Returns an error if the client cannot be built or no business has `id`.
pub(crate) async fn run_show(config: &AppConfig, id: &str) -> anyhow::Result<()> {
    let provider = SourceProvider::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build directory client: {e}"))?;
    provider.load().await;

    let record = provider.find(id).ok_or_else(|| {
        anyhow::anyhow!("business '{id}' not found (source: {})", provider.source())
    })?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Print directory-wide counts.
///
/// # Errors
///
/// Returns an error if the stats endpoint cannot be reached or parsed; stats
/// have no offline fallback.
pub(crate) async fn run_stats(config: &AppConfig) -> anyhow::Result<()> {
    let provider = SourceProvider::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build directory client: {e}"))?;
    let stats = provider
        .stats()
        .await
        .map_err(|e| anyhow::anyhow!("failed to fetch directory stats: {e}"))?;

    println!("restaurants: {}", stats.restaurants_count);
    println!("reviews:     {}", stats.reviews_count);
    match stats.average_rating {
        Some(avg) => println!("avg rating:  {avg:.2}"),
        None => println!("avg rating:  n/a"),
    }
    Ok(())
}

pub(crate) fn render_page<R: PageRecorder>(listing: &ListingController<R>) -> String {
    let mut out = format!(
        "[{}] {} of {} businesses, page {}/{}\n",
        listing.source(),
        listing.filtered_list().len(),
        listing.raw_list().len(),
        listing.page(),
        listing.total_pages(),
    );

    if listing.visible_page().is_empty() {
        out.push_str("  no businesses match\n");
        return out;
    }

    for record in listing.visible_page() {
        out.push_str(&render_card(record));
    }
    out
}

fn render_card(record: &BusinessRecord) -> String {
    let stars = usize::from(star_count(record));
    let info = cuisine_info(&record.cuisine);
    let rating = record
        .hygiene_rating
        .map_or_else(|| "unrated".to_string(), |r| format!("{r}"));

    let location = [record.address.as_str(), record.postcode.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "  {icon} {name} [{id}]\n      {filled}{empty} ({rating})  {location}\n      {desc}\n",
        icon = info.icon,
        name = record.name,
        id = record.id,
        filled = "★".repeat(stars),
        empty = "☆".repeat(5 - stars),
        desc = info.description,
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bizdir_core::{DataSource, Dataset};

    use super::*;

    #[test]
    fn render_card_shows_stars_location_and_cuisine() {
        let mut record = BusinessRecord::new("b001", "Mama Pizza").with_rating(4.0);
        record.address = "12 Botanic Avenue".to_owned();
        record.postcode = "BT7 1JQ".to_owned();
        record.cuisine = "Italian".to_owned();

        let card = render_card(&record);
        assert!(card.contains("🍕 Mama Pizza [b001]"));
        assert!(card.contains("★★★★☆ (4)"));
        assert!(card.contains("12 Botanic Avenue, BT7 1JQ"));
        assert!(card.contains("classic pastas"));
    }

    #[test]
    fn render_card_unrated() {
        let card = render_card(&BusinessRecord::new("x", "Pop-up"));
        assert!(card.contains("☆☆☆☆☆ (unrated)"));
    }

    #[test]
    fn render_page_reports_source_and_position() {
        let mut listing = ListingController::new(800);
        listing.on_loaded(
            Arc::new(Dataset::new(
                vec![
                    BusinessRecord::new("1", "A"),
                    BusinessRecord::new("2", "B"),
                    BusinessRecord::new("3", "C"),
                    BusinessRecord::new("4", "D"),
                ],
                DataSource::Json,
            )),
            None,
        );

        let out = render_page(&listing);
        assert!(out.starts_with("[json] 4 of 4 businesses, page 1/2\n"));
        assert!(out.contains(" A [1]"));
        assert!(!out.contains(" D [4]"));
    }

    #[test]
    fn render_page_empty() {
        let listing = ListingController::new(800);
        let out = render_page(&listing);
        assert!(out.starts_with("[none] 0 of 0 businesses, page 1/1\n"));
        assert!(out.contains("no businesses match"));
    }
}
