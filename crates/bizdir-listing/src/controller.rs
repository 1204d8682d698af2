//! Listing state and the filter → sort → paginate pipeline that derives the
//! visible page from it.

use std::ops::Range;
use std::sync::Arc;

use bizdir_core::{BusinessRecord, DataSource, Dataset, SortOption};
use bizdir_source::BusinessSource;

use crate::filter::filter_records;
use crate::paginate::{page_bounds, total_pages};
use crate::session::{NoopRecorder, PageRecorder};
use crate::sort::sort_records;
use crate::viewport::page_size_for_width;

/// State of one listing view, from entering it until it is dropped.
///
/// The raw list is loaded once and never changes afterwards. Every mutator
/// recomputes the filtered list and the visible page before returning, so
/// readers always observe a consistent view. Until a dataset arrives the
/// pipeline runs over an empty list.
pub struct ListingController<R = NoopRecorder> {
    dataset: Option<Arc<Dataset>>,
    search_term: String,
    min_rating: f64,
    sort_option: SortOption,
    page: usize,
    page_size: usize,
    total_pages: usize,
    filtered: Vec<BusinessRecord>,
    visible: Range<usize>,
    recorder: R,
}

impl ListingController<NoopRecorder> {
    /// Creates an empty listing sized for a viewport `viewport_width` wide.
    #[must_use]
    pub fn new(viewport_width: u32) -> Self {
        Self::with_recorder(viewport_width, NoopRecorder)
    }
}

impl<R: PageRecorder> ListingController<R> {
    /// Creates an empty listing that reports page changes to `recorder`.
    #[must_use]
    pub fn with_recorder(viewport_width: u32, recorder: R) -> Self {
        let mut controller = Self {
            dataset: None,
            search_term: String::new(),
            min_rating: 0.0,
            sort_option: SortOption::default(),
            page: 1,
            page_size: page_size_for_width(viewport_width),
            total_pages: 1,
            filtered: Vec::new(),
            visible: 0..0,
            recorder,
        };
        controller.refresh();
        controller
    }

    /// Loads the dataset from `source` and applies it.
    ///
    /// Does nothing once a dataset has been applied, so the source is asked
    /// at most once per listing.
    pub async fn initialize<S: BusinessSource>(
        &mut self,
        source: &S,
        initial_min_rating: Option<f64>,
    ) {
        if self.is_loaded() {
            tracing::debug!("listing already initialized; skipping load");
            return;
        }
        let dataset = source.load().await;
        self.on_loaded(dataset, initial_min_rating);
    }

    /// Applies a completed load.
    ///
    /// The first dataset wins; later ones are ignored. `initial_min_rating`
    /// (e.g. carried over from a navigation parameter) replaces the current
    /// threshold when given. The pipeline then runs against whatever search,
    /// rating and sort parameters are current, starting from page 1.
    pub fn on_loaded(&mut self, dataset: Arc<Dataset>, initial_min_rating: Option<f64>) {
        if self.is_loaded() {
            tracing::debug!("ignoring dataset delivered after the first load");
            return;
        }

        tracing::info!(
            count = dataset.len(),
            source = %dataset.source,
            "listing loaded"
        );
        self.dataset = Some(dataset);

        if let Some(min_rating) = initial_min_rating {
            self.min_rating = sanitize_rating(min_rating);
        }
        self.refresh();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refresh();
    }

    pub fn set_min_rating(&mut self, min_rating: f64) {
        self.min_rating = sanitize_rating(min_rating);
        self.refresh();
    }

    pub fn set_sort_option(&mut self, option: SortOption) {
        self.sort_option = option;
        self.refresh();
    }

    /// Moves to 1-based page `n`, recomputing only the visible slice.
    ///
    /// Out-of-range targets are ignored. Returns `true` if the page was
    /// applied.
    pub fn go_to_page(&mut self, n: usize) -> bool {
        if n < 1 || n > self.total_pages {
            return false;
        }
        self.page = n;
        self.update_slice();
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.page > 1 && self.go_to_page(self.page - 1)
    }

    /// Re-evaluates the page size for a new viewport width.
    ///
    /// Re-runs the pipeline from page 1 only when the page size changes.
    /// Returns `true` if it did.
    pub fn on_viewport_resize(&mut self, width: u32) -> bool {
        let page_size = page_size_for_width(width);
        if page_size == self.page_size {
            return false;
        }
        tracing::debug!(width, from = self.page_size, to = page_size, "page size changed");
        self.page_size = page_size;
        self.refresh();
        true
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    /// The loaded records in upstream order; empty before the load completes.
    #[must_use]
    pub fn raw_list(&self) -> &[BusinessRecord] {
        self.dataset.as_deref().map_or(&[][..], |d| d.records.as_slice())
    }

    #[must_use]
    pub fn source(&self) -> DataSource {
        self.dataset.as_deref().map_or(DataSource::None, |d| d.source)
    }

    #[must_use]
    pub fn filtered_list(&self) -> &[BusinessRecord] {
        &self.filtered
    }

    #[must_use]
    pub fn visible_page(&self) -> &[BusinessRecord] {
        &self.filtered[self.visible.clone()]
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn min_rating(&self) -> f64 {
        self.min_rating
    }

    #[must_use]
    pub fn sort_option(&self) -> SortOption {
        self.sort_option
    }

    #[must_use]
    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Full pipeline: filter, sort, recount pages, then slice from page 1.
    /// Every caller changes the filtered set or the page size, so the page
    /// is always reset.
    fn refresh(&mut self) {
        let raw = self.dataset.as_deref().map_or(&[][..], |d| d.records.as_slice());

        let mut matched = filter_records(raw, &self.search_term, self.min_rating);
        sort_records(&mut matched, self.sort_option);
        self.filtered = matched.into_iter().cloned().collect();

        self.total_pages = total_pages(self.filtered.len(), self.page_size);
        self.page = 1;

        tracing::debug!(
            raw = raw.len(),
            filtered = self.filtered.len(),
            sort = %self.sort_option,
            total_pages = self.total_pages,
            "listing recomputed"
        );
        self.update_slice();
    }

    fn update_slice(&mut self) {
        self.visible = page_bounds(self.filtered.len(), self.page, self.page_size);
        self.recorder.record_page(self.page);
    }
}

/// NaN would silently disable the rating stage while still being displayed,
/// so it is stored as "no threshold".
fn sanitize_rating(min_rating: f64) -> f64 {
    if min_rating.is_nan() {
        0.0
    } else {
        min_rating
    }
}

/// Parses a `minRating` navigation parameter.
///
/// Only finite values above zero are meaningful thresholds; anything else
/// (absent, blank, non-numeric, zero, negative) yields `None`.
#[must_use]
pub fn parse_min_rating_param(raw: Option<&str>) -> Option<f64> {
    raw?.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
