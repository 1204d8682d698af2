use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::session::SessionPageStore;

const WIDE: u32 = 1280;
const NARROW: u32 = 800;

/// In-memory source that counts how often it is asked for data.
struct CountingSource {
    dataset: Arc<Dataset>,
    calls: AtomicUsize,
}

impl CountingSource {
    fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BusinessSource for CountingSource {
    async fn load(&self) -> Arc<Dataset> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Arc::clone(&self.dataset)
    }
}

fn rated(id: &str, name: &str, rating: Option<f64>) -> BusinessRecord {
    let mut record = BusinessRecord::new(id, name);
    record.hygiene_rating = rating;
    record
}

fn api(records: Vec<BusinessRecord>) -> Arc<Dataset> {
    Arc::new(Dataset::new(records, DataSource::Api))
}

/// `n` records named `Biz 00`, `Biz 01`, ... with ratings cycling 0..=5.
fn numbered(n: usize) -> Vec<BusinessRecord> {
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let rating = (i % 6) as f64;
            rated(&format!("{i}"), &format!("Biz {i:02}"), Some(rating))
        })
        .collect()
}

fn names(records: &[BusinessRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

fn ids(records: &[BusinessRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

// -----------------------------------------------------------------------
// construction and loading
// -----------------------------------------------------------------------

#[test]
fn new_listing_is_empty_with_one_page() {
    let listing = ListingController::new(WIDE);

    assert!(!listing.is_loaded());
    assert_eq!(listing.source(), DataSource::None);
    assert!(listing.raw_list().is_empty());
    assert!(listing.visible_page().is_empty());
    assert_eq!(listing.page(), 1);
    assert_eq!(listing.total_pages(), 1);
    assert_eq!(listing.page_size(), 6);
    assert_eq!(listing.sort_option(), SortOption::NameAsc);
    assert!(listing.min_rating().abs() < f64::EPSILON);
}

#[test]
fn page_size_follows_initial_viewport() {
    assert_eq!(ListingController::new(NARROW).page_size(), 3);
    assert_eq!(ListingController::new(1200).page_size(), 6);
}

#[tokio::test]
async fn initialize_loads_and_runs_pipeline() {
    let source = CountingSource::new(Dataset::new(
        vec![rated("1", "Zed", Some(3.0)), rated("2", "Alpha", Some(5.0))],
        DataSource::Json,
    ));
    let mut listing = ListingController::new(WIDE);

    listing.initialize(&source, None).await;

    assert!(listing.is_loaded());
    assert_eq!(listing.source(), DataSource::Json);
    assert_eq!(names(listing.visible_page()), vec!["Alpha", "Zed"]);
}

#[tokio::test]
async fn initialize_twice_loads_once_and_keeps_dataset() {
    let source = CountingSource::new(Dataset::new(numbered(4), DataSource::Api));
    let mut listing = ListingController::new(WIDE);

    listing.initialize(&source, None).await;
    let first: Vec<String> = listing.raw_list().iter().map(|r| r.id.clone()).collect();
    listing.initialize(&source, None).await;

    assert_eq!(source.calls(), 1);
    assert_eq!(ids(listing.raw_list()), first);
    assert_eq!(listing.source(), DataSource::Api);
}

#[tokio::test]
async fn initialize_applies_initial_min_rating() {
    let source = CountingSource::new(Dataset::new(
        vec![
            rated("1", "Low", Some(2.0)),
            rated("2", "High", Some(5.0)),
            rated("3", "Mid", Some(4.0)),
        ],
        DataSource::Api,
    ));
    let mut listing = ListingController::new(WIDE);

    listing.initialize(&source, Some(4.0)).await;

    assert!((listing.min_rating() - 4.0).abs() < f64::EPSILON);
    assert_eq!(names(listing.filtered_list()), vec!["High", "Mid"]);
}

#[test]
fn later_dataset_is_ignored() {
    let mut listing = ListingController::new(WIDE);
    listing.on_loaded(api(vec![rated("1", "First", None)]), None);
    listing.on_loaded(
        Arc::new(Dataset::new(vec![rated("2", "Second", None)], DataSource::Json)),
        Some(5.0),
    );

    assert_eq!(names(listing.raw_list()), vec!["First"]);
    assert_eq!(listing.source(), DataSource::Api);
    assert!(listing.min_rating().abs() < f64::EPSILON);
}

#[test]
fn parameters_set_before_load_apply_when_it_resolves() {
    let mut listing = ListingController::new(WIDE);
    listing.set_search_term("pizza");
    listing.set_sort_option(SortOption::NameDesc);
    assert!(listing.filtered_list().is_empty());

    listing.on_loaded(
        api(vec![
            rated("1", "Alpha Pizza", None),
            rated("2", "Beta Burgers", None),
            rated("3", "Mama Pizza", None),
        ]),
        None,
    );

    assert_eq!(names(listing.filtered_list()), vec!["Mama Pizza", "Alpha Pizza"]);
    assert_eq!(listing.page(), 1);
}

#[test]
fn empty_dataset_has_one_empty_page() {
    let mut listing = ListingController::new(WIDE);
    listing.on_loaded(Arc::new(Dataset::new(Vec::new(), DataSource::Json)), None);

    assert_eq!(listing.source(), DataSource::Json);
    assert!(listing.filtered_list().is_empty());
    assert!(listing.visible_page().is_empty());
    assert_eq!(listing.total_pages(), 1);
    assert_eq!(listing.page(), 1);
}

// -----------------------------------------------------------------------
// filter and sort scenarios
// -----------------------------------------------------------------------

#[test]
fn rating_desc_keeps_raw_order_for_ties() {
    let mut listing = ListingController::new(WIDE);
    listing.on_loaded(
        api(vec![
            rated("z", "Zed", Some(3.0)),
            rated("a", "Alpha", Some(5.0)),
            rated("m", "Mike", Some(5.0)),
        ]),
        None,
    );
    listing.set_sort_option(SortOption::RatingDesc);

    assert_eq!(names(listing.filtered_list()), vec!["Alpha", "Mike", "Zed"]);
}

#[test]
fn search_mama_finds_only_mama_pizza() {
    let mut listing = ListingController::new(WIDE);
    listing.on_loaded(
        api(vec![
            rated("1", "Alpha Cafe", Some(3.0)),
            rated("2", "Mama Pizza", Some(5.0)),
            rated("3", "Zeta Grill", Some(4.0)),
        ]),
        None,
    );
    listing.set_search_term("mama");

    assert_eq!(names(listing.filtered_list()), vec!["Mama Pizza"]);
}

#[test]
fn inactive_filters_keep_every_record() {
    let mut listing = ListingController::new(WIDE);
    listing.on_loaded(api(numbered(9)), None);
    listing.set_search_term("   ");
    listing.set_min_rating(0.0);

    assert_eq!(listing.filtered_list().len(), 9);
}

#[test]
fn nan_min_rating_is_treated_as_no_threshold() {
    let mut listing = ListingController::new(WIDE);
    listing.on_loaded(api(numbered(6)), None);
    listing.set_min_rating(f64::NAN);

    assert!(listing.min_rating().abs() < f64::EPSILON);
    assert_eq!(listing.filtered_list().len(), 6);
}

#[test]
fn every_sort_option_is_stable_for_equal_keys() {
    let records = vec![
        rated("1", "Same", Some(4.0)),
        rated("2", "Same", Some(4.0)),
        rated("3", "Other", Some(2.0)),
        rated("4", "Same", Some(4.0)),
    ];

    for option in SortOption::ALL {
        let mut listing = ListingController::new(WIDE);
        listing.on_loaded(api(records.clone()), None);
        listing.set_sort_option(option);

        let same: Vec<&str> = listing
            .filtered_list()
            .iter()
            .filter(|r| r.name == "Same")
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(same, vec!["1", "2", "4"], "option {option}");
    }
}

// -----------------------------------------------------------------------
// pagination
// -----------------------------------------------------------------------

#[test]
fn pages_concatenate_to_filtered_list() {
    for size_width in [WIDE, NARROW] {
        let mut listing = ListingController::new(size_width);
        listing.on_loaded(api(numbered(14)), None);
        listing.set_sort_option(SortOption::RatingDesc);

        let mut collected = Vec::new();
        for page in 1..=listing.total_pages() {
            assert!(listing.go_to_page(page));
            let visible = listing.visible_page();
            assert!(!visible.is_empty());
            assert!(visible.len() <= listing.page_size());
            collected.extend(visible.iter().map(|r| r.id.clone()));
        }

        let expected: Vec<String> = listing.filtered_list().iter().map(|r| r.id.clone()).collect();
        assert_eq!(collected, expected);
    }
}

#[test]
fn go_to_page_out_of_range_is_ignored() {
    let mut listing = ListingController::new(NARROW);
    listing.on_loaded(api(numbered(7)), None);
    assert_eq!(listing.total_pages(), 3);

    assert!(listing.go_to_page(2));
    assert!(!listing.go_to_page(0));
    assert!(!listing.go_to_page(4));
    assert_eq!(listing.page(), 2);
}

#[test]
fn go_to_page_does_not_refilter() {
    let mut listing = ListingController::new(NARROW);
    listing.on_loaded(api(numbered(7)), None);
    let before: Vec<String> = listing.filtered_list().iter().map(|r| r.id.clone()).collect();

    listing.go_to_page(3);

    assert_eq!(ids(listing.filtered_list()), before);
    assert_eq!(ids(listing.visible_page()), vec![before[6].as_str()]);
}

#[test]
fn next_and_previous_stop_at_the_ends() {
    let mut listing = ListingController::new(NARROW);
    listing.on_loaded(api(numbered(5)), None);

    assert!(!listing.previous_page());
    assert!(listing.next_page());
    assert_eq!(listing.page(), 2);
    assert!(!listing.next_page());
    assert!(listing.previous_page());
    assert_eq!(listing.page(), 1);
}

#[test]
fn changing_parameters_resets_to_first_page() {
    let mut listing = ListingController::new(NARROW);
    listing.on_loaded(api(numbered(12)), None);

    listing.go_to_page(3);
    listing.set_search_term("biz");
    assert_eq!(listing.page(), 1);

    listing.go_to_page(2);
    listing.set_min_rating(1.0);
    assert_eq!(listing.page(), 1);

    listing.go_to_page(2);
    listing.set_sort_option(SortOption::NameDesc);
    assert_eq!(listing.page(), 1);
}

// -----------------------------------------------------------------------
// viewport
// -----------------------------------------------------------------------

#[test]
fn resize_within_same_tier_keeps_page() {
    let mut listing = ListingController::new(WIDE);
    listing.on_loaded(api(numbered(14)), None);
    listing.go_to_page(2);
    let visible_before: Vec<String> = listing.visible_page().iter().map(|r| r.id.clone()).collect();

    assert!(!listing.on_viewport_resize(1920));

    assert_eq!(listing.page(), 2);
    assert_eq!(listing.page_size(), 6);
    assert_eq!(ids(listing.visible_page()), visible_before);
}

#[test]
fn resize_across_breakpoint_repages_from_first_page() {
    let mut listing = ListingController::new(WIDE);
    listing.on_loaded(api(numbered(14)), None);
    listing.go_to_page(2);

    assert!(listing.on_viewport_resize(NARROW));

    assert_eq!(listing.page(), 1);
    assert_eq!(listing.page_size(), 3);
    assert_eq!(listing.total_pages(), 5);
    assert_eq!(listing.visible_page().len(), 3);
}

// -----------------------------------------------------------------------
// page recording
// -----------------------------------------------------------------------

#[test]
fn active_page_is_recorded_to_session() {
    let mut listing = ListingController::with_recorder(NARROW, SessionPageStore::new());
    assert_eq!(listing.recorder().last_page(), Some(1));

    listing.on_loaded(api(numbered(9)), None);
    listing.go_to_page(3);
    assert_eq!(listing.recorder().last_page(), Some(3));

    listing.set_search_term("biz 0");
    assert_eq!(listing.recorder().last_page(), Some(1));
}

// -----------------------------------------------------------------------
// parse_min_rating_param
// -----------------------------------------------------------------------

#[test]
fn parse_min_rating_param_accepts_positive_numbers() {
    assert_eq!(parse_min_rating_param(Some("4")), Some(4.0));
    assert_eq!(parse_min_rating_param(Some(" 2.5 ")), Some(2.5));
}

#[test]
fn parse_min_rating_param_rejects_everything_else() {
    assert!(parse_min_rating_param(None).is_none());
    assert!(parse_min_rating_param(Some("")).is_none());
    assert!(parse_min_rating_param(Some("0")).is_none());
    assert!(parse_min_rating_param(Some("-3")).is_none());
    assert!(parse_min_rating_param(Some("five")).is_none());
    assert!(parse_min_rating_param(Some("NaN")).is_none());
    assert!(parse_min_rating_param(Some("inf")).is_none());
}
