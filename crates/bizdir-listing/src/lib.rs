//! The business listing pipeline: filter, sort and paginate the directory
//! loaded by [`bizdir_source`], re-paging as the viewport changes.

pub mod controller;
pub mod display;
pub mod filter;
pub mod paginate;
pub mod session;
pub mod sort;
pub mod viewport;

pub use controller::{parse_min_rating_param, ListingController};
pub use display::{cuisine_info, star_count, CuisineInfo};
pub use session::{NoopRecorder, PageRecorder, SessionPageStore, PAGE_SESSION_KEY};
pub use viewport::page_size_for_width;
