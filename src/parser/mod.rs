pub mod review;
pub mod selectors;

pub use review::{parse_review_page, PageOutcome, SkipCounts};
