use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use crate::ledger::{Review, ReviewLedger};
use crate::parser::selectors;
use crate::text::clean_text;

/// Result of parsing one page.
#[derive(Debug)]
pub struct PageOutcome {
    /// Reviews newly accepted into the ledger from this page.
    pub accepted: usize,
    pub skips: SkipCounts,
    /// Whether the pagination strip offers a further page: false when the
    /// next control is missing or greyed out.
    pub has_more: bool,
}

/// Per-reason skip tallies for the run summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SkipCounts {
    pub foreign: usize,
    pub duplicate: usize,
    pub missing_id: usize,
    pub malformed: usize,
}

impl SkipCounts {
    pub fn total(&self) -> usize {
        self.foreign + self.duplicate + self.missing_id + self.malformed
    }
}

impl std::ops::AddAssign for SkipCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.foreign += rhs.foreign;
        self.duplicate += rhs.duplicate;
        self.missing_id += rhs.missing_id;
        self.malformed += rhs.malformed;
    }
}

enum Verdict {
    Accept(Review),
    Foreign,
    MissingId,
    Duplicate(String),
    Malformed(String, &'static str),
}

/// Walk every review block on the page, accepting at most `budget` new
/// reviews into the ledger. A bad element is skipped and tallied; it never
/// aborts the rest of the page.
pub fn parse_review_page(html: &str, ledger: &mut ReviewLedger, budget: usize) -> PageOutcome {
    let document = Html::parse_document(html);

    let mut accepted = 0usize;
    let mut skips = SkipCounts::default();

    for element in document.select(&selectors::REVIEW) {
        if accepted >= budget {
            break;
        }
        match classify(element, ledger) {
            Verdict::Accept(review) => {
                debug!("accepted review {}", review.id);
                ledger.push(review);
                accepted += 1;
            }
            Verdict::Foreign => {
                debug!("skipping foreign review");
                skips.foreign += 1;
            }
            Verdict::MissingId => {
                warn!("review block without an id attribute, skipping");
                skips.missing_id += 1;
            }
            Verdict::Duplicate(id) => {
                debug!("review {} already collected, skipping", id);
                skips.duplicate += 1;
            }
            Verdict::Malformed(id, what) => {
                warn!("review {}: {}, skipping", id, what);
                skips.malformed += 1;
            }
        }
    }

    let next = document.select(&selectors::NEXT_PAGE).next().is_some();
    let disabled = document.select(&selectors::NEXT_PAGE_DISABLED).next().is_some();

    PageOutcome {
        accepted,
        skips,
        has_more: next && !disabled,
    }
}

fn classify(element: ElementRef<'_>, ledger: &ReviewLedger) -> Verdict {
    if element.select(&selectors::FOREIGN_MARKER).next().is_some() {
        return Verdict::Foreign;
    }

    let id = match element.value().attr(selectors::ID_ATTR) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return Verdict::MissingId,
    };

    if ledger.contains(&id) {
        return Verdict::Duplicate(id);
    }

    let rating_text = match element.select(&selectors::STAR_RATING).next() {
        Some(el) => el.text().collect::<String>(),
        None => return Verdict::Malformed(id, "no star rating element"),
    };
    let rating = match parse_rating(&rating_text) {
        Some(r) => r,
        None => return Verdict::Malformed(id, "unparsable star rating"),
    };

    let body = match element.select(&selectors::REVIEW_BODY).next() {
        Some(el) => el.text().collect::<String>(),
        None => return Verdict::Malformed(id, "no review body element"),
    };

    Verdict::Accept(Review {
        id,
        rating,
        text: clean_text(body.trim()),
    })
}

/// Parse "4.0 out of 5 stars" into 4.0. Out-of-range values are rejected.
fn parse_rating(text: &str) -> Option<f32> {
    let value: f32 = text.replace("out of 5 stars", "").trim().parse().ok()?;
    (0.0..=5.0).contains(&value).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review_div(id: &str, rating: &str, body: &str) -> String {
        format!(
            r#"<div data-hook="review" id="{id}" class="a-section review">
                 <i data-hook="review-star-rating" class="a-icon a-icon-star">
                   <span class="a-icon-alt">{rating}</span>
                 </i>
                 <span data-hook="review-body" class="a-size-base review-text">
                   <span>{body}</span>
                 </span>
               </div>"#
        )
    }

    fn foreign_review_div(id: &str, body: &str) -> String {
        format!(
            r#"<div data-hook="review" id="{id}" class="a-section review">
                 <i data-hook="cmps-review-star-rating" class="a-icon a-icon-star">
                   <span class="a-icon-alt">5,0 von 5 Sternen</span>
                 </i>
                 <span data-hook="review-body"><span>{body}</span></span>
               </div>"#
        )
    }

    fn page(reviews: &[String], pagination: &str) -> String {
        format!(
            "<html><body><div id=\"cm_cr-review_list\">{}</div>{}</body></html>",
            reviews.join("\n"),
            pagination,
        )
    }

    const NEXT: &str = r##"<ul class="a-pagination"><li class="a-last"><a href="#">Next</a></li></ul>"##;
    const NEXT_DISABLED: &str =
        r#"<ul class="a-pagination"><li class="a-disabled a-last">Next</li></ul>"#;

    #[test]
    fn rating_string_parses() {
        assert_eq!(parse_rating("4.0 out of 5 stars"), Some(4.0));
        assert_eq!(parse_rating("1.0 out of 5 stars"), Some(1.0));
        assert_eq!(parse_rating("stars"), None);
        assert_eq!(parse_rating("6.0 out of 5 stars"), None);
    }

    #[test]
    fn accepts_new_reviews_with_cleaned_text() {
        let html = page(
            &[review_div("R100", "4.0 out of 5 stars", "Great product!! \u{1F44D}")],
            NEXT,
        );
        let mut ledger = ReviewLedger::new();
        let outcome = parse_review_page(&html, &mut ledger, 100);

        assert_eq!(outcome.accepted, 1);
        assert_eq!(
            ledger.records()[0],
            Review {
                id: "R100".to_string(),
                rating: 4.0,
                text: "Great product thumbs_up".to_string(),
            }
        );
    }

    #[test]
    fn foreign_duplicate_and_novel_yield_one_record() {
        let mut ledger = ReviewLedger::new();
        ledger.push(Review {
            id: "ROLD".to_string(),
            rating: 3.0,
            text: "seen before".to_string(),
        });

        let html = page(
            &[
                foreign_review_div("RDE", "Sehr gut"),
                review_div("ROLD", "3.0 out of 5 stars", "seen before"),
                review_div("RNEW", "5.0 out of 5 stars", "Quite novel."),
            ],
            NEXT,
        );
        let outcome = parse_review_page(&html, &mut ledger, 100);

        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.skips.foreign, 1);
        assert_eq!(outcome.skips.duplicate, 1);
        assert_eq!(ledger.len(), 2);
        let novel = &ledger.records()[1];
        assert_eq!(novel.id, "RNEW");
        assert_eq!(novel.rating, 5.0);
        assert_eq!(novel.text, "Quite novel");
    }

    #[test]
    fn refetch_of_same_page_accepts_nothing() {
        let html = page(
            &[
                review_div("R1", "2.0 out of 5 stars", "meh"),
                review_div("R2", "5.0 out of 5 stars", "superb"),
            ],
            NEXT,
        );
        let mut ledger = ReviewLedger::new();
        assert_eq!(parse_review_page(&html, &mut ledger, 100).accepted, 2);

        let second = parse_review_page(&html, &mut ledger, 100);
        assert_eq!(second.accepted, 0);
        assert_eq!(second.skips.duplicate, 2);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn missing_id_skips_element_only() {
        let no_id = r#"<div data-hook="review" class="a-section review">
             <i data-hook="review-star-rating"><span>1.0 out of 5 stars</span></i>
             <span data-hook="review-body"><span>anonymous rant</span></span>
           </div>"#
            .to_string();
        let html = page(&[no_id, review_div("R2", "4.0 out of 5 stars", "fine")], NEXT);

        let mut ledger = ReviewLedger::new();
        let outcome = parse_review_page(&html, &mut ledger, 100);

        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.skips.missing_id, 1);
        assert_eq!(ledger.records()[0].id, "R2");
    }

    #[test]
    fn malformed_rating_skips_element_only() {
        let html = page(
            &[
                review_div("R1", "lots of stars", "unrateable"),
                review_div("R2", "4.0 out of 5 stars", "fine"),
            ],
            NEXT,
        );
        let mut ledger = ReviewLedger::new();
        let outcome = parse_review_page(&html, &mut ledger, 100);

        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.skips.malformed, 1);
        assert_eq!(ledger.records()[0].id, "R2");
    }

    #[test]
    fn budget_stops_acceptance() {
        let reviews: Vec<String> = (0..5)
            .map(|i| review_div(&format!("R{i}"), "4.0 out of 5 stars", "fine"))
            .collect();
        let html = page(&reviews, NEXT);

        let mut ledger = ReviewLedger::new();
        let outcome = parse_review_page(&html, &mut ledger, 2);

        assert_eq!(outcome.accepted, 2);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn continuation_signal() {
        let review = review_div("R1", "4.0 out of 5 stars", "fine");
        let mut ledger = ReviewLedger::new();

        let with_next = page(std::slice::from_ref(&review), NEXT);
        assert!(parse_review_page(&with_next, &mut ledger, 100).has_more);

        let mut ledger = ReviewLedger::new();
        let disabled = page(std::slice::from_ref(&review), NEXT_DISABLED);
        assert!(!parse_review_page(&disabled, &mut ledger, 100).has_more);

        let mut ledger = ReviewLedger::new();
        let no_control = page(std::slice::from_ref(&review), "");
        assert!(!parse_review_page(&no_control, &mut ledger, 100).has_more);
    }

    #[test]
    fn fixture_page() {
        let html = std::fs::read_to_string("tests/fixtures/review_page.html").unwrap();
        let mut ledger = ReviewLedger::new();
        let outcome = parse_review_page(&html, &mut ledger, 100);

        assert_eq!(outcome.accepted, 3);
        assert_eq!(outcome.skips.foreign, 1);
        assert!(outcome.has_more);
        let ids: Vec<&str> = ledger.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["R1ABC2DEF3GHI4", "R5JKL6MNO7PQR8", "R9STU0VWX1YZA2"]);
    }
}
