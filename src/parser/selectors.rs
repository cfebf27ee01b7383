//! CSS selectors for the review page markup. Update here when the site
//! changes its HTML structure.

use std::sync::LazyLock;

use scraper::Selector;

/// One review block.
pub static REVIEW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[data-hook="review"]"#).unwrap());

/// Attribute on the review block carrying the stable review id.
pub static ID_ATTR: &str = "id";

/// Star rating, e.g. "4.0 out of 5 stars".
pub static STAR_RATING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"i[data-hook="review-star-rating"]"#).unwrap());

/// Present only on reviews written in another language.
pub static FOREIGN_MARKER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"i[data-hook="cmps-review-star-rating"]"#).unwrap());

/// Review body text.
pub static REVIEW_BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"span[data-hook="review-body"]"#).unwrap());

/// "Next page" control in the pagination strip.
pub static NEXT_PAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.a-last").unwrap());

/// Same control when greyed out on the last page.
pub static NEXT_PAGE_DISABLED: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.a-disabled.a-last").unwrap());
