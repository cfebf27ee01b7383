/// Review pages for this product, fixed at build time.
pub const PRODUCT_URL: &str = "https://www.amazon.co.uk/product-reviews/B00M3IFUMK";

/// One sort/star query combination.
#[derive(Debug, Clone, Copy)]
pub struct ReviewFilter {
    /// Short label for logs and the progress bar.
    pub label: &'static str,
    /// Query string appended verbatim to the page URL.
    pub query: &'static str,
}

/// Every filter combination the run walks, in order. The list and its order
/// match the site's sort/star query surface: most-recent sort, the
/// critical/positive buckets, then each star value, each with and without
/// the recency sort.
pub const FILTERS: [ReviewFilter; 15] = [
    ReviewFilter { label: "most recent", query: "sortBy=recent" },
    ReviewFilter { label: "critical", query: "filterByStar=critical" },
    ReviewFilter { label: "critical, recent", query: "filterByStar=critical&sortBy=recent" },
    ReviewFilter { label: "positive", query: "filterByStar=positive" },
    ReviewFilter { label: "positive, recent", query: "filterByStar=positive&sortBy=recent" },
    ReviewFilter { label: "1 star", query: "filterByStar=one_star" },
    ReviewFilter { label: "1 star, recent", query: "filterByStar=one_star&sortBy=recent" },
    ReviewFilter { label: "2 star", query: "filterByStar=two_star" },
    ReviewFilter { label: "2 star, recent", query: "filterByStar=two_star&sortBy=recent" },
    ReviewFilter { label: "3 star", query: "filterByStar=three_star" },
    ReviewFilter { label: "3 star, recent", query: "filterByStar=three_star&sortBy=recent" },
    ReviewFilter { label: "4 star", query: "filterByStar=four_star" },
    ReviewFilter { label: "4 star, recent", query: "filterByStar=four_star&sortBy=recent" },
    ReviewFilter { label: "5 star", query: "filterByStar=five_star" },
    ReviewFilter { label: "5 star, recent", query: "filterByStar=five_star&sortBy=recent" },
];

/// Build the URL for one page of one filter.
pub fn page_url(base: &str, page: u32, filter: &ReviewFilter) -> String {
    format!(
        "{base}/ref=cm_cr_getr_d_paging_btm_next_{page}?ie=UTF8&reviewerType=all_reviews&pageNumber={page}&{query}",
        query = filter.query,
    )
}
