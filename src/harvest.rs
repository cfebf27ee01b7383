use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::fetch::PageSource;
use crate::filters::{self, ReviewFilter, FILTERS, PRODUCT_URL};
use crate::ledger::ReviewLedger;
use crate::parser::{parse_review_page, SkipCounts};

/// Most reviews accepted under a single filter.
pub const FILTER_CAP: usize = 100;

/// What one filter's pagination loop did.
#[derive(Debug)]
pub struct FilterStats {
    pub label: &'static str,
    pub pages: u32,
    pub accepted: usize,
    pub skips: SkipCounts,
}

/// Walk one filter page by page, feeding the shared ledger. Stops at the
/// accepted cap or when the site offers no further page, whichever comes
/// first; a page past the cap is never fetched. Transport failure is fatal.
pub async fn harvest_filter<S: PageSource>(
    source: &mut S,
    ledger: &mut ReviewLedger,
    base: &str,
    filter: &ReviewFilter,
) -> Result<FilterStats> {
    let mut page = 1u32;
    let mut accepted = 0usize;
    let mut pages = 0u32;
    let mut skips = SkipCounts::default();

    loop {
        let url = filters::page_url(base, page, filter);
        let html = source.fetch_page(&url).await?;

        let outcome = parse_review_page(&html, ledger, FILTER_CAP - accepted);
        accepted += outcome.accepted;
        skips += outcome.skips;
        pages += 1;

        info!(
            "{}: page {} added {} ({} for this filter)",
            filter.label, page, outcome.accepted, accepted
        );

        if accepted >= FILTER_CAP || !outcome.has_more {
            break;
        }
        page += 1;
    }

    Ok(FilterStats {
        label: filter.label,
        pages,
        accepted,
        skips,
    })
}

/// Run every filter in order against the shared ledger. Per-filter cursor
/// state is local to each `harvest_filter` call; the ledger spans the run.
pub async fn harvest_all<S: PageSource>(
    source: &mut S,
    ledger: &mut ReviewLedger,
) -> Result<Vec<FilterStats>> {
    let pb = ProgressBar::new(FILTERS.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let mut stats = Vec::with_capacity(FILTERS.len());
    for filter in &FILTERS {
        pb.set_message(filter.label);
        stats.push(harvest_filter(source, ledger, PRODUCT_URL, filter).await?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(stats)
}
