//! Page counting and concurrent page fetching for `discover/movie`.
//!
//! Everything here is best-effort: request failures are logged and turned
//! into zero counts or [`PageOutcome::Failed`], never propagated.

use anyhow::Result;
use futures::stream::{self, StreamExt};
use tracing::instrument;

use super::api::LocalTmdbApi;
use super::types::{DiscoverMovieParams, DiscoverMovieResponse, Movie};

/// Upper bound on pages served by `discover/movie`.
pub const MAX_PAGES: u32 = 500;

/// Default number of concurrent page requests.
pub const DEFAULT_WORKERS: usize = 10;

/// Records per page in the API's page size contract.
pub const PAGE_SIZE: usize = 20;

/// Result of fetching a single page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// The page was fetched; it may hold zero records.
    Fetched {
        /// Page number.
        page: u32,
        /// Records on the page.
        movies: Vec<Movie>,
    },
    /// The request for the page failed.
    Failed {
        /// Page number.
        page: u32,
        /// Error description.
        reason: String,
    },
}

impl PageOutcome {
    /// Page number this outcome belongs to.
    #[must_use]
    pub const fn page(&self) -> u32 {
        match self {
            Self::Fetched { page, .. } | Self::Failed { page, .. } => *page,
        }
    }
}

/// A page that could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// Page number.
    pub page: u32,
    /// Error description of the last attempt.
    pub reason: String,
}

/// Tuning knobs for [`fetch_all_movies`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Number of pages fetched concurrently (minimum 1).
    pub workers: usize,
    /// Page cap applied on top of [`MAX_PAGES`].
    pub max_pages: u32,
    /// Extra passes over pages that failed.
    pub retry_passes: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            max_pages: MAX_PAGES,
            retry_passes: 0,
        }
    }
}

/// Aggregate of one fetch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchReport {
    /// All records in completion order.
    pub movies: Vec<Movie>,
    /// Number of pages scheduled (after clamping). 0 when the page count
    /// itself could not be read.
    pub pages: u32,
    /// Pages still failing after all retry passes, sorted by page. A
    /// failed page count is recorded as a failure of page 1.
    pub failed: Vec<PageFailure>,
}

impl FetchReport {
    /// Returns `true` if every scheduled page was fetched.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Page numbers that failed.
    #[must_use]
    pub fn failed_pages(&self) -> Vec<u32> {
        self.failed.iter().map(|f| f.page).collect()
    }

    /// Nominal maximum record count for the scheduled pages.
    #[must_use]
    pub fn nominal_total(&self) -> usize {
        usize::try_from(self.pages)
            .unwrap_or(usize::MAX)
            .saturating_mul(PAGE_SIZE)
    }

    /// Logs a warning summary followed by one line per failed page.
    pub fn log_failures(&self) {
        if self.failed.is_empty() {
            return;
        }
        if self.pages == 0 {
            tracing::warn!("Could not determine the number of pages");
        } else {
            tracing::warn!("{} of {} pages failed", self.failed.len(), self.pages);
        }
        for failure in &self.failed {
            tracing::warn!(page = failure.page, reason = %failure.reason, "Page not fetched");
        }
    }
}

/// Clamps the upstream page count to `max` and to [`MAX_PAGES`].
#[must_use]
pub fn clamp_pages(total_pages: u32, max: u32) -> u32 {
    total_pages.min(max).min(MAX_PAGES)
}

/// Requests page 1 of the query. Errors are logged before being returned.
async fn first_page(
    api: &(impl LocalTmdbApi + Sync),
    params: &DiscoverMovieParams,
) -> Result<DiscoverMovieResponse> {
    let page_params = params.clone().page(1);
    let result = api.discover_movies(&page_params).await;
    if let Err(e) = &result {
        tracing::error!("Error fetching data: {e:#}");
    }
    result
}

/// Returns the number of result pages for the query, or 0 on failure.
#[instrument(skip_all)]
pub async fn total_pages(api: &(impl LocalTmdbApi + Sync), params: &DiscoverMovieParams) -> u32 {
    first_page(api, params)
        .await
        .map_or(0, |response| response.total_pages)
}

/// Returns the number of matching movies for the query, or 0 on failure.
#[instrument(skip_all)]
pub async fn total_results(api: &(impl LocalTmdbApi + Sync), params: &DiscoverMovieParams) -> u32 {
    first_page(api, params)
        .await
        .map_or(0, |response| response.total_results)
}

/// Fetches one page. Never fails; errors become [`PageOutcome::Failed`].
pub async fn fetch_page(
    api: &(impl LocalTmdbApi + Sync),
    params: &DiscoverMovieParams,
    page: u32,
) -> PageOutcome {
    let page_params = params.clone().page(page);
    match api.discover_movies(&page_params).await {
        Ok(response) => PageOutcome::Fetched {
            page,
            movies: response.results,
        },
        Err(e) => {
            let reason = format!("{e:#}");
            tracing::error!(page = page, "Error fetching data for page {page}: {reason}");
            PageOutcome::Failed { page, reason }
        }
    }
}

/// Fetches `pages` with at most `workers` requests in flight and folds
/// the outcomes into `report` as they complete.
async fn fetch_pages(
    api: &(impl LocalTmdbApi + Sync),
    params: &DiscoverMovieParams,
    pages: &[u32],
    workers: usize,
    report: &mut FetchReport,
) {
    let nominal = report.nominal_total();
    let mut outcomes = stream::iter(pages.iter().copied())
        .map(|page| fetch_page(api, params, page))
        .buffer_unordered(workers.max(1));

    while let Some(outcome) = outcomes.next().await {
        let page = outcome.page();
        match outcome {
            PageOutcome::Fetched { movies, .. } => report.movies.extend(movies),
            PageOutcome::Failed { reason, .. } => report.failed.push(PageFailure { page, reason }),
        }
        tracing::info!(
            page = page,
            "Processed {} out of {} movies",
            report.movies.len(),
            nominal
        );
    }
}

/// Fetches every page of the query and aggregates the records.
///
/// Pages are counted first and clamped to `options.max_pages` (never more
/// than [`MAX_PAGES`]). Records are appended in completion order. The
/// count request and every failed page are retried up to
/// `options.retry_passes` times; the ones still failing are listed in
/// [`FetchReport::failed`].
#[instrument(skip_all)]
pub async fn fetch_all_movies(
    api: &(impl LocalTmdbApi + Sync),
    params: &DiscoverMovieParams,
    options: &FetchOptions,
) -> FetchReport {
    let mut count = first_page(api, params).await;
    for pass in 1..=options.retry_passes {
        if count.is_ok() {
            break;
        }
        tracing::info!(pass = pass, "Retrying page count");
        count = first_page(api, params).await;
    }
    let upstream = match count {
        Ok(response) => response.total_pages,
        Err(e) => {
            return FetchReport {
                failed: vec![PageFailure {
                    page: 1,
                    reason: format!("{e:#}"),
                }],
                ..FetchReport::default()
            };
        }
    };
    let pages = clamp_pages(upstream, options.max_pages);
    tracing::info!(
        upstream = upstream,
        "Total pages available (limited to {}): {pages}",
        options.max_pages.min(MAX_PAGES)
    );

    let mut report = FetchReport {
        pages,
        ..FetchReport::default()
    };
    if pages == 0 {
        return report;
    }

    let all_pages: Vec<u32> = (1..=pages).collect();
    fetch_pages(api, params, &all_pages, options.workers, &mut report).await;

    for pass in 1..=options.retry_passes {
        if report.failed.is_empty() {
            break;
        }
        let mut pending: Vec<u32> = report.failed.drain(..).map(|f| f.page).collect();
        pending.sort_unstable();
        tracing::info!(pass = pass, pages = pending.len(), "Retrying failed pages");
        fetch_pages(api, params, &pending, options.workers, &mut report).await;
    }

    report.failed.sort_by_key(|f| f.page);
    report
}
