//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 `discover/movie` endpoint,
//! counts result pages, and fetches all pages concurrently.

mod api;
mod client;
mod fetcher;
mod rate_limiter;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use fetcher::{
    DEFAULT_WORKERS, FetchOptions, FetchReport, MAX_PAGES, PAGE_SIZE, PageFailure, PageOutcome,
    clamp_pages, fetch_all_movies, fetch_page, total_pages, total_results,
};
pub use rate_limiter::DEFAULT_REQUESTS_PER_SECOND;
#[allow(clippy::module_name_repetitions)]
pub use types::{DiscoverMovieParams, DiscoverMovieResponse, Movie};
