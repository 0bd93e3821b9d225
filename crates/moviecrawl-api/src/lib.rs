//! API client library for moviecrawl.
//!
//! Provides the TMDB `discover/movie` client and the concurrent
//! page fetcher built on top of it.

/// TMDB API client and page fetcher.
pub mod tmdb;
