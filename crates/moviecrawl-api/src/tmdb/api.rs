//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{DiscoverMovieParams, DiscoverMovieResponse};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches one page of `discover/movie` results.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not 200,
    /// or JSON parsing fails.
    async fn discover_movies(&self, params: &DiscoverMovieParams) -> Result<DiscoverMovieResponse>;
}
