//! TMDB `discover/movie` response types and request parameters.

use serde::Deserialize;

/// A single movie record as returned in the `results` array.
///
/// Kept opaque: every key and value passes through unmodified.
pub type Movie = serde_json::Map<String, serde_json::Value>;

// --- Discover Movie ---

/// Response from `discover/movie` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoverMovieResponse {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Movie records on this page.
    #[serde(default)]
    pub results: Vec<Movie>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}

// --- Discover Parameters ---

/// Query parameters for `discover/movie`.
///
/// Treated as an immutable value: a request for another page is
/// derived with [`DiscoverMovieParams::page`] on a clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverMovieParams {
    /// Include adult content (default: false).
    pub include_adult: bool,
    /// Include video-only entries (default: false).
    pub include_video: bool,
    /// Response language (default: "en-US").
    pub language: String,
    /// Release year filter (default: 2024).
    pub year: u32,
    /// Sort key (default: "popularity.desc").
    pub sort_by: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
}

impl Default for DiscoverMovieParams {
    fn default() -> Self {
        Self::new(2024)
    }
}

impl DiscoverMovieParams {
    /// Creates new discover params for the given release year.
    #[must_use]
    pub fn new(year: u32) -> Self {
        Self {
            include_adult: false,
            include_video: false,
            language: String::from("en-US"),
            year,
            sort_by: String::from("popularity.desc"),
            page: 1,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the sort key.
    #[must_use]
    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self
    }

    /// Sets the adult content flag.
    #[must_use]
    pub const fn include_adult(mut self, include: bool) -> Self {
        self.include_adult = include;
        self
    }

    /// Sets the video flag.
    #[must_use]
    pub const fn include_video(mut self, include: bool) -> Self {
        self.include_video = include;
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Builds the query string pairs sent with the request.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("include_adult", self.include_adult.to_string()),
            ("include_video", self.include_video.to_string()),
            ("language", self.language.clone()),
            ("page", self.page.to_string()),
            ("sort_by", self.sort_by.clone()),
            ("year", self.year.to_string()),
        ]
    }
}
