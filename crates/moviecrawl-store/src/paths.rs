//! Output path resolution.

use std::path::{Path, PathBuf};

/// Default output file for the default year, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "data/all_2024_movies.json";

/// Directory holding the default output files.
const DEFAULT_OUTPUT_DIR: &str = "data";

/// Returns the default output file for `year` (`data/all_{year}_movies.json`).
fn default_output_path(year: u32) -> PathBuf {
    Path::new(DEFAULT_OUTPUT_DIR).join(format!("all_{year}_movies.json"))
}

/// Resolves the output file path.
///
/// - If `output` is `Some`, returns it unchanged.
/// - Otherwise returns `data/all_{year}_movies.json`.
#[must_use]
pub fn resolve_output_path(output: Option<&Path>, year: u32) -> PathBuf {
    output.map_or_else(|| default_output_path(year), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_output() {
        // Arrange
        let output = PathBuf::from("/tmp/movies/2023.json");

        // Act
        let path = resolve_output_path(Some(&output), 2024);

        // Assert
        assert_eq!(path, output);
    }

    #[test]
    fn test_resolve_default() {
        // Arrange & Act
        let path = resolve_output_path(None, 2024);

        // Assert
        assert!(path.is_relative());
        assert_eq!(path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn test_resolve_default_follows_year() {
        // Arrange & Act
        let path = resolve_output_path(None, 2023);

        // Assert
        assert_eq!(path, PathBuf::from("data/all_2023_movies.json"));
    }
}
