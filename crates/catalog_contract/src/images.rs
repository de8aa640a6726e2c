//! Image CDN helpers and small display formatters for catalog records.

/// Base URL of the catalog image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
/// Default poster rendition size.
pub const DEFAULT_POSTER_SIZE: &str = "w500";
/// Default backdrop rendition size.
pub const DEFAULT_BACKDROP_SIZE: &str = "w1280";
/// Placeholder shown when a movie has no poster.
pub const POSTER_PLACEHOLDER_URL: &str = "https://via.placeholder.com/300x450?text=No+Image";
/// Placeholder shown when a movie has no backdrop.
pub const BACKDROP_PLACEHOLDER_URL: &str = "https://via.placeholder.com/1280x720?text=No+Image";

fn image_url(path: Option<&str>, size: &str, placeholder: &str) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => format!("{IMAGE_BASE_URL}/{size}{path}"),
        None => placeholder.to_string(),
    }
}

/// Resolves a poster path to a CDN URL, or the poster placeholder when absent.
pub fn poster_url(path: Option<&str>, size: &str) -> String {
    image_url(path, size, POSTER_PLACEHOLDER_URL)
}

/// Resolves a backdrop path to a CDN URL, or the backdrop placeholder when absent.
pub fn backdrop_url(path: Option<&str>, size: &str) -> String {
    image_url(path, size, BACKDROP_PLACEHOLDER_URL)
}

/// Formats a runtime in minutes as `H:MM:00`; missing or zero runtimes render as `N/A`.
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(minutes) if minutes > 0 => format!("{}:{:02}:00", minutes / 60, minutes % 60),
        _ => "N/A".to_string(),
    }
}
