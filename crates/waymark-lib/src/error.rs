use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the waymark library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Route queries themselves never produce an `Error`: the routing surface
/// reports failure through [`crate::PathResult::reachable`]. This enum covers
/// the surrounding concerns, loading a travel map from disk and resolving
/// caller-supplied location names at an outer boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// Travel map could not be located at the resolved path.
    #[error("travel map not found at {path}")]
    MapNotFound { path: PathBuf },

    /// Raised when a travel-map document declares the same location twice.
    #[error("duplicate location id in travel map: {id}")]
    DuplicateLocation { id: String },

    /// Raised when a location name could not be found in the travel map.
    #[error("unknown location: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route could be found between two locations.
    #[error("no route found between {origin} and {destination}")]
    RouteNotFound { origin: String, destination: String },

    /// Raised when a route summary is requested for an empty or
    /// unreachable result.
    #[error("route result has no traversable path to summarise")]
    EmptyRoute,

    /// Wrapper for travel-map JSON parsing errors.
    #[error(transparent)]
    MapParse(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_location_lists_suggestions() {
        let error = Error::UnknownLocation {
            name: "harbor".to_string(),
            suggestions: vec!["harbour".to_string(), "arbor".to_string()],
        };
        let message = format!("{error}");
        assert!(message.contains("unknown location: harbor"));
        assert!(message.contains("'harbour'"));
        assert!(message.contains("'arbor'"));
    }

    #[test]
    fn unknown_location_without_suggestions_stays_short() {
        let error = Error::UnknownLocation {
            name: "nowhere".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(format!("{error}"), "unknown location: nowhere");
    }
}
