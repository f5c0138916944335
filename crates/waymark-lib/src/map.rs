use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Minimum similarity score before a location id is offered as a suggestion.
const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Directed, weighted, toggleable edge from one location to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Identifier of the location this connection leads to.
    pub destination_id: String,
    /// Traversal cost. Connections with a non-positive cost are never
    /// traversable, regardless of availability.
    pub cost: i64,
    /// Whether the connection is currently open for travel.
    pub available: bool,
}

impl Connection {
    /// Whether this connection can be used for travel at all.
    pub fn traversable(&self) -> bool {
        self.available && self.cost > 0
    }
}

/// A node in the travel graph, identified by a stable string id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    /// Human-readable name used by presentation code. The routing engine
    /// itself only ever works with ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Location {
    /// Create a location with no connections.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            connections: Vec::new(),
        }
    }
}

/// Read-only view of a travel graph consumed by the routing engine.
///
/// Implementations report the data as-is; the engine enforces the
/// traversability rules (availability, positive cost) on top of it.
pub trait TravelGraph {
    /// Return every known location.
    fn locations(&self) -> Vec<&Location>;

    /// Resolve a location by its identifier.
    fn location(&self, id: &str) -> Option<&Location>;

    /// Whether any connection record leads directly from `from` to `to`,
    /// open or not.
    fn are_connected(&self, from: &str, to: &str) -> bool {
        self.location(from)
            .map(|location| {
                location
                    .connections
                    .iter()
                    .any(|connection| connection.destination_id == to)
            })
            .unwrap_or(false)
    }

    /// Cheapest traversable direct connection from `from` to `to`.
    ///
    /// This is a fast path for callers that only care about adjacent
    /// locations; the shortest-path engine does not use it.
    fn direct_cost(&self, from: &str, to: &str) -> Option<i64> {
        self.location(from).and_then(|location| {
            location
                .connections
                .iter()
                .filter(|connection| connection.destination_id == to && connection.traversable())
                .map(|connection| connection.cost)
                .min()
        })
    }
}

impl<T: TravelGraph + ?Sized> TravelGraph for &T {
    fn locations(&self) -> Vec<&Location> {
        (**self).locations()
    }

    fn location(&self, id: &str) -> Option<&Location> {
        (**self).location(id)
    }
}

/// In-memory travel map keyed by location id.
#[derive(Debug, Clone, Default)]
pub struct TravelMap {
    locations: HashMap<String, Location>,
}

impl TravelMap {
    /// Create an empty travel map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of known locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the map contains no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Insert a location, rejecting duplicate identifiers.
    pub fn insert(&mut self, location: Location) -> Result<()> {
        if self.locations.contains_key(&location.id) {
            return Err(Error::DuplicateLocation { id: location.id });
        }
        self.locations.insert(location.id.clone(), location);
        Ok(())
    }

    /// Toggle availability on every connection from `from` to `to`.
    ///
    /// Returns `true` if any connection changed. Callers that own a routing
    /// service over this map must invalidate its cache afterwards.
    pub fn set_available(&mut self, from: &str, to: &str, available: bool) -> bool {
        let Some(location) = self.locations.get_mut(from) else {
            return false;
        };
        let mut changed = false;
        for connection in &mut location.connections {
            if connection.destination_id == to && connection.available != available {
                connection.available = available;
                changed = true;
            }
        }
        changed
    }

    /// Add an outbound connection to an existing location.
    pub fn add_connection(&mut self, from: &str, connection: Connection) -> bool {
        match self.locations.get_mut(from) {
            Some(location) => {
                location.connections.push(connection);
                true
            }
            None => false,
        }
    }

    /// Remove every connection from `from` to `to`. Returns the number of
    /// connections removed.
    pub fn remove_connection(&mut self, from: &str, to: &str) -> usize {
        let Some(location) = self.locations.get_mut(from) else {
            return 0;
        };
        let before = location.connections.len();
        location
            .connections
            .retain(|connection| connection.destination_id != to);
        before - location.connections.len()
    }

    /// Location ids similar to `name`, best match first.
    ///
    /// Used to build "did you mean" suggestions when resolution fails.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .locations
            .keys()
            .map(|id| (strsim::jaro_winkler(name, id), id.as_str()))
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.to_string())
            .collect()
    }
}

impl TravelGraph for TravelMap {
    fn locations(&self) -> Vec<&Location> {
        self.locations.values().collect()
    }

    fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }
}

/// On-disk travel-map document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TravelMapDocument {
    locations: Vec<Location>,
}

/// Load a travel map from a JSON document.
///
/// The loader rejects duplicate location ids and drops connections whose
/// destination does not exist in the document, so corrupt edges never enter
/// the in-memory graph.
pub fn load_travel_map(path: &Path) -> Result<TravelMap> {
    if !path.exists() {
        return Err(Error::MapNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path)?;
    let document: TravelMapDocument = serde_json::from_str(&contents)?;
    debug!(
        path = %path.display(),
        locations = document.locations.len(),
        "loading travel map"
    );

    let mut map = TravelMap::new();
    for location in &document.locations {
        map.insert(Location::new(location.id.clone()))?;
    }

    for mut location in document.locations {
        let (kept, dropped): (Vec<_>, Vec<_>) = location
            .connections
            .into_iter()
            .partition(|connection| map.location(&connection.destination_id).is_some());
        for connection in dropped {
            warn!(
                from = %location.id,
                to = %connection.destination_id,
                "dropping connection to unknown destination"
            );
        }
        location.connections = kept;
        // Placeholder inserted above; replace it with the full record.
        map.locations.insert(location.id.clone(), location);
    }

    Ok(map)
}
