use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info};

use crate::map::TravelGraph;
use crate::path::{shortest_path, PathResult};

/// Diagnostic snapshot of the cache contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Total number of cached (origin, destination) entries.
    pub entries: usize,
    /// Number of distinct origins with at least one cached entry.
    pub origins: usize,
    /// Whether the cache was populated by a full rebuild and not
    /// invalidated since.
    pub fully_built: bool,
}

/// Memoizes path results keyed by the ordered (origin, destination) pair.
///
/// Entries are immutable once stored; the only mutation is wholesale
/// invalidation when the underlying graph's connectivity changes. The owner
/// is responsible for calling [`PathCache::invalidate_all`] after any
/// connection is added, removed, or toggled — the cache cannot detect a
/// changed graph on its own, and stale entries are silently served until it
/// is told.
#[derive(Debug, Clone, Default)]
pub struct PathCache {
    entries: HashMap<(String, String), PathResult>,
    fully_built: bool,
}

impl PathCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached result for the pair, if present.
    pub fn lookup(&self, origin: &str, destination: &str) -> Option<&PathResult> {
        self.entries
            .get(&(origin.to_string(), destination.to_string()))
    }

    /// Insert or overwrite the entry for the pair.
    ///
    /// Non-reachable results are rejected here so that a transient or
    /// corrected graph is re-evaluated on a later query instead of being
    /// remembered as permanently disconnected.
    pub fn store(&mut self, origin: &str, destination: &str, result: PathResult) {
        if !result.reachable {
            debug!(origin, destination, "not caching unreachable result");
            return;
        }
        self.entries
            .insert((origin.to_string(), destination.to_string()), result);
    }

    /// Discard every entry and mark the cache as not fully built.
    pub fn invalidate_all(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.fully_built = false;
        debug!(dropped, "path cache invalidated");
    }

    /// Precompute and store the shortest path for every ordered pair of
    /// distinct known locations.
    ///
    /// Pairs proven unreachable are simply omitted. This is O(V^2) engine
    /// invocations and is intended to run once at startup or after a bulk
    /// graph edit, not per query.
    pub fn rebuild_all<G: TravelGraph + ?Sized>(&mut self, graph: &G) {
        self.entries.clear();

        let ids: Vec<String> = graph
            .locations()
            .iter()
            .map(|location| location.id.clone())
            .collect();

        let mut unreachable_pairs = 0usize;
        for origin in &ids {
            for destination in &ids {
                if origin == destination {
                    continue;
                }
                let result = shortest_path(graph, origin, destination);
                if result.reachable {
                    self.entries
                        .insert((origin.clone(), destination.clone()), result);
                } else {
                    unreachable_pairs += 1;
                }
            }
        }

        self.fully_built = true;
        info!(
            locations = ids.len(),
            entries = self.entries.len(),
            unreachable_pairs,
            "path cache rebuilt"
        );
    }

    /// Whether the cache was populated by [`PathCache::rebuild_all`] and not
    /// invalidated since.
    pub fn is_fully_built(&self) -> bool {
        self.fully_built
    }

    /// Current entry count and origin spread.
    pub fn stats(&self) -> CacheStats {
        let origins: HashSet<&str> = self
            .entries
            .keys()
            .map(|(origin, _)| origin.as_str())
            .collect();
        CacheStats {
            entries: self.entries.len(),
            origins: origins.len(),
            fully_built: self.fully_built,
        }
    }
}
