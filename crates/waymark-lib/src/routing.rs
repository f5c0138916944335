use tracing::{debug, warn};

use crate::cache::{CacheStats, PathCache};
use crate::map::TravelGraph;
use crate::path::{shortest_path, PathResult};

/// Request/response facade over the travel graph, the shortest-path engine,
/// and the path cache.
///
/// Constructed explicitly with an injected graph provider; the service owns
/// its cache exclusively and nothing else. Queries are synchronous and run
/// to completion; callers that share a service across threads must serialize
/// access themselves.
///
/// The service does not watch the graph for changes. Whatever component
/// mutates connectivity must call [`RoutingService::invalidate_cache`] (or
/// [`RoutingService::rebuild_cache`]) afterwards, or later queries will
/// serve stale results.
#[derive(Debug)]
pub struct RoutingService<G: TravelGraph> {
    graph: G,
    cache: PathCache,
}

impl<G: TravelGraph> RoutingService<G> {
    /// Create a service over the given graph provider.
    ///
    /// The provider can be owned or borrowed; `TravelGraph` is implemented
    /// for references, so `RoutingService::new(&map)` leaves the map with
    /// the caller.
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            cache: PathCache::new(),
        }
    }

    /// Access the underlying graph provider.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Mutable access to the graph provider for callers that own it through
    /// the service. Any connectivity change made here must be followed by
    /// [`RoutingService::invalidate_cache`], otherwise later queries serve
    /// stale results.
    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    /// Compute (or recall) the minimum-cost path between two locations.
    ///
    /// Empty identifiers are a caller mistake and yield a non-reachable
    /// result with a warning rather than a panic. Reachable results are
    /// cached; non-reachable ones never are.
    pub fn find_path(&mut self, origin: &str, destination: &str) -> PathResult {
        if origin.is_empty() || destination.is_empty() {
            warn!(origin, destination, "find_path called with empty location id");
            return PathResult::unreachable();
        }

        if origin == destination {
            if self.graph.location(origin).is_none() {
                debug!(origin, "unknown location in same-location query");
                return PathResult::unreachable();
            }
            return PathResult::trivial(origin);
        }

        if let Some(hit) = self.cache.lookup(origin, destination) {
            return hit.clone();
        }

        debug!(origin, destination, "cache miss, running path search");
        let result = shortest_path(&self.graph, origin, destination);
        if result.reachable {
            self.cache.store(origin, destination, result.clone());
        }
        result
    }

    /// Whether any traversable path leads from `origin` to `destination`.
    pub fn can_reach(&mut self, origin: &str, destination: &str) -> bool {
        self.find_path(origin, destination).reachable
    }

    /// Total cost of the cheapest path, or `None` when the destination is
    /// not reachable.
    pub fn total_cost(&mut self, origin: &str, destination: &str) -> Option<i64> {
        let result = self.find_path(origin, destination);
        result.reachable.then_some(result.total_cost)
    }

    /// Discard every cached result. Must be called after any connectivity
    /// change in the underlying graph.
    pub fn invalidate_cache(&mut self) {
        self.cache.invalidate_all();
    }

    /// Precompute shortest paths for every ordered pair of locations.
    pub fn rebuild_cache(&mut self) {
        self.cache.rebuild_all(&self.graph);
    }

    /// Diagnostic snapshot of the cache contents.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
