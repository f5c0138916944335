use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::map::TravelGraph;

/// One edge of a computed path, with its resolved cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub from: String,
    pub to: String,
    pub cost: i64,
}

/// Complete answer to a shortest-path query.
///
/// `total_cost` is only meaningful when `reachable` is `true`. A reachable
/// result always has at least one path element, and exactly one when the
/// origin and destination coincide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResult {
    pub reachable: bool,
    pub total_cost: i64,
    pub path: Vec<String>,
    pub segments: Vec<Segment>,
}

impl PathResult {
    /// Result reported when no traversable path exists.
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            total_cost: 0,
            path: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Result for a query whose origin and destination coincide.
    pub fn trivial(id: impl Into<String>) -> Self {
        Self {
            reachable: true,
            total_cost: 0,
            path: vec![id.into()],
            segments: Vec::new(),
        }
    }

    /// Number of hops in the path.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Compute the minimum-cost path from `origin` to `destination`.
///
/// Classic Dijkstra over non-negative integer weights. Minimum selection is
/// a linear scan over the unsettled set, O(V) per iteration and O(V^2)
/// overall, which is the right trade for maps of tens of locations. Use
/// [`shortest_path_heap`] for larger graphs; both produce cost-identical
/// results. Ties between equally cheap unsettled locations are broken
/// arbitrarily.
///
/// Unknown endpoints and disconnected pairs are reported through
/// [`PathResult::unreachable`], never an error. Connections that are closed
/// or have a non-positive cost are never traversed.
pub fn shortest_path<G: TravelGraph + ?Sized>(
    graph: &G,
    origin: &str,
    destination: &str,
) -> PathResult {
    let Some((origin_id, destination_id)) = resolve_endpoints(graph, origin, destination) else {
        return PathResult::unreachable();
    };
    if origin_id == destination_id {
        return PathResult::trivial(origin_id);
    }

    let mut costs: HashMap<&str, i64> = HashMap::new();
    let mut predecessors: HashMap<&str, &str> = HashMap::new();
    let mut unsettled: HashSet<&str> = graph
        .locations()
        .iter()
        .map(|location| location.id.as_str())
        .collect();

    costs.insert(origin_id, 0);

    loop {
        // Scan the unsettled set for the cheapest candidate. A location with
        // no cost entry is at infinity and can never be selected.
        let cheapest = unsettled
            .iter()
            .filter_map(|id| costs.get(id).map(|cost| (*id, *cost)))
            .min_by_key(|(_, cost)| *cost);

        let Some((current, current_cost)) = cheapest else {
            debug!(origin, destination, "no traversable path");
            return PathResult::unreachable();
        };

        if current == destination_id {
            return reconstruct_result(
                graph,
                &predecessors,
                origin_id,
                destination_id,
                current_cost,
            );
        }

        unsettled.remove(current);
        let Some(location) = graph.location(current) else {
            continue;
        };

        for connection in &location.connections {
            if !connection.traversable() {
                continue;
            }
            let next = connection.destination_id.as_str();
            if !unsettled.contains(next) {
                continue;
            }
            let candidate = current_cost + connection.cost;
            if candidate < *costs.get(next).unwrap_or(&i64::MAX) {
                costs.insert(next, candidate);
                predecessors.insert(next, current);
            }
        }
    }
}

/// Binary-heap variant of [`shortest_path`] for larger graphs.
///
/// Identical observable behavior; only the minimum-selection strategy
/// differs.
pub fn shortest_path_heap<G: TravelGraph + ?Sized>(
    graph: &G,
    origin: &str,
    destination: &str,
) -> PathResult {
    let Some((origin_id, destination_id)) = resolve_endpoints(graph, origin, destination) else {
        return PathResult::unreachable();
    };
    if origin_id == destination_id {
        return PathResult::trivial(origin_id);
    }

    let mut costs: HashMap<&str, i64> = HashMap::new();
    let mut predecessors: HashMap<&str, &str> = HashMap::new();
    let mut queue = BinaryHeap::new();

    costs.insert(origin_id, 0);
    queue.push(QueueEntry {
        id: origin_id,
        cost: 0,
    });

    while let Some(entry) = queue.pop() {
        // Skip entries made stale by a cheaper relaxation.
        if entry.cost > *costs.get(entry.id).unwrap_or(&i64::MAX) {
            continue;
        }

        if entry.id == destination_id {
            return reconstruct_result(graph, &predecessors, origin_id, destination_id, entry.cost);
        }

        let Some(location) = graph.location(entry.id) else {
            continue;
        };

        for connection in &location.connections {
            if !connection.traversable() {
                continue;
            }
            let next = connection.destination_id.as_str();
            if graph.location(next).is_none() {
                continue;
            }
            let candidate = entry.cost + connection.cost;
            if candidate < *costs.get(next).unwrap_or(&i64::MAX) {
                costs.insert(next, candidate);
                predecessors.insert(next, entry.id);
                queue.push(QueueEntry {
                    id: next,
                    cost: candidate,
                });
            }
        }
    }

    debug!(origin, destination, "no traversable path");
    PathResult::unreachable()
}

fn resolve_endpoints<'graph, G: TravelGraph + ?Sized>(
    graph: &'graph G,
    origin: &str,
    destination: &str,
) -> Option<(&'graph str, &'graph str)> {
    let Some(origin_location) = graph.location(origin) else {
        debug!(origin, "unknown origin location");
        return None;
    };
    let Some(destination_location) = graph.location(destination) else {
        debug!(destination, "unknown destination location");
        return None;
    };
    Some((
        origin_location.id.as_str(),
        destination_location.id.as_str(),
    ))
}

/// Walk predecessors backward from the destination, then derive segments by
/// re-resolving each consecutive pair's cheapest traversable connection.
fn reconstruct_result<G: TravelGraph + ?Sized>(
    graph: &G,
    predecessors: &HashMap<&str, &str>,
    origin: &str,
    destination: &str,
    total_cost: i64,
) -> PathResult {
    let mut path = Vec::new();
    let mut current = Some(destination);
    while let Some(id) = current {
        path.push(id.to_string());
        if id == origin {
            break;
        }
        current = predecessors.get(id).copied();
    }
    path.reverse();

    let segments = path
        .windows(2)
        .map(|pair| Segment {
            from: pair[0].clone(),
            to: pair[1].clone(),
            cost: traversable_edge_cost(graph, &pair[0], &pair[1]),
        })
        .collect();

    PathResult {
        reachable: true,
        total_cost,
        path,
        segments,
    }
}

fn traversable_edge_cost<G: TravelGraph + ?Sized>(graph: &G, from: &str, to: &str) -> i64 {
    graph
        .location(from)
        .into_iter()
        .flat_map(|location| &location.connections)
        .filter(|connection| connection.destination_id == to && connection.traversable())
        .map(|connection| connection.cost)
        .min()
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry<'a> {
    id: &'a str,
    cost: i64,
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.id.cmp(self.id))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
