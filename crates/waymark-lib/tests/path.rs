use waymark_lib::{shortest_path, shortest_path_heap, Connection, Location, TravelMap};

fn connection(destination: &str, cost: i64, available: bool) -> Connection {
    Connection {
        destination_id: destination.to_string(),
        cost,
        available,
    }
}

fn location(id: &str, connections: Vec<Connection>) -> Location {
    let mut location = Location::new(id);
    location.connections = connections;
    location
}

/// Diamond with an expensive direct edge: a -> d costs 10, but a -> b -> d
/// and a -> c -> d cost 5 and 4.
fn diamond_map() -> TravelMap {
    let mut map = TravelMap::new();
    map.insert(location(
        "a",
        vec![
            connection("b", 2, true),
            connection("c", 1, true),
            connection("d", 10, true),
        ],
    ))
    .unwrap();
    map.insert(location("b", vec![connection("d", 3, true)]))
        .unwrap();
    map.insert(location("c", vec![connection("d", 3, true)]))
        .unwrap();
    map.insert(location("d", vec![])).unwrap();
    map
}

#[test]
fn picks_the_cheapest_of_several_routes() {
    let map = diamond_map();
    let result = shortest_path(&map, "a", "d");

    assert!(result.reachable);
    assert_eq!(result.total_cost, 4);
    assert_eq!(
        result.path,
        vec!["a".to_string(), "c".to_string(), "d".to_string()]
    );
}

#[test]
fn segment_costs_sum_to_the_total() {
    let map = diamond_map();
    let result = shortest_path(&map, "a", "d");

    let segment_sum: i64 = result.segments.iter().map(|segment| segment.cost).sum();
    assert_eq!(segment_sum, result.total_cost);
    assert_eq!(result.segments.len(), result.hop_count());
}

#[test]
fn zero_cost_connection_is_never_traversed() {
    let mut map = TravelMap::new();
    map.insert(location("a", vec![connection("b", 0, true)]))
        .unwrap();
    map.insert(location("b", vec![])).unwrap();

    let result = shortest_path(&map, "a", "b");
    assert!(!result.reachable, "a zero-cost edge must not be usable");
}

#[test]
fn negative_cost_connection_is_never_traversed() {
    let mut map = TravelMap::new();
    map.insert(location("a", vec![connection("b", -3, true)]))
        .unwrap();
    map.insert(location("b", vec![])).unwrap();

    assert!(!shortest_path(&map, "a", "b").reachable);
}

#[test]
fn closed_connection_is_skipped_even_when_cheaper() {
    let mut map = TravelMap::new();
    map.insert(location(
        "a",
        vec![connection("b", 1, false), connection("b", 6, true)],
    ))
    .unwrap();
    map.insert(location("b", vec![])).unwrap();

    let result = shortest_path(&map, "a", "b");
    assert!(result.reachable);
    assert_eq!(result.total_cost, 6);
    assert_eq!(result.segments[0].cost, 6);
}

#[test]
fn unknown_endpoints_yield_unreachable() {
    let map = diamond_map();
    assert!(!shortest_path(&map, "nowhere", "d").reachable);
    assert!(!shortest_path(&map, "a", "nowhere").reachable);
    assert!(!shortest_path(&map, "nowhere", "nowhere").reachable);
}

#[test]
fn origin_equals_destination_short_circuits() {
    let map = diamond_map();
    let result = shortest_path(&map, "a", "a");

    assert!(result.reachable);
    assert_eq!(result.total_cost, 0);
    assert_eq!(result.path, vec!["a".to_string()]);
    assert!(result.segments.is_empty());
}

#[test]
fn connections_are_directed() {
    let map = diamond_map();
    // d has no outbound connections at all.
    assert!(!shortest_path(&map, "d", "a").reachable);
}

#[test]
fn heap_variant_agrees_with_linear_scan() {
    let map = grid_map(5);
    for origin in ["r0c0", "r2c3", "r4c4"] {
        for destination in ["r0c0", "r4c4", "r1c2", "r3c0"] {
            let scan = shortest_path(&map, origin, destination);
            let heap = shortest_path_heap(&map, origin, destination);

            assert_eq!(scan.reachable, heap.reachable, "{origin} -> {destination}");
            if scan.reachable {
                assert_eq!(
                    scan.total_cost, heap.total_cost,
                    "{origin} -> {destination}"
                );
            }
        }
    }
}

/// Square grid with varied edge costs so the two implementations face real
/// tie-breaking and relaxation decisions.
fn grid_map(side: usize) -> TravelMap {
    let mut map = TravelMap::new();
    for row in 0..side {
        for col in 0..side {
            let mut connections = Vec::new();
            let mut link = |r: usize, c: usize| {
                // Deterministic but uneven weights.
                let cost = 1 + ((r * 7 + c * 3) % 5) as i64;
                connections.push(connection(&format!("r{r}c{c}"), cost, true));
            };
            if row > 0 {
                link(row - 1, col);
            }
            if row + 1 < side {
                link(row + 1, col);
            }
            if col > 0 {
                link(row, col - 1);
            }
            if col + 1 < side {
                link(row, col + 1);
            }
            map.insert(location(&format!("r{row}c{col}"), connections))
                .unwrap();
        }
    }
    map
}
