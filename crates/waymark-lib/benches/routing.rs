use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;

use waymark_lib::{
    shortest_path, shortest_path_heap, Connection, Location, RoutingService, TravelMap,
};

/// Ladder-shaped map: two parallel rails of `RAIL_LENGTH` locations with
/// rungs between them, enough branching to make the search non-trivial.
const RAIL_LENGTH: usize = 40;

static MAP: Lazy<TravelMap> = Lazy::new(|| {
    let mut map = TravelMap::new();
    for rail in 0..2usize {
        for step in 0..RAIL_LENGTH {
            let mut location = Location::new(format!("rail{rail}-{step}"));
            let mut link = |target: String, cost: i64| {
                location.connections.push(Connection {
                    destination_id: target,
                    cost,
                    available: true,
                });
            };
            if step > 0 {
                link(format!("rail{rail}-{}", step - 1), 2);
            }
            if step + 1 < RAIL_LENGTH {
                link(format!("rail{rail}-{}", step + 1), 2);
            }
            // Rung to the other rail, cheaper on even steps.
            link(
                format!("rail{}-{step}", 1 - rail),
                if step % 2 == 0 { 1 } else { 3 },
            );
            map.insert(location).expect("unique ids");
        }
    }
    map
});

fn benchmark_routing(c: &mut Criterion) {
    let map = &*MAP;
    let origin = "rail0-0";
    let destination = format!("rail1-{}", RAIL_LENGTH - 1);

    c.bench_function("shortest_path_scan", |b| {
        b.iter(|| {
            let result = shortest_path(map, origin, &destination);
            black_box(result.total_cost)
        });
    });

    c.bench_function("shortest_path_heap", |b| {
        b.iter(|| {
            let result = shortest_path_heap(map, origin, &destination);
            black_box(result.total_cost)
        });
    });

    c.bench_function("routing_service_cached", |b| {
        let mut service = RoutingService::new(map);
        // Prime the cache so the measured loop exercises the hit path.
        let _ = service.find_path(origin, &destination);
        b.iter(|| {
            let result = service.find_path(origin, &destination);
            black_box(result.total_cost)
        });
    });
}

criterion_group!(benches, benchmark_routing);
criterion_main!(benches);
