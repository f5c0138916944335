//! Waymark library entry points.
//!
//! This crate exposes helpers to load a travel map into memory, compute
//! minimum-cost routes between locations, memoize results in a path cache,
//! and render computed routes for display. Higher-level consumers (CLI,
//! game logic) should only depend on the types exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod cache;
pub mod error;
pub mod map;
pub mod output;
pub mod path;
pub mod routing;

pub use cache::{CacheStats, PathCache};
pub use error::{Error, Result};
pub use map::{load_travel_map, Connection, Location, TravelGraph, TravelMap};
pub use output::{RouteRenderMode, RouteSummary};
pub use path::{shortest_path, shortest_path_heap, PathResult, Segment};
pub use routing::RoutingService;
