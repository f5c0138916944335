use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use waymark_lib::{
    load_travel_map, Error as LibError, RouteRenderMode, RouteSummary, RoutingService, TravelGraph,
    TravelMap,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Waymark travel-map utilities")]
struct Cli {
    /// Path to the travel-map JSON document.
    #[arg(long)]
    map: PathBuf,

    /// Emit machine-readable JSON instead of text.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the cheapest route between two locations.
    Route {
        /// Origin location id.
        #[arg(long = "from")]
        from: String,
        /// Destination location id.
        #[arg(long = "to")]
        to: String,
    },
    /// Report whether one location can reach another.
    Reach {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
    },
    /// Print the total travel cost between two locations.
    Cost {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
    },
    /// Rebuild the path cache for the map and print its statistics.
    Stats,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let map = load_map(&cli.map)?;
    let mut service = RoutingService::new(map);

    match cli.command {
        Command::Route { from, to } => handle_route(&mut service, &from, &to, cli.json),
        Command::Reach { from, to } => handle_reach(&mut service, &from, &to),
        Command::Cost { from, to } => handle_cost(&mut service, &from, &to),
        Command::Stats => handle_stats(&mut service, cli.json),
    }
}

fn load_map(path: &Path) -> Result<TravelMap> {
    load_travel_map(path)
        .with_context(|| format!("failed to load travel map from {}", path.display()))
}

fn handle_route(
    service: &mut RoutingService<TravelMap>,
    from: &str,
    to: &str,
    json: bool,
) -> Result<()> {
    resolve_location(service.graph(), from)?;
    resolve_location(service.graph(), to)?;

    let result = service.find_path(from, to);
    if !result.reachable {
        return Err(LibError::RouteNotFound {
            origin: from.to_string(),
            destination: to.to_string(),
        }
        .into());
    }

    let summary = RouteSummary::from_result(service.graph(), &result)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.render(RouteRenderMode::PlainText));
    }
    Ok(())
}

fn handle_reach(service: &mut RoutingService<TravelMap>, from: &str, to: &str) -> Result<()> {
    resolve_location(service.graph(), from)?;
    resolve_location(service.graph(), to)?;

    if service.can_reach(from, to) {
        println!("{} is reachable from {}", to, from);
    } else {
        println!("{} is not reachable from {}", to, from);
    }
    Ok(())
}

fn handle_cost(service: &mut RoutingService<TravelMap>, from: &str, to: &str) -> Result<()> {
    resolve_location(service.graph(), from)?;
    resolve_location(service.graph(), to)?;

    match service.total_cost(from, to) {
        Some(cost) => println!("{}", cost),
        None => println!("{} is not reachable from {}", to, from),
    }
    Ok(())
}

fn handle_stats(service: &mut RoutingService<TravelMap>, json: bool) -> Result<()> {
    service.rebuild_cache();
    let stats = service.cache_stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!(
            "Cache: {} entries across {} origins (fully built: {})",
            stats.entries, stats.origins, stats.fully_built
        );
    }
    Ok(())
}

fn resolve_location(map: &TravelMap, name: &str) -> Result<()> {
    if map.location(name).is_some() {
        return Ok(());
    }
    Err(LibError::UnknownLocation {
        name: name.to_string(),
        suggestions: map.fuzzy_matches(name, 3),
    }
    .into())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
