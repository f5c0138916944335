use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::map::TravelGraph;
use crate::path::PathResult;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Endpoint within a summarised route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteEndpoint {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteEndpoint {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// One traversed edge with display metadata resolved.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub index: usize,
    pub from: RouteEndpoint,
    pub to: RouteEndpoint,
    pub cost: i64,
}

/// Structured representation of a computed route that higher-level consumers
/// can serialise or render.
///
/// Display metadata is resolved here, on the presentation side; the routing
/// engine itself never touches location names.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub origin: RouteEndpoint,
    pub destination: RouteEndpoint,
    pub total_cost: i64,
    pub hops: usize,
    pub legs: Vec<RouteLeg>,
}

impl RouteSummary {
    /// Convert a [`PathResult`] into a summary with resolved display names.
    ///
    /// Fails with [`Error::EmptyRoute`] when the result is not reachable;
    /// there is nothing to summarise in that case.
    pub fn from_result<G: TravelGraph + ?Sized>(graph: &G, result: &PathResult) -> Result<Self> {
        if !result.reachable || result.path.is_empty() {
            return Err(Error::EmptyRoute);
        }

        let endpoint = |id: &str| RouteEndpoint {
            id: id.to_string(),
            name: graph
                .location(id)
                .and_then(|location| location.display_name.clone()),
        };

        let legs = result
            .segments
            .iter()
            .enumerate()
            .map(|(index, segment)| RouteLeg {
                index,
                from: endpoint(&segment.from),
                to: endpoint(&segment.to),
                cost: segment.cost,
            })
            .collect();

        // Validated non-empty above, so first/last always exist.
        let origin = endpoint(result.path.first().map(String::as_str).unwrap_or_default());
        let destination = endpoint(result.path.last().map(String::as_str).unwrap_or_default());

        Ok(Self {
            origin,
            destination,
            total_cost: result.total_cost,
            hops: result.hop_count(),
            legs,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, total cost {})",
            self.origin.display_name(),
            self.destination.display_name(),
            self.hops,
            self.total_cost
        );
        for leg in &self.legs {
            let _ = writeln!(
                buffer,
                "{:>3}: {} -> {} (cost {})",
                leg.index,
                leg.from.display_name(),
                leg.to.display_name(),
                leg.cost
            );
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} -> {}_ ({} hops, total cost `{}`)",
            self.origin.display_name(),
            self.destination.display_name(),
            self.hops,
            self.total_cost
        );
        for leg in &self.legs {
            let _ = writeln!(
                buffer,
                "* {:>2}. **{}** -> **{}** (`{}`)",
                leg.index,
                leg.from.display_name(),
                leg.to.display_name(),
                leg.cost
            );
        }
        buffer
    }
}
