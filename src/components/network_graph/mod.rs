//! Fraud network graph: data model, force layout, styling and the canvas component.

mod component;
pub mod layout;
pub mod palette;
mod render;
mod state;
mod types;

pub use component::NetworkGraphCanvas;
pub use types::{
	EdgeKind, GraphData, GraphDataError, GraphLink, GraphNode, NodeKind, Point, RiskLevel,
};
