use log::{debug, info};

use super::layout::{LayoutEngine, LayoutParams, Viewport};
use super::palette::{HOVER_RADIUS, NODE_RADIUS, SELECTED_RADIUS};
use super::types::{EdgeKind, GraphData, GraphNode, NodeKind, Point, RiskLevel};

/// One row of the "connected to" list.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
	/// Label of the node on the other end.
	pub label: String,
	/// Kind of the link that connects them.
	pub kind: EdgeKind,
}

/// What the detail panel shows for the selected node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDetails {
	pub id: String,
	pub kind: NodeKind,
	pub label: String,
	pub risk_level: RiskLevel,
	pub connections: Vec<Connection>,
}

/// Footer counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
	pub total_nodes: usize,
	pub connections: usize,
	pub high_risk: usize,
	pub suspicious_links: usize,
}

impl From<&GraphData> for GraphStats {
	fn from(data: &GraphData) -> Self {
		Self {
			total_nodes: data.nodes.len(),
			connections: data.links.len(),
			high_risk: data
				.nodes
				.iter()
				.filter(|n| n.risk_level == RiskLevel::High)
				.count(),
			suspicious_links: data.links.iter().filter(|l| l.kind.is_suspicious()).count(),
		}
	}
}

/// Laid-out graph plus pointer interaction, owned by one canvas.
pub struct NetworkGraphState {
	pub graph: GraphData,
	engine: LayoutEngine,
	hovered: Option<usize>,
	selected: Option<usize>,
	pub needs_redraw: bool,
}

impl NetworkGraphState {
	/// Builds the layout once; the graph is read-only afterwards.
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		Self::with_params(data, Viewport::new(width, height), LayoutParams::default())
	}

	/// Same as [`new`](Self::new) with explicit layout parameters.
	pub fn with_params(data: &GraphData, viewport: Viewport, params: LayoutParams) -> Self {
		let mut graph = data.clone();
		let engine = LayoutEngine::new(viewport, params);
		engine.layout(&mut graph);
		info!(
			"network graph ready: {} nodes, {} links, {}x{}",
			graph.nodes.len(),
			graph.links.len(),
			viewport.width,
			viewport.height
		);

		Self {
			graph,
			engine,
			hovered: None,
			selected: None,
			needs_redraw: true,
		}
	}

	/// Surface the graph was laid out for.
	pub fn viewport(&self) -> Viewport {
		self.engine.viewport()
	}

	/// Index of the node under the pointer, in canvas coordinates.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<usize> {
		self.engine.hit_test_index(&self.graph, Point::new(x, y))
	}

	/// Returns whether the hovered node changed.
	pub fn set_hover(&mut self, node: Option<usize>) -> bool {
		if self.hovered == node {
			return false;
		}
		self.hovered = node;
		self.needs_redraw = true;
		true
	}

	/// Selects whatever is under the pointer, or clears the selection on empty space.
	pub fn click(&mut self) -> Option<NodeDetails> {
		if self.selected != self.hovered {
			self.selected = self.hovered;
			self.needs_redraw = true;
		}
		if let Some(node) = self.selected_node() {
			debug!("selected node {}", node.id);
		}
		self.selected_details()
	}

	/// Drops the selection, e.g. when the detail panel is closed.
	pub fn clear_selection(&mut self) {
		if self.selected.take().is_some() {
			self.needs_redraw = true;
		}
	}

	pub fn selected_node(&self) -> Option<&GraphNode> {
		self.selected.map(|i| &self.graph.nodes[i])
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hovered == Some(idx)
	}

	pub fn is_selected(&self, idx: usize) -> bool {
		self.selected == Some(idx)
	}

	/// Drawn radius; selection outranks hover.
	pub fn node_radius(&self, idx: usize) -> f64 {
		if self.is_selected(idx) {
			SELECTED_RADIUS
		} else if self.is_hovered(idx) {
			HOVER_RADIUS
		} else {
			NODE_RADIUS
		}
	}

	/// Detail panel contents for the selected node.
	pub fn selected_details(&self) -> Option<NodeDetails> {
		let node = self.selected_node()?;
		let connections = self
			.graph
			.neighbors(&node.id)
			.map(|(other, kind)| Connection {
				label: other.label.clone(),
				kind,
			})
			.collect();

		Some(NodeDetails {
			id: node.id.clone(),
			kind: node.kind,
			label: node.label.clone(),
			risk_level: node.risk_level,
			connections,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn demo_state() -> NetworkGraphState {
		NetworkGraphState::new(&GraphData::demo(), 800.0, 600.0)
	}

	fn center_of(state: &NetworkGraphState, id: &str) -> (f64, f64) {
		let p = state.graph.node(id).and_then(GraphNode::position).unwrap();
		(p.x, p.y)
	}

	#[test]
	fn new_lays_out_every_node() {
		let state = demo_state();
		assert!(state.needs_redraw);
		assert!(state.graph.nodes.iter().all(|n| n.position().is_some()));
		assert_eq!(state.viewport(), Viewport::new(800.0, 600.0));
	}

	#[test]
	fn hover_then_click_selects() {
		let mut state = demo_state();
		let (x, y) = center_of(&state, "A1");
		let hit = state.node_at_position(x, y);
		assert_eq!(hit, Some(0));

		state.needs_redraw = false;
		assert!(state.set_hover(hit));
		assert!(state.needs_redraw);
		assert!(!state.set_hover(hit));
		assert_eq!(state.node_radius(0), HOVER_RADIUS);

		let details = state.click().unwrap();
		assert_eq!(details.id, "A1");
		assert_eq!(details.kind, NodeKind::Account);
		assert_eq!(details.risk_level, RiskLevel::High);
		assert_eq!(details.connections.len(), 4);
		assert_eq!(
			details.connections[0],
			Connection {
				label: "Merchant X".into(),
				kind: EdgeKind::Transaction,
			}
		);
		assert_eq!(state.node_radius(0), SELECTED_RADIUS);
		assert_eq!(state.node_radius(1), NODE_RADIUS);
	}

	#[test]
	fn click_on_empty_space_clears_selection() {
		let mut state = demo_state();
		state.set_hover(Some(4));
		assert!(state.click().is_some());

		state.set_hover(None);
		assert!(state.click().is_none());
		assert!(state.selected_node().is_none());
	}

	#[test]
	fn clear_selection_requests_redraw_once() {
		let mut state = demo_state();
		state.set_hover(Some(2));
		state.click();
		state.needs_redraw = false;

		state.clear_selection();
		assert!(state.needs_redraw);
		state.needs_redraw = false;
		state.clear_selection();
		assert!(!state.needs_redraw);
	}

	#[test]
	fn stats_match_demo() {
		let state = demo_state();
		assert_eq!(
			GraphStats::from(&state.graph),
			GraphStats {
				total_nodes: 8,
				connections: 9,
				high_risk: 4,
				suspicious_links: 5,
			}
		);
	}
}
