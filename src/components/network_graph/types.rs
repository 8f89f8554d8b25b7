use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a vertex in the fraud network stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
	/// Customer account.
	Account,
	/// A single payment, drawn as its own vertex.
	Transaction,
	/// Receiving merchant.
	Merchant,
	/// IP address seen on a session.
	Ip,
	/// Device fingerprint.
	Device,
}

impl NodeKind {
	/// Wire name, as used in the JSON payload.
	pub fn as_str(&self) -> &'static str {
		match self {
			NodeKind::Account => "account",
			NodeKind::Transaction => "transaction",
			NodeKind::Merchant => "merchant",
			NodeKind::Ip => "ip",
			NodeKind::Device => "device",
		}
	}
}

/// Coarse risk classification assigned by the scoring backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
	/// Likely fraud.
	High,
	/// Worth a look.
	Medium,
	/// Nothing unusual.
	Low,
}

impl RiskLevel {
	/// Wire name, as used in the JSON payload.
	pub fn as_str(&self) -> &'static str {
		match self {
			RiskLevel::High => "high",
			RiskLevel::Medium => "medium",
			RiskLevel::Low => "low",
		}
	}
}

/// Relationship carried by a link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
	/// Money moved from source to target.
	Transaction,
	/// Both ends were seen on the same IP address.
	SharedIp,
	/// Both ends were seen on the same device.
	SharedDevice,
	/// Both ends paid the same merchant.
	SameMerchant,
}

impl EdgeKind {
	/// Wire name, as used in the JSON payload.
	pub fn as_str(&self) -> &'static str {
		match self {
			EdgeKind::Transaction => "transaction",
			EdgeKind::SharedIp => "shared_ip",
			EdgeKind::SharedDevice => "shared_device",
			EdgeKind::SameMerchant => "same_merchant",
		}
	}

	/// Shared infrastructure links are the ones analysts flag as suspicious.
	pub fn is_suspicious(&self) -> bool {
		matches!(self, EdgeKind::SharedIp | EdgeKind::SharedDevice)
	}
}

/// A 2D coordinate in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	/// Horizontal, growing right.
	pub x: f64,
	/// Vertical, growing down.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance.
	pub fn distance_to(&self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// A vertex of the fraud network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Unique within one [`GraphData`].
	pub id: String,
	/// Serialized as `type`.
	#[serde(rename = "type")]
	pub kind: NodeKind,
	/// Display text shown on hover and in the detail panel.
	pub label: String,
	/// Serialized as `risk`.
	#[serde(rename = "risk")]
	pub risk_level: RiskLevel,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	x: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	y: Option<f64>,
	/// Simulation state, owned by the layout engine.
	#[serde(skip)]
	pub(super) velocity: Point,
}

impl GraphNode {
	/// Unplaced node.
	pub fn new(
		id: impl Into<String>,
		kind: NodeKind,
		label: impl Into<String>,
		risk_level: RiskLevel,
	) -> Self {
		Self {
			id: id.into(),
			kind,
			label: label.into(),
			risk_level,
			x: None,
			y: None,
			velocity: Point::default(),
		}
	}

	/// Pins a starting position; the layout moves the node from here.
	pub fn with_position(mut self, x: f64, y: f64) -> Self {
		self.set_position(Point::new(x, y));
		self
	}

	/// `None` until the node has been placed, either by the caller or by the layout engine.
	pub fn position(&self) -> Option<Point> {
		match (self.x, self.y) {
			(Some(x), Some(y)) => Some(Point::new(x, y)),
			_ => None,
		}
	}

	pub(super) fn set_position(&mut self, p: Point) {
		self.x = Some(p.x);
		self.y = Some(p.y);
	}
}

/// A directed relationship between two nodes, referenced by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
	/// Id of the source node.
	pub source: String,
	/// Id of the target node.
	pub target: String,
	/// Serialized as `type`.
	#[serde(rename = "type")]
	pub kind: EdgeKind,
	/// Only meaningful on transaction links.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<f64>,
}

impl GraphLink {
	/// Link without an amount.
	pub fn new(source: impl Into<String>, target: impl Into<String>, kind: EdgeKind) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			kind,
			amount: None,
		}
	}

	/// Sets the transaction amount.
	pub fn with_amount(mut self, amount: f64) -> Self {
		self.amount = Some(amount);
		self
	}
}

/// Why a graph payload was rejected.
#[derive(Debug, Error)]
pub enum GraphDataError {
	/// Not a `{ nodes, links }` document, or an unknown kind/risk value.
	#[error("invalid graph JSON: {0}")]
	Json(#[from] serde_json::Error),
	/// Two nodes share an id.
	#[error("duplicate node id `{0}`")]
	DuplicateNodeId(String),
}

/// Nodes and links of one network view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// Vertices; the layout writes their positions in place.
	pub nodes: Vec<GraphNode>,
	/// Links in payload order; ones with unknown endpoints are tolerated.
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Parses a `{ nodes, links }` payload as served by the backend.
	///
	/// Links pointing at unknown nodes are kept; the layout and the renderer skip them.
	pub fn from_json(json: &str) -> Result<Self, GraphDataError> {
		let data: GraphData = serde_json::from_str(json)?;
		data.validate()?;
		Ok(data)
	}

	/// Checks that node ids are unique.
	pub fn validate(&self) -> Result<(), GraphDataError> {
		let mut seen = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if !seen.insert(node.id.as_str()) {
				return Err(GraphDataError::DuplicateNodeId(node.id.clone()));
			}
		}
		Ok(())
	}

	/// Node with the given id, if any.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Nodes on the other end of every link touching `id`, in link order.
	pub fn neighbors<'a>(
		&'a self,
		id: &'a str,
	) -> impl Iterator<Item = (&'a GraphNode, EdgeKind)> + 'a {
		self.links.iter().filter_map(move |link| {
			let other = if link.source == id {
				&link.target
			} else if link.target == id {
				&link.source
			} else {
				return None;
			};
			self.node(other).map(|n| (n, link.kind))
		})
	}

	/// Small fraud ring: two high-risk accounts sharing an IP and a device.
	pub fn demo() -> Self {
		use EdgeKind as E;
		use NodeKind as K;
		use RiskLevel as R;

		let nodes = vec![
			GraphNode::new("A1", K::Account, "Account A1", R::High),
			GraphNode::new("A2", K::Account, "Account A2", R::High),
			GraphNode::new("A3", K::Account, "Account A3", R::Medium),
			GraphNode::new("A4", K::Account, "Account A4", R::Low),
			GraphNode::new("M1", K::Merchant, "Merchant X", R::Medium),
			GraphNode::new("M2", K::Merchant, "Merchant Y", R::Low),
			GraphNode::new("IP1", K::Ip, "192.168.1.1", R::High),
			GraphNode::new("D1", K::Device, "Device ABC123", R::High),
		];
		let links = vec![
			GraphLink::new("A1", "M1", E::Transaction).with_amount(5000.0),
			GraphLink::new("A2", "M1", E::Transaction).with_amount(4800.0),
			GraphLink::new("A3", "M2", E::Transaction).with_amount(200.0),
			GraphLink::new("A4", "M2", E::Transaction).with_amount(150.0),
			GraphLink::new("A1", "A2", E::SharedIp),
			GraphLink::new("A1", "IP1", E::SharedIp),
			GraphLink::new("A2", "IP1", E::SharedIp),
			GraphLink::new("A1", "D1", E::SharedDevice),
			GraphLink::new("A2", "D1", E::SharedDevice),
		];

		Self { nodes, links }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_backend_payload() {
		let json = r#"{
			"nodes": [
				{ "id": "A1", "type": "account", "label": "Account A1", "risk": "high" },
				{ "id": "IP1", "type": "ip", "label": "10.0.0.1", "risk": "low", "x": 120.0, "y": 80.0 }
			],
			"links": [
				{ "source": "A1", "target": "IP1", "type": "shared_ip" },
				{ "source": "A1", "target": "IP1", "type": "transaction", "amount": 99.5 }
			]
		}"#;
		let data = GraphData::from_json(json).unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].kind, NodeKind::Account);
		assert_eq!(data.nodes[0].position(), None);
		assert_eq!(data.nodes[1].position(), Some(Point::new(120.0, 80.0)));
		assert_eq!(data.links[0].kind, EdgeKind::SharedIp);
		assert_eq!(data.links[1].amount, Some(99.5));
	}

	#[test]
	fn half_a_position_is_no_position() {
		let json = r#"{ "nodes": [{ "id": "D1", "type": "device", "label": "d", "risk": "medium", "x": 3.0 }] }"#;
		let data = GraphData::from_json(json).unwrap();
		assert!(data.links.is_empty());
		assert_eq!(data.nodes[0].position(), None);
	}

	#[test]
	fn rejects_duplicate_ids() {
		let json = r#"{ "nodes": [
			{ "id": "A1", "type": "account", "label": "a", "risk": "high" },
			{ "id": "A1", "type": "merchant", "label": "b", "risk": "low" }
		] }"#;
		match GraphData::from_json(json) {
			Err(GraphDataError::DuplicateNodeId(id)) => assert_eq!(id, "A1"),
			other => panic!("expected duplicate id error, got {other:?}"),
		}
	}

	#[test]
	fn rejects_unknown_kind() {
		let json = r#"{ "nodes": [{ "id": "X", "type": "wallet", "label": "x", "risk": "low" }] }"#;
		assert!(matches!(GraphData::from_json(json), Err(GraphDataError::Json(_))));
	}

	#[test]
	fn neighbors_skip_dangling_links() {
		let mut data = GraphData::demo();
		data.links.push(GraphLink::new("A1", "ghost", EdgeKind::SameMerchant));

		let labels: Vec<_> = data
			.neighbors("A1")
			.map(|(n, kind)| (n.label.as_str(), kind))
			.collect();
		assert_eq!(
			labels,
			vec![
				("Merchant X", EdgeKind::Transaction),
				("Account A2", EdgeKind::SharedIp),
				("192.168.1.1", EdgeKind::SharedIp),
				("Device ABC123", EdgeKind::SharedDevice),
			]
		);
	}

	#[test]
	fn display_names_match_wire_names() {
		let quoted = |s: &str| format!("\"{s}\"");
		for kind in [
			NodeKind::Account,
			NodeKind::Transaction,
			NodeKind::Merchant,
			NodeKind::Ip,
			NodeKind::Device,
		] {
			assert_eq!(serde_json::to_string(&kind).unwrap(), quoted(kind.as_str()));
		}
		for risk in [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low] {
			assert_eq!(serde_json::to_string(&risk).unwrap(), quoted(risk.as_str()));
		}
		for kind in [
			EdgeKind::Transaction,
			EdgeKind::SharedIp,
			EdgeKind::SharedDevice,
			EdgeKind::SameMerchant,
		] {
			assert_eq!(serde_json::to_string(&kind).unwrap(), quoted(kind.as_str()));
		}
	}

	#[test]
	fn demo_is_valid() {
		let data = GraphData::demo();
		assert_eq!(data.nodes.len(), 8);
		assert_eq!(data.links.len(), 9);
		data.validate().unwrap();
		assert!(data.nodes.iter().all(|n| n.position().is_none()));
	}
}
