//! Fixed color and size tables for node and link glyphs.

use super::types::{EdgeKind, NodeKind, RiskLevel};

/// Resting glyph radius; matches the layout's hit radius.
pub const NODE_RADIUS: f64 = 15.0;
/// Radius of the node under the pointer.
pub const HOVER_RADIUS: f64 = 18.0;
/// Radius of the node shown in the detail panel.
pub const SELECTED_RADIUS: f64 = 20.0;

const RED: &str = "#ef4444";
const AMBER: &str = "#f59e0b";
const GREEN: &str = "#10b981";
const BLUE: &str = "#3b82f6";
const VIOLET: &str = "#8b5cf6";
const GRAY: &str = "#6b7280";

/// How a node glyph is filled and sized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
	/// CSS color.
	pub fill: &'static str,
	/// Pixels, before hover or selection enlargement.
	pub radius: f64,
}

/// How a link is stroked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
	/// CSS color.
	pub color: &'static str,
	/// Line width in pixels.
	pub width: f64,
	/// Dash pattern in pixels; empty for a solid line.
	pub dash: &'static [f64],
}

/// Legend color for a risk level, also the fill of account nodes.
pub fn risk_color(risk: RiskLevel) -> &'static str {
	match risk {
		RiskLevel::High => RED,
		RiskLevel::Medium => AMBER,
		RiskLevel::Low => GREEN,
	}
}

impl NodeKind {
	/// Only accounts are colored by risk; other kinds have a fixed fill.
	pub fn style(&self, risk: RiskLevel) -> NodeStyle {
		let fill = match self {
			NodeKind::Account => risk_color(risk),
			NodeKind::Transaction => BLUE,
			NodeKind::Merchant => VIOLET,
			NodeKind::Ip | NodeKind::Device => GRAY,
		};
		NodeStyle {
			fill,
			radius: NODE_RADIUS,
		}
	}
}

impl EdgeKind {
	/// Solid for money and merchants, dashed for shared infrastructure.
	pub fn style(&self) -> EdgeStyle {
		match self {
			EdgeKind::Transaction => EdgeStyle {
				color: BLUE,
				width: 2.0,
				dash: &[],
			},
			EdgeKind::SharedIp => EdgeStyle {
				color: RED,
				width: 2.0,
				dash: &[5.0, 5.0],
			},
			EdgeKind::SharedDevice => EdgeStyle {
				color: AMBER,
				width: 2.0,
				dash: &[3.0, 3.0],
			},
			EdgeKind::SameMerchant => EdgeStyle {
				color: GRAY,
				width: 1.0,
				dash: &[],
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accounts_follow_risk() {
		assert_eq!(NodeKind::Account.style(RiskLevel::High).fill, RED);
		assert_eq!(NodeKind::Account.style(RiskLevel::Medium).fill, AMBER);
		assert_eq!(NodeKind::Account.style(RiskLevel::Low).fill, GREEN);
	}

	#[test]
	fn other_kinds_ignore_risk() {
		for risk in [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low] {
			assert_eq!(NodeKind::Transaction.style(risk).fill, BLUE);
			assert_eq!(NodeKind::Merchant.style(risk).fill, VIOLET);
			assert_eq!(NodeKind::Ip.style(risk).fill, GRAY);
			assert_eq!(NodeKind::Device.style(risk).radius, NODE_RADIUS);
		}
	}

	#[test]
	fn shared_links_are_dashed() {
		assert!(EdgeKind::Transaction.style().dash.is_empty());
		assert!(EdgeKind::SameMerchant.style().dash.is_empty());
		assert_eq!(EdgeKind::SameMerchant.style().width, 1.0);
		assert_eq!(EdgeKind::SharedIp.style().dash, &[5.0, 5.0]);
		assert_eq!(EdgeKind::SharedDevice.style().dash, &[3.0, 3.0]);
	}
}
