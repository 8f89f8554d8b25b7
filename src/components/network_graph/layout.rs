//! Force-directed placement of the fraud network.
//!
//! Every pass pushes all node pairs apart with an inverse-square force, pulls
//! linked nodes together like springs, then damps, integrates and clamps. The
//! pass count is fixed, so cost is `passes * (nodes^2 + links)` regardless of
//! whether the layout has settled.

use std::collections::HashMap;
use std::f64::consts::PI;

use log::{debug, warn};

use super::types::{GraphData, GraphNode, Point};

/// Tuning knobs for [`LayoutEngine`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
	/// Number of simulation passes; there is no early exit on convergence.
	pub passes: usize,
	/// Inverse-square coefficient pushing every pair apart.
	pub repulsion: f64,
	/// Spring coefficient pulling linked nodes together.
	pub attraction: f64,
	/// Velocity multiplier applied every pass, below 1.0 so the system comes to rest.
	pub damping: f64,
	/// Inset from every viewport edge that nodes are clamped to.
	pub margin: f64,
	/// Radius of the starting ring as a fraction of the shorter viewport side.
	pub ring_ratio: f64,
	/// Pointer distance, in pixels, that still counts as touching a node.
	pub hit_radius: f64,
	/// Distances below this are treated as this value in force computations.
	pub min_distance: f64,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			passes: 50,
			repulsion: 1000.0,
			attraction: 0.01,
			damping: 0.9,
			margin: 50.0,
			ring_ratio: 0.3,
			hit_radius: 15.0,
			min_distance: 1.0,
		}
	}
}

/// Surfaces measured smaller than this along an axis are treated as unsized.
pub const MIN_MEASURED_EXTENT: f64 = 200.0;
const FALLBACK_WIDTH: f64 = 800.0;
const FALLBACK_HEIGHT: f64 = 600.0;

/// Pixel size of the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl Viewport {
	/// Viewport of the given size in CSS pixels.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Picks the layout size for a canvas. An explicit size wins on each axis.
	/// Otherwise the measured container size is used. If the container is missing
	/// or collapsed to the bare canvas default, the axis falls back to 800x600.
	pub fn resolve(
		width: Option<f64>,
		height: Option<f64>,
		measured: Option<(f64, f64)>,
	) -> Self {
		let (mw, mh) = measured.unwrap_or((0.0, 0.0));
		let pick = |explicit: Option<f64>, measured: f64, fallback: f64| {
			explicit.unwrap_or(if measured >= MIN_MEASURED_EXTENT {
				measured
			} else {
				fallback
			})
		};
		Self::new(
			pick(width, mw, FALLBACK_WIDTH),
			pick(height, mh, FALLBACK_HEIGHT),
		)
	}

	/// Middle of the surface; the starting ring is centered here.
	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

/// Positions a [`GraphData`] inside a fixed viewport and answers pointer queries.
///
/// Call [`initialize`](Self::initialize) then [`simulate`](Self::simulate) once per
/// graph; hit-testing is only meaningful afterwards.
pub struct LayoutEngine {
	params: LayoutParams,
	viewport: Viewport,
}

impl LayoutEngine {
	/// Engine for one surface size.
	pub fn new(viewport: Viewport, params: LayoutParams) -> Self {
		Self { params, viewport }
	}

	/// Parameters the engine was built with.
	pub fn params(&self) -> &LayoutParams {
		&self.params
	}

	/// Surface the layout is clamped to.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Places unpositioned nodes evenly on a ring around the viewport center
	/// and zeroes every velocity. Caller-supplied positions are kept.
	pub fn initialize(&self, graph: &mut GraphData) {
		self.seed_positions(graph);
		for node in &mut graph.nodes {
			node.velocity = Point::default();
		}
	}

	/// Runs the fixed number of passes, moving nodes in place.
	pub fn simulate(&self, graph: &mut GraphData) {
		if graph.nodes.is_empty() {
			return;
		}
		self.seed_positions(graph);

		let index: HashMap<&str, usize> = graph
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();
		let mut springs = Vec::with_capacity(graph.links.len());
		for link in &graph.links {
			match (index.get(link.source.as_str()), index.get(link.target.as_str())) {
				(Some(&s), Some(&t)) => springs.push((s, t)),
				_ => debug!("skipping dangling link {} -> {}", link.source, link.target),
			}
		}

		let mut positions: Vec<Point> = graph.nodes.iter().map(node_position).collect();
		let mut velocities: Vec<Point> = graph.nodes.iter().map(|n| n.velocity).collect();

		for _ in 0..self.params.passes {
			self.repel(&positions, &mut velocities);
			self.attract(&springs, &positions, &mut velocities);
			self.integrate(&mut positions, &mut velocities);
		}

		for ((node, p), v) in graph.nodes.iter_mut().zip(positions).zip(velocities) {
			if !(p.x.is_finite() && p.y.is_finite()) {
				warn!("node {} left the layout with a non-finite position", node.id);
			}
			node.set_position(p);
			node.velocity = v;
		}
		debug!(
			"laid out {} nodes / {} links in {} passes",
			graph.nodes.len(),
			springs.len(),
			self.params.passes
		);
	}

	/// Convenience for the usual `initialize` then `simulate` sequence.
	pub fn layout(&self, graph: &mut GraphData) {
		self.initialize(graph);
		self.simulate(graph);
	}

	/// First node, in node order, whose center lies within the hit radius of `pointer`.
	pub fn hit_test<'g>(&self, graph: &'g GraphData, pointer: Point) -> Option<&'g GraphNode> {
		self.hit_test_index(graph, pointer).map(|i| &graph.nodes[i])
	}

	/// Same as [`hit_test`](Self::hit_test), returning the node's index in `graph.nodes`.
	pub fn hit_test_index(&self, graph: &GraphData, pointer: Point) -> Option<usize> {
		graph.nodes.iter().position(|node| {
			node.position()
				.is_some_and(|p| p.distance_to(pointer) <= self.params.hit_radius)
		})
	}

	fn seed_positions(&self, graph: &mut GraphData) {
		let count = graph.nodes.len() as f64;
		let center = self.viewport.center();
		let radius = self.viewport.width.min(self.viewport.height) * self.params.ring_ratio;
		for (i, node) in graph.nodes.iter_mut().enumerate() {
			if node.position().is_none() {
				let angle = 2.0 * PI * i as f64 / count;
				node.set_position(Point::new(
					center.x + radius * angle.cos(),
					center.y + radius * angle.sin(),
				));
			}
		}
	}

	fn repel(&self, positions: &[Point], velocities: &mut [Point]) {
		for j in 0..positions.len() {
			for k in (j + 1)..positions.len() {
				let (mut dx, mut dy) = (
					positions[k].x - positions[j].x,
					positions[k].y - positions[j].y,
				);
				// Coincident pair: split along x, later node to the right.
				if dx == 0.0 && dy == 0.0 {
					dx = 1.0;
					dy = 0.0;
				}
				let dist = (dx * dx + dy * dy).sqrt().max(self.params.min_distance);
				let force = self.params.repulsion / (dist * dist);
				let (fx, fy) = (dx / dist * force, dy / dist * force);

				velocities[j].x -= fx;
				velocities[j].y -= fy;
				velocities[k].x += fx;
				velocities[k].y += fy;
			}
		}
	}

	fn attract(&self, springs: &[(usize, usize)], positions: &[Point], velocities: &mut [Point]) {
		for &(s, t) in springs {
			if s == t {
				continue;
			}
			let (dx, dy) = (positions[t].x - positions[s].x, positions[t].y - positions[s].y);
			let dist = (dx * dx + dy * dy).sqrt().max(self.params.min_distance);
			let force = dist * self.params.attraction;
			let (fx, fy) = (dx / dist * force, dy / dist * force);

			velocities[s].x += fx;
			velocities[s].y += fy;
			velocities[t].x -= fx;
			velocities[t].y -= fy;
		}
	}

	fn integrate(&self, positions: &mut [Point], velocities: &mut [Point]) {
		let (min_x, max_x) = self.bounds(self.viewport.width);
		let (min_y, max_y) = self.bounds(self.viewport.height);
		for (p, v) in positions.iter_mut().zip(velocities.iter_mut()) {
			v.x *= self.params.damping;
			v.y *= self.params.damping;
			p.x = (p.x + v.x).min(max_x).max(min_x);
			p.y = (p.y + v.y).min(max_y).max(min_y);
		}
	}

	/// `(low, high)` clamp range along one axis. When the extent is smaller than
	/// two margins, `low` wins.
	fn bounds(&self, extent: f64) -> (f64, f64) {
		(self.params.margin, extent - self.params.margin)
	}
}

fn node_position(node: &GraphNode) -> Point {
	node.position().unwrap_or_default()
}
