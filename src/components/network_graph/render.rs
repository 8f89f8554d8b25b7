use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::NetworkGraphState;
use super::types::Point;

const LABEL_COLOR: &str = "#1f2937";
const OUTLINE_COLOR: &str = "#fff";

pub fn render(state: &NetworkGraphState, ctx: &CanvasRenderingContext2d) {
	let viewport = state.viewport();
	ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_edges(state: &NetworkGraphState, ctx: &CanvasRenderingContext2d) {
	let positions: HashMap<&str, Point> = state
		.graph
		.nodes
		.iter()
		.filter_map(|n| n.position().map(|p| (n.id.as_str(), p)))
		.collect();

	for link in &state.graph.links {
		let (Some(from), Some(to)) = (
			positions.get(link.source.as_str()),
			positions.get(link.target.as_str()),
		) else {
			continue;
		};
		let style = link.kind.style();

		ctx.set_stroke_style_str(style.color);
		ctx.set_line_width(style.width);
		let dash = style
			.dash
			.iter()
			.map(|&d| JsValue::from_f64(d))
			.collect::<js_sys::Array>();
		let _ = ctx.set_line_dash(&dash);

		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &NetworkGraphState, ctx: &CanvasRenderingContext2d) {
	for (idx, node) in state.graph.nodes.iter().enumerate() {
		let Some(Point { x, y }) = node.position() else {
			continue;
		};
		let radius = state.node_radius(idx);
		let highlighted = state.is_selected(idx) || state.is_hovered(idx);

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.kind.style(node.risk_level).fill);
		ctx.fill();

		if highlighted {
			ctx.set_stroke_style_str(OUTLINE_COLOR);
			ctx.set_line_width(3.0);
			ctx.stroke();

			ctx.set_fill_style_str(LABEL_COLOR);
			ctx.set_font("bold 12px sans-serif");
			ctx.set_text_align("center");
			let _ = ctx.fill_text(&node.label, x, y - radius - 10.0);
		}
	}
}
