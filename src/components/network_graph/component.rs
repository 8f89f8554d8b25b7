use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use super::layout::Viewport;
use super::render;
use super::state::{GraphStats, NetworkGraphState, NodeDetails};
use super::types::GraphData;

/// Canvas view of a fraud network with a detail panel for the clicked node.
///
/// The layout runs once per `data` value; a new value rebuilds it from scratch.
#[component]
pub fn NetworkGraphCanvas(
	/// Nodes and links to lay out.
	#[prop(into)]
	data: Signal<GraphData>,
	/// Fixed width in CSS pixels; defaults to the container width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed height in CSS pixels; defaults to the container height.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<NetworkGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (details, set_details) = signal(None::<NodeDetails>);
	let stats = Memo::new(move |_| data.with(|d| GraphStats::from(d)));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window): Option<Window> = web_sys::window() else {
			error!("network graph mounted without a window");
			return;
		};

		let measured = canvas
			.parent_element()
			.map(|p| (p.client_width() as f64, p.client_height() as f64));
		let viewport = Viewport::resolve(width, height, measured);
		let (w, h) = (viewport.width, viewport.height);
		let ratio = window.device_pixel_ratio();
		canvas.set_width((w * ratio) as u32);
		canvas.set_height((h * ratio) as u32);
		let style = HtmlElement::style(&canvas);
		let _ = style.set_property("width", &format!("{w}px"));
		let _ = style.set_property("height", &format!("{h}px"));

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("2d context has an unexpected type");
					return;
				}
			},
			_ => {
				error!("canvas has no 2d context");
				return;
			}
		};
		let _ = ctx.scale(ratio, ratio);

		*state_init.borrow_mut() = Some(NetworkGraphState::new(&data.get(), w, h));
		set_details.set(None);

		// Already looping from an earlier data value; the new state is picked up next frame.
		if animate_init.borrow().is_some() {
			return;
		}
		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.needs_redraw {
					render::render(s, &ctx);
					s.needs_redraw = false;
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// The panel's close button only clears the signal; mirror that into the canvas state.
	let state_sel = state.clone();
	Effect::new(move |_| {
		if details.with(Option::is_none) {
			if let Some(ref mut s) = *state_sel.borrow_mut() {
				s.clear_selection();
			}
		}
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			let hovered = s.node_at_position(x, y);
			if s.set_hover(hovered) {
				let cursor = if hovered.is_some() { "pointer" } else { "default" };
				let _ = HtmlElement::style(&canvas).set_property("cursor", cursor);
			}
		}
	};

	let state_cl = state.clone();
	let on_click = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_cl.borrow_mut() {
			set_details.set(s.click());
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.set_hover(None);
		}
	};

	view! {
		<div
			class="network-graph"
			style="display: flex; flex-direction: column; height: 100%;"
		>
			<div
				class="network-graph__surface"
				style="flex: 1; position: relative; min-height: 0;"
			>
				<canvas
					node_ref=canvas_ref
					class="network-graph-canvas"
					on:mousemove=on_mousemove
					on:click=on_click
					on:mouseleave=on_mouseleave
					style="display: block;"
				/>
				{move || {
					details
						.get()
						.map(|d| {
							view! {
								<div
									class="node-details"
									style="position: absolute; top: 1rem; right: 1rem;"
								>
									<div class="node-details__header">
										<h3>"Node Details"</h3>
										<button on:click=move |_| set_details.set(None)>"✕"</button>
									</div>
									<dl>
										<dt>"ID:"</dt>
										<dd class="mono">{d.id}</dd>
										<dt>"Type:"</dt>
										<dd class="capitalize">{d.kind.as_str()}</dd>
										<dt>"Label:"</dt>
										<dd>{d.label}</dd>
										<dt>"Risk:"</dt>
										<dd class=format!("risk risk--{}", d.risk_level.as_str())>
											{d.risk_level.as_str().to_uppercase()}
										</dd>
									</dl>
									<p class="node-details__connections">"Connected to:"</p>
									<ul>
										{d
											.connections
											.into_iter()
											.map(|c| {
												view! { <li>{c.label}" ("{c.kind.as_str()}")"</li> }
											})
											.collect_view()}
									</ul>
								</div>
							}
						})
				}}
			</div>
			<div class="network-graph__stats">
				<div>
					<div class="stat stat--nodes">{move || stats.get().total_nodes}</div>
					<div class="stat__label">"Total Nodes"</div>
				</div>
				<div>
					<div class="stat stat--links">{move || stats.get().connections}</div>
					<div class="stat__label">"Connections"</div>
				</div>
				<div>
					<div class="stat stat--high-risk">{move || stats.get().high_risk}</div>
					<div class="stat__label">"High Risk"</div>
				</div>
				<div>
					<div class="stat stat--suspicious">{move || stats.get().suspicious_links}</div>
					<div class="stat__label">"Suspicious Links"</div>
				</div>
			</div>
		</div>
	}
}
