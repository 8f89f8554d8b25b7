use leptos::prelude::*;
use log::{info, warn};

use crate::components::network_graph::palette::risk_color;
use crate::components::network_graph::{GraphData, NetworkGraphCanvas, RiskLevel};

/// Id of an optional `<script type="application/json">` element carrying graph data.
const GRAPH_DATA_ELEMENT: &str = "network-graph-data";

/// Reads the page-embedded graph payload, falling back to the demo ring.
fn load_graph_data() -> GraphData {
	let payload = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(GRAPH_DATA_ELEMENT))
		.and_then(|el| el.text_content());
	graph_data_from_payload(payload.as_deref())
}

fn graph_data_from_payload(payload: Option<&str>) -> GraphData {
	let Some(json) = payload else {
		info!("no embedded graph data, showing demo network");
		return GraphData::demo();
	};

	match GraphData::from_json(json) {
		Ok(data) => data,
		Err(err) => {
			warn!("falling back to demo network: {err}");
			GraphData::demo()
		}
	}
}

#[component]
fn RiskLegend() -> impl IntoView {
	let entries = [
		(RiskLevel::High, "High Risk"),
		(RiskLevel::Medium, "Medium Risk"),
		(RiskLevel::Low, "Low Risk"),
	];

	view! {
		<div class="risk-legend">
			{entries
				.into_iter()
				.map(|(risk, label)| {
					view! {
						<div class="risk-legend__item">
							<span
								class="risk-legend__swatch"
								style=format!("background: {};", risk_color(risk))
							></span>
							<span>{label}</span>
						</div>
					}
				})
				.collect_view()}
		</div>
	}
}

/// Fraud network analysis page
#[component]
pub fn Home() -> impl IntoView {
	// Parsed once per page; the derived signal only hands out clones.
	let data = load_graph_data();
	let graph_data = Signal::derive(move || data.clone());

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="network-page">
				<header class="network-page__header">
					<h1>"Fraud Network Analysis"</h1>
					<p class="subtitle">
						"Visualize connections between accounts, transactions, and merchants to identify fraud rings"
					</p>
					<RiskLegend />
				</header>
				<div class="network-page__graph" style="height: 700px;">
					<NetworkGraphCanvas data=graph_data />
				</div>
			</div>
		</ErrorBoundary>
	}
}
