use leptos::prelude::*;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<h1>"Page not found"</h1>
		<p>"There is no network view at this address."</p>
		<a href="/">"Back to the fraud network"</a>
	}
}
