use leptos::prelude::*;

use crate::components::force_graph::ForceGraphCanvas;
use crate::data;

// Fetched relative to the page at startup.
const NODES_URL: &str = "data/patent-nodes.json";
const LINKS_URL: &str = "data/patent-links.json";

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph = LocalResource::new(|| data::load_graph(NODES_URL, LINKS_URL));

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

			<div class="graph-page">
				<Suspense fallback=|| {
					view! { <p class="loading">"Loading graph data..."</p> }
				}>
					{move || Suspend::new(async move {
						graph.await.map(|data| view! { <ForceGraphCanvas data=data /> })
					})}
				</Suspense>
				<div class="graph-overlay">
					<h1>"Mobile Patent Suits"</h1>
					<p class="subtitle">"Drag nodes to reposition them."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
