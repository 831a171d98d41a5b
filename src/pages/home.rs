use leptos::prelude::*;

use crate::components::graph3d::{Graph3dCanvas, GraphData, GraphLink, GraphNode};

/// The fixed demo diagram: a root concept fanning out to three children,
/// one of which has a child of its own.
fn sample_graph() -> GraphData {
	let nodes = vec![
		GraphNode {
			id: 1,
			name: "Root".into(),
			x: 0.0,
			y: 0.0,
			z: 0.0,
		},
		GraphNode {
			id: 2,
			name: "Concept A".into(),
			x: 5.0,
			y: 2.0,
			z: -3.0,
		},
		GraphNode {
			id: 3,
			name: "Concept B".into(),
			x: -4.0,
			y: 3.0,
			z: 4.0,
		},
		GraphNode {
			id: 4,
			name: "Concept C".into(),
			x: 3.0,
			y: -3.0,
			z: 2.0,
		},
	];
	let links = vec![
		GraphLink { source: 1, target: 2 },
		GraphLink { source: 1, target: 3 },
		GraphLink { source: 2, target: 4 },
	];
	GraphData { nodes, links }
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	// Create graph data signal
	let graph_data = Signal::derive(sample_graph);

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

			<div class="fullscreen-graph">
				<Graph3dCanvas data=graph_data />
				<div class="graph-overlay">
					<h1>"3D Concept Graph"</h1>
					<p class="subtitle">"Drag to orbit. Scroll or pinch to zoom."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
