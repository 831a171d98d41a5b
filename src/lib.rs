//! Client-side app shell for the 3D node-link diagram viewer.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod components;
mod pages;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Wire up the `log` facade to the browser console and route panics there
/// too. Call once before mounting.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Router with the diagram home page and a 404 fallback.
#[component]
pub fn App() -> impl IntoView {
	// Context for <Title>/<Meta> below.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		<Title text="3D Concept Graph" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
