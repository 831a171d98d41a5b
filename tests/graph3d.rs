//! Browser-side checks for the diagram lifecycle: surface creation, label
//! placement, draw order, and teardown. Run with a wasm test runner against
//! a headless browser.

#![cfg(target_arch = "wasm32")]

use glam::Vec3;
use graph3d_canvas::components::graph3d::{FrameLoop, Graph3dView, GraphData, GraphLink, GraphNode};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
	web_sys::window().unwrap().document().unwrap()
}

/// A fresh div attached to the test page body.
fn container() -> HtmlElement {
	let document = document();
	let div = document
		.create_element("div")
		.unwrap()
		.dyn_into::<HtmlElement>()
		.unwrap();
	document.body().unwrap().append_child(&div).unwrap();
	div
}

fn node(id: u32, name: &str, x: f32, y: f32, z: f32) -> GraphNode {
	GraphNode {
		id,
		name: name.to_owned(),
		x,
		y,
		z,
	}
}

fn sample_data() -> GraphData {
	GraphData {
		nodes: vec![
			node(1, "Root", 0.0, 0.0, 0.0),
			node(2, "Concept A", 5.0, 2.0, -3.0),
			node(3, "Concept B", -4.0, 3.0, 4.0),
			node(4, "Concept C", 3.0, -3.0, 2.0),
		],
		links: vec![
			GraphLink { source: 1, target: 2 },
			GraphLink { source: 1, target: 3 },
			GraphLink { source: 2, target: 4 },
		],
	}
}

fn context_of(container: &HtmlElement) -> CanvasRenderingContext2d {
	let canvas: HtmlCanvasElement = container
		.first_element_child()
		.unwrap()
		.dyn_into()
		.unwrap();
	canvas
		.get_context("2d")
		.unwrap()
		.unwrap()
		.dyn_into()
		.unwrap()
}

fn pixel(ctx: &CanvasRenderingContext2d, x: f64, y: f64) -> [u8; 4] {
	let data = ctx.get_image_data(x, y, 1.0, 1.0).unwrap().data();
	[data[0], data[1], data[2], data[3]]
}

#[wasm_bindgen_test]
fn initialize_appends_canvas_then_label_layer() {
	let container = container();
	let view = Graph3dView::initialize(&container, &sample_data(), 640.0, 480.0).unwrap();

	assert_eq!(container.child_element_count(), 2);
	let first = container.first_element_child().unwrap();
	assert_eq!(first.tag_name().to_lowercase(), "canvas");
	let second = first.next_element_sibling().unwrap();
	assert_eq!(second.tag_name().to_lowercase(), "div");
	assert_eq!(view.label_count(), 4);

	let canvas: HtmlCanvasElement = first.dyn_into().unwrap();
	assert_eq!(canvas.width(), 640);
	assert_eq!(canvas.height(), 480);
}

#[wasm_bindgen_test]
fn one_card_per_node_carrying_its_name() {
	let container = container();
	let _view = Graph3dView::initialize(&container, &sample_data(), 640.0, 480.0).unwrap();

	let cards = container.query_selector_all(".node-card").unwrap();
	assert_eq!(cards.length(), 4);
	assert_eq!(cards.get(0).unwrap().text_content().unwrap(), "Root");
	assert_eq!(cards.get(3).unwrap().text_content().unwrap(), "Concept C");
}

#[wasm_bindgen_test]
fn unresolved_links_do_not_break_initialization() {
	let container = container();
	let mut data = sample_data();
	data.links.push(GraphLink { source: 1, target: 99 });

	let view = Graph3dView::initialize(&container, &data, 640.0, 480.0).unwrap();
	assert_eq!(view.state().scene.lines.len(), 3);
	assert_eq!(view.state().scene.skipped_links, 1);
	assert_eq!(view.label_count(), 4);
}

#[wasm_bindgen_test]
fn render_frame_paints_background_and_lines() {
	let container = container();
	let mut view = Graph3dView::initialize(&container, &sample_data(), 640.0, 480.0).unwrap();
	view.render_frame();

	let ctx = context_of(&container);
	// #111122, the clear color.
	let background = [0x11, 0x11, 0x22, 0xff];
	assert_eq!(pixel(&ctx, 2.0, 2.0), background);

	// Sample the midpoint of the Root -> Concept A line; the white stroke
	// must leave that pixel brighter than the background.
	let state = view.state();
	let midpoint = state
		.camera
		.project(Vec3::new(2.5, 1.0, -1.5), state.viewport())
		.unwrap();
	let on_line = pixel(&ctx, midpoint.x.floor() as f64, midpoint.y.floor() as f64);
	assert_ne!(on_line, background);
}

/// Pull (x, y) out of "translate(-50%, -50%) translate(Xpx, Ypx)". Parsed
/// numerically because browsers may re-serialize the floats.
fn translate_px(transform: &str) -> (f64, f64) {
	let tail = transform.rsplit("translate(").next().unwrap();
	let mut parts = tail.split(',');
	let x = parts
		.next()
		.unwrap()
		.trim()
		.trim_end_matches("px")
		.parse()
		.unwrap();
	let y = parts
		.next()
		.unwrap()
		.trim()
		.trim_end_matches(')')
		.trim_end_matches("px")
		.parse()
		.unwrap();
	(x, y)
}

#[wasm_bindgen_test]
fn labels_track_the_camera_updated_by_the_same_frame() {
	let container = container();
	let mut view = Graph3dView::initialize(&container, &sample_data(), 640.0, 480.0).unwrap();

	// Where "Concept A"'s card would land if the frame skipped the
	// controls update.
	let stale = {
		let state = view.state();
		state
			.camera
			.project(state.scene.nodes[1].label_anchor(), state.viewport())
			.unwrap()
	};

	// Queue a drag, then draw one frame. The card transform must match a
	// projection through the camera as it stands after that frame's
	// controls update, not before it.
	view.state_mut().controls.begin_rotate(0.0, 0.0);
	view.state_mut().controls.rotate_to(90.0, 30.0, 480.0);
	view.render_frame();

	let state = view.state();
	let expected = state
		.camera
		.project(state.scene.nodes[1].label_anchor(), state.viewport())
		.unwrap();
	assert!((expected.x - stale.x).abs() > 1.0);

	let cards = container.query_selector_all(".node-card").unwrap();
	let card: HtmlElement = cards.get(1).unwrap().dyn_into().unwrap();
	let (x, y) = translate_px(&card.style().get_property_value("transform").unwrap());
	assert!((x - expected.x as f64).abs() < 0.05);
	assert!((y - expected.y as f64).abs() < 0.05);
	assert_eq!(card.style().get_property_value("visibility").unwrap(), "visible");
}

#[wasm_bindgen_test]
fn labels_behind_the_camera_are_hidden() {
	let container = container();
	let data = GraphData {
		nodes: vec![
			node(1, "Front", 0.0, 0.0, 0.0),
			node(2, "Behind", 0.0, 0.0, 20.0),
		],
		links: Vec::new(),
	};
	let mut view = Graph3dView::initialize(&container, &data, 640.0, 480.0).unwrap();
	view.render_frame();

	let cards = container.query_selector_all(".node-card").unwrap();
	let front: HtmlElement = cards.get(0).unwrap().dyn_into().unwrap();
	let behind: HtmlElement = cards.get(1).unwrap().dyn_into().unwrap();
	assert_eq!(front.style().get_property_value("visibility").unwrap(), "visible");
	assert_eq!(behind.style().get_property_value("visibility").unwrap(), "hidden");
}

#[wasm_bindgen_test]
fn dispose_detaches_everything_and_is_idempotent() {
	let container = container();
	let view = Graph3dView::initialize(&container, &sample_data(), 320.0, 240.0).unwrap();
	assert_eq!(container.child_element_count(), 2);

	view.dispose();
	assert_eq!(container.child_element_count(), 0);
	view.dispose();
	assert_eq!(container.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn reinitializing_replaces_surfaces_instead_of_stacking() {
	let container = container();
	let first = Graph3dView::initialize(&container, &sample_data(), 320.0, 240.0).unwrap();
	let second = Graph3dView::initialize(&container, &sample_data(), 320.0, 240.0).unwrap();

	// The stale instance's surfaces are gone; only the new pair remains.
	assert_eq!(container.child_element_count(), 2);
	assert_eq!(second.label_count(), 4);
	assert_eq!(
		container.query_selector_all(".node-card").unwrap().length(),
		4
	);
	drop(first);
	assert_eq!(container.child_element_count(), 2);
}

#[wasm_bindgen_test]
fn frame_loop_cancel_stops_and_stays_stopped() {
	let ticks = std::rc::Rc::new(std::cell::Cell::new(0u32));
	let counter = ticks.clone();
	let frame_loop = FrameLoop::start(move || counter.set(counter.get() + 1)).unwrap();

	assert!(frame_loop.is_running());
	frame_loop.cancel();
	assert!(!frame_loop.is_running());
	frame_loop.cancel();
	assert!(!frame_loop.is_running());
	// Cancelled before any frame was delivered, so the closure never ran.
	assert_eq!(ticks.get(), 0);
}
