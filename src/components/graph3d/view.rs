use log::info;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use super::error::{Graph3dError, Result};
use super::overlay::LabelOverlay;
use super::render;
use super::state::Graph3dState;
use super::types::GraphData;

/// A materialized diagram: the canvas and label layer appended to a
/// container, plus the state drawn onto them.
///
/// [`initialize`] and [`dispose`] are a strict pair. Everything initialize
/// creates lives under the container, so dispose can release it all by
/// emptying the container again; it owns no other browser resources.
///
/// [`initialize`]: Graph3dView::initialize
/// [`dispose`]: Graph3dView::dispose
pub struct Graph3dView {
	container: HtmlElement,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	overlay: LabelOverlay,
	state: Graph3dState,
}

impl Graph3dView {
	/// Build the scene for `data` and attach its two surfaces to
	/// `container`: the canvas first, then the label layer above it.
	///
	/// The container is emptied first, so initializing over a stale
	/// instance replaces it instead of stacking a second one.
	pub fn initialize(
		container: &HtmlElement,
		data: &GraphData,
		width: f64,
		height: f64,
	) -> Result<Self> {
		let document = web_sys::window()
			.ok_or(Graph3dError::NoWindow)?
			.document()
			.ok_or(Graph3dError::NoDocument)?;

		let state = Graph3dState::new(data, width, height);

		container.set_inner_html("");

		let canvas = create_canvas(&document, width, height)?;
		container.append_child(&canvas).map_err(Graph3dError::from_js)?;

		let overlay = LabelOverlay::create(&document, &state.scene, width, height)?;
		container
			.append_child(overlay.element())
			.map_err(Graph3dError::from_js)?;

		let ctx = context_2d(&canvas)?;

		info!(
			"graph3d view ready: {} nodes, {} lines ({} links skipped), {}x{}",
			state.scene.nodes.len(),
			state.scene.lines.len(),
			state.scene.skipped_links,
			width,
			height
		);

		Ok(Self {
			container: container.clone(),
			canvas,
			ctx,
			overlay,
			state,
		})
	}

	/// Draw one frame: controls update, raster pass, label pass, in that
	/// order, so both surfaces reflect the same camera.
	pub fn render_frame(&mut self) {
		self.state.tick();
		render::render(&self.state, &self.ctx);
		self.overlay.update(&self.state.camera, self.state.viewport());
	}

	pub fn state(&self) -> &Graph3dState {
		&self.state
	}

	pub fn state_mut(&mut self) -> &mut Graph3dState {
		&mut self.state
	}

	pub fn canvas(&self) -> &HtmlCanvasElement {
		&self.canvas
	}

	pub fn label_count(&self) -> usize {
		self.overlay.label_count()
	}

	/// Detach both surfaces from the container. Safe to call more than
	/// once; a second call finds the container already empty.
	pub fn dispose(&self) {
		self.container.set_inner_html("");
	}
}

fn create_canvas(document: &Document, width: f64, height: f64) -> Result<HtmlCanvasElement> {
	let canvas = document
		.create_element("canvas")
		.map_err(Graph3dError::from_js)?
		.dyn_into::<HtmlCanvasElement>()
		.map_err(|_| Graph3dError::Dom("created element is not a canvas".into()))?;
	canvas.set_width(width as u32);
	canvas.set_height(height as u32);
	let style = canvas.style();
	let _ = style.set_property("display", "block");
	let _ = style.set_property("cursor", "grab");
	Ok(canvas)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.map_err(|value| Graph3dError::Context(format!("{value:?}")))?
		.ok_or_else(|| Graph3dError::Context("2d context unavailable".into()))?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| Graph3dError::Context("context is not CanvasRenderingContext2d".into()))
}
