use glam::{Vec2, Vec3};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::camera::Camera;
use super::error::{Graph3dError, Result};
use super::scene::SceneGraph;

const LABEL_CLASS: &str = "node-card";

struct Label {
	element: HtmlElement,
	anchor: Vec3,
}

/// HTML layer that keeps one text card per node glued to its projected
/// anchor. The layer ignores pointer input so the canvas underneath keeps
/// receiving drags, and labels are re-positioned in place each frame rather
/// than re-created.
pub struct LabelOverlay {
	root: HtmlElement,
	labels: Vec<Label>,
}

impl LabelOverlay {
	/// Build the layer and one card per scene node. The caller appends
	/// [`element`] wherever the layer should live.
	///
	/// [`element`]: LabelOverlay::element
	pub fn create(document: &Document, scene: &SceneGraph, width: f64, height: f64) -> Result<Self> {
		let root = create_div(document)?;
		let style = root.style();
		let _ = style.set_property("position", "absolute");
		let _ = style.set_property("top", "0");
		let _ = style.set_property("left", "0");
		let _ = style.set_property("width", &format!("{width}px"));
		let _ = style.set_property("height", &format!("{height}px"));
		let _ = style.set_property("overflow", "hidden");
		let _ = style.set_property("pointer-events", "none");

		let mut labels = Vec::with_capacity(scene.nodes.len());
		for node in &scene.nodes {
			let element = create_div(document)?;
			element.set_class_name(LABEL_CLASS);
			element.set_text_content(Some(&node.name));
			let _ = element.style().set_property("position", "absolute");
			root.append_child(&element).map_err(Graph3dError::from_js)?;
			labels.push(Label {
				element,
				anchor: node.label_anchor(),
			});
		}

		Ok(Self { root, labels })
	}

	pub fn element(&self) -> &HtmlElement {
		&self.root
	}

	pub fn label_count(&self) -> usize {
		self.labels.len()
	}

	/// Re-position every card from the camera's current view. Cards whose
	/// anchor falls behind the near plane are hidden rather than left at a
	/// bogus position.
	pub fn update(&self, camera: &Camera, viewport: Vec2) {
		for label in &self.labels {
			let style = label.element.style();
			match camera.project(label.anchor, viewport) {
				Some(point) => {
					let _ = style.set_property("visibility", "visible");
					let _ = style.set_property(
						"transform",
						&format!(
							"translate(-50%, -50%) translate({}px, {}px)",
							point.x, point.y
						),
					);
				}
				None => {
					let _ = style.set_property("visibility", "hidden");
				}
			}
		}
	}
}

fn create_div(document: &Document) -> Result<HtmlElement> {
	document
		.create_element("div")
		.map_err(Graph3dError::from_js)?
		.dyn_into::<HtmlElement>()
		.map_err(|_| Graph3dError::Dom("created element is not an HtmlElement".into()))
}
