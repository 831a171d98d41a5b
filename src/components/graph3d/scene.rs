use glam::Vec3;
use log::warn;

use super::types::GraphData;

/// Canvas clear color behind the diagram.
pub const BACKGROUND_COLOR: &str = "#111122";
/// Stroke color for link lines.
pub const LINE_COLOR: &str = "#ffffff";
/// Labels hang just below their node's position.
pub const LABEL_OFFSET: Vec3 = Vec3::new(0.0, -0.02, 0.0);

/// A placed node, ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	pub id: u32,
	pub name: String,
	pub position: Vec3,
}

impl SceneNode {
	/// World-space point the HTML label is glued to.
	pub fn label_anchor(&self) -> Vec3 {
		self.position + LABEL_OFFSET
	}
}

/// A resolved link, both endpoints already looked up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
	pub start: Vec3,
	pub end: Vec3,
}

/// Immutable draw lists built once from the input data.
///
/// Building never fails: duplicate node ids keep their first occurrence and
/// links naming an unknown node are dropped, both with a warning, so one bad
/// record cannot take the whole diagram down. `skipped_links` counts the
/// drops for callers that want to surface them.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
	pub nodes: Vec<SceneNode>,
	pub lines: Vec<LineSegment>,
	pub skipped_links: usize,
}

impl SceneGraph {
	pub fn build(data: &GraphData) -> Self {
		let mut nodes: Vec<SceneNode> = Vec::with_capacity(data.nodes.len());
		for node in &data.nodes {
			if nodes.iter().any(|existing| existing.id == node.id) {
				warn!("duplicate node id {}; keeping the first occurrence", node.id);
				continue;
			}
			nodes.push(SceneNode {
				id: node.id,
				name: node.name.clone(),
				position: node.position(),
			});
		}

		// Linear lookup; the diagrams this renders are a handful of nodes.
		let mut lines = Vec::with_capacity(data.links.len());
		let mut skipped_links = 0;
		for link in &data.links {
			let source = nodes.iter().find(|node| node.id == link.source);
			let target = nodes.iter().find(|node| node.id == link.target);
			match (source, target) {
				(Some(source), Some(target)) => lines.push(LineSegment {
					start: source.position,
					end: target.position,
				}),
				_ => {
					warn!(
						"link {} -> {} references a missing node; skipping it",
						link.source, link.target
					);
					skipped_links += 1;
				}
			}
		}

		Self {
			nodes,
			lines,
			skipped_links,
		}
	}
}
