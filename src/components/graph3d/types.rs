use glam::Vec3;

/// One graph node: a unique id, a display name, and a fixed 3D position.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: u32,
	pub name: String,
	pub x: f32,
	pub y: f32,
	pub z: f32,
}

impl GraphNode {
	pub fn position(&self) -> Vec3 {
		Vec3::new(self.x, self.y, self.z)
	}
}

/// A connection between two node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: u32,
	pub target: u32,
}

/// The immutable input for one mounted diagram.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}
