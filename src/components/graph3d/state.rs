use glam::Vec2;

use super::camera::Camera;
use super::controls::OrbitControls;
use super::scene::SceneGraph;
use super::types::GraphData;

/// Everything a frame needs: the immutable draw lists plus the mutable
/// camera rig. Input handlers poke the controls, [`tick`] folds the result
/// into the camera, and the renderer reads the rest.
///
/// [`tick`]: Graph3dState::tick
pub struct Graph3dState {
	pub scene: SceneGraph,
	pub camera: Camera,
	pub controls: OrbitControls,
	pub width: f64,
	pub height: f64,
}

impl Graph3dState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let scene = SceneGraph::build(data);
		let aspect = if height > 0.0 {
			(width / height) as f32
		} else {
			1.0
		};
		let camera = Camera::new(aspect);
		let controls = OrbitControls::new(&camera);
		Self {
			scene,
			camera,
			controls,
			width,
			height,
		}
	}

	pub fn viewport(&self) -> Vec2 {
		Vec2::new(self.width as f32, self.height as f32)
	}

	/// Advance the orbit damping one frame. Runs before the draw passes so
	/// both the canvas and the labels see the same camera.
	pub fn tick(&mut self) {
		self.controls.update(&mut self.camera);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph3d::types::{GraphLink, GraphNode};
	use glam::Vec3;

	fn data() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode {
					id: 1,
					name: "Root".into(),
					x: 0.0,
					y: 0.0,
					z: 0.0,
				},
				GraphNode {
					id: 2,
					name: "Leaf".into(),
					x: 5.0,
					y: 2.0,
					z: -3.0,
				},
			],
			links: vec![GraphLink { source: 1, target: 2 }],
		}
	}

	#[test]
	fn aspect_follows_the_viewport() {
		let state = Graph3dState::new(&data(), 800.0, 600.0);
		assert!((state.camera.aspect - 4.0 / 3.0).abs() < 1e-6);
		assert_eq!(state.viewport(), Vec2::new(800.0, 600.0));
	}

	#[test]
	fn zero_height_viewport_does_not_poison_the_projection() {
		let state = Graph3dState::new(&data(), 800.0, 0.0);
		assert_eq!(state.camera.aspect, 1.0);
	}

	#[test]
	fn idle_ticks_leave_the_camera_in_place() {
		let mut state = Graph3dState::new(&data(), 800.0, 600.0);
		for _ in 0..5 {
			state.tick();
		}
		assert!(state.camera.position.distance(Vec3::new(0.0, 0.0, 15.0)) < 1e-4);
	}

	#[test]
	fn drag_input_reaches_the_camera_through_tick() {
		let mut state = Graph3dState::new(&data(), 800.0, 600.0);
		state.controls.begin_rotate(0.0, 0.0);
		state.controls.rotate_to(120.0, 0.0, state.height);
		state.tick();
		assert!(state.camera.position.distance(Vec3::new(0.0, 0.0, 15.0)) > 1e-3);
	}
}
