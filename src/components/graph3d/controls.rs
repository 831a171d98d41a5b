use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::camera::Camera;

/// Fraction of the pending rotation applied per frame.
pub const DAMPING_FACTOR: f32 = 0.05;
pub const ROTATE_SPEED: f32 = 1.0;
pub const ZOOM_SPEED: f32 = 1.0;
pub const MIN_DISTANCE: f32 = 0.5;
pub const MAX_DISTANCE: f32 = 500.0;

/// Keeps the polar angle strictly inside (0, pi) so the view direction
/// never becomes parallel to the up vector.
const POLAR_MARGIN: f32 = 1e-4;
/// Radius multiplier for one wheel notch toward the target.
const DOLLY_STEP: f32 = 0.95;

/// Damped orbit controller around a fixed target.
///
/// The camera position is tracked in spherical coordinates: `radius` from
/// the target, azimuth `theta` around +Y measured from +Z, polar `phi` down
/// from +Y. Input handlers only accumulate pending deltas; [`update`] folds
/// a damped fraction into the angles each frame, which is what gives the
/// camera its glide after the pointer stops.
///
/// [`update`]: OrbitControls::update
#[derive(Clone, Debug)]
pub struct OrbitControls {
	pub damping_factor: f32,
	pub rotate_speed: f32,
	pub zoom_speed: f32,
	pub min_distance: f32,
	pub max_distance: f32,
	radius: f32,
	theta: f32,
	phi: f32,
	delta_theta: f32,
	delta_phi: f32,
	scale: f32,
	pointer: Option<(f64, f64)>,
	pinch: Option<f64>,
}

impl OrbitControls {
	/// Derive the starting spherical coordinates from wherever the camera
	/// already is, so attaching the controller never snaps the view.
	pub fn new(camera: &Camera) -> Self {
		let offset = camera.position - camera.target;
		let radius = offset.length().max(MIN_DISTANCE);
		let theta = offset.x.atan2(offset.z);
		let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
		Self {
			damping_factor: DAMPING_FACTOR,
			rotate_speed: ROTATE_SPEED,
			zoom_speed: ZOOM_SPEED,
			min_distance: MIN_DISTANCE,
			max_distance: MAX_DISTANCE,
			radius,
			theta,
			phi: clamp_polar(phi),
			delta_theta: 0.0,
			delta_phi: 0.0,
			scale: 1.0,
			pointer: None,
			pinch: None,
		}
	}

	/// Start a drag at pixel position (x, y).
	pub fn begin_rotate(&mut self, x: f64, y: f64) {
		self.pointer = Some((x, y));
	}

	/// Continue a drag. A full viewport height of vertical travel maps to
	/// one whole revolution, scaled by `rotate_speed`. No-op unless a drag
	/// is active.
	pub fn rotate_to(&mut self, x: f64, y: f64, viewport_height: f64) {
		let Some((px, py)) = self.pointer else {
			return;
		};
		if viewport_height <= 0.0 {
			return;
		}
		let per_pixel = TAU / viewport_height as f32 * self.rotate_speed;
		self.delta_theta -= (x - px) as f32 * per_pixel;
		self.delta_phi -= (y - py) as f32 * per_pixel;
		self.pointer = Some((x, y));
	}

	pub fn end_rotate(&mut self) {
		self.pointer = None;
	}

	pub fn is_rotating(&self) -> bool {
		self.pointer.is_some()
	}

	/// Queue a dolly from a wheel delta: negative (scroll up) moves toward
	/// the target, positive away. Magnitude is ignored, only the sign
	/// counts, one notch per event.
	pub fn dolly(&mut self, delta_y: f64) {
		let step = DOLLY_STEP.powf(self.zoom_speed);
		if delta_y < 0.0 {
			self.scale *= step;
		} else if delta_y > 0.0 {
			self.scale /= step;
		}
	}

	/// Start a two-finger gesture with the given distance between touches.
	pub fn pinch_start(&mut self, distance: f64) {
		self.pinch = Some(distance);
	}

	/// Spreading the fingers zooms in, closing them zooms out.
	pub fn pinch_move(&mut self, distance: f64) {
		let Some(previous) = self.pinch else {
			return;
		};
		if previous > 0.0 && distance > 0.0 {
			self.scale *= (previous / distance) as f32;
		}
		self.pinch = Some(distance);
	}

	pub fn pinch_end(&mut self) {
		self.pinch = None;
	}

	/// Advance one frame and write the resulting position into `camera`.
	///
	/// Applies `damping_factor` of the pending rotation and decays the
	/// remainder; dolly scale is applied in full and reset. Integration is
	/// per frame, not per wall-clock second.
	pub fn update(&mut self, camera: &mut Camera) {
		self.theta += self.delta_theta * self.damping_factor;
		self.phi = clamp_polar(self.phi + self.delta_phi * self.damping_factor);
		self.radius = (self.radius * self.scale).clamp(self.min_distance, self.max_distance);

		let sin_phi = self.phi.sin();
		let offset = Vec3::new(
			self.radius * sin_phi * self.theta.sin(),
			self.radius * self.phi.cos(),
			self.radius * sin_phi * self.theta.cos(),
		);
		camera.position = camera.target + offset;

		let keep = 1.0 - self.damping_factor;
		self.delta_theta *= keep;
		self.delta_phi *= keep;
		self.scale = 1.0;
	}

	pub fn radius(&self) -> f32 {
		self.radius
	}

	pub fn theta(&self) -> f32 {
		self.theta
	}

	pub fn phi(&self) -> f32 {
		self.phi
	}
}

fn clamp_polar(phi: f32) -> f32 {
	phi.clamp(POLAR_MARGIN, PI - POLAR_MARGIN)
}
