use glam::{Mat4, Vec2, Vec3};

/// Vertical field of view, degrees.
pub const FOV_Y_DEG: f32 = 75.0;
/// Near clip distance.
pub const NEAR: f32 = 0.1;
/// Far clip distance.
pub const FAR: f32 = 1000.0;
/// Where the camera starts, looking at the origin.
pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 0.0, 15.0);

/// Perspective camera in a right-handed, Y-up world.
///
/// Projection happens in two steps so callers can reason about them
/// separately: world -> view (look-at), then view -> pixels (perspective
/// divide plus viewport mapping, with Y flipped so pixel space grows
/// downward).
#[derive(Clone, Debug)]
pub struct Camera {
	pub position: Vec3,
	pub target: Vec3,
	pub up: Vec3,
	/// Vertical field of view, radians.
	pub fov_y: f32,
	pub aspect: f32,
	pub near: f32,
	pub far: f32,
}

impl Camera {
	pub fn new(aspect: f32) -> Self {
		Self {
			position: INITIAL_POSITION,
			target: Vec3::ZERO,
			up: Vec3::Y,
			fov_y: FOV_Y_DEG.to_radians(),
			aspect,
			near: NEAR,
			far: FAR,
		}
	}

	pub fn view_matrix(&self) -> Mat4 {
		Mat4::look_at_rh(self.position, self.target, self.up)
	}

	pub fn projection_matrix(&self) -> Mat4 {
		Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
	}

	fn to_view(&self, world: Vec3) -> Vec3 {
		self.view_matrix().transform_point3(world)
	}

	/// Project a world-space point into pixel coordinates.
	///
	/// Returns `None` when the point sits behind the near plane, where the
	/// perspective divide would flip or blow up.
	pub fn project(&self, world: Vec3, viewport: Vec2) -> Option<Vec2> {
		self.project_view(self.to_view(world), viewport)
	}

	fn project_view(&self, view: Vec3, viewport: Vec2) -> Option<Vec2> {
		// View space looks down -Z; visible points have z <= -near.
		if view.z > -self.near {
			return None;
		}
		let clip = self.projection_matrix() * view.extend(1.0);
		let ndc = clip.truncate() / clip.w;
		Some(Vec2::new(
			(ndc.x * 0.5 + 0.5) * viewport.x,
			(0.5 - ndc.y * 0.5) * viewport.y,
		))
	}

	/// Project a world-space segment, clipping it against the near plane.
	///
	/// A segment fully behind the near plane yields `None`; one that
	/// straddles it is shortened to the visible part. Without the clip a
	/// straddling endpoint would project to a mirrored position and the
	/// drawn line would swing wildly as the camera orbits past a node.
	pub fn project_segment(&self, a: Vec3, b: Vec3, viewport: Vec2) -> Option<(Vec2, Vec2)> {
		let mut va = self.to_view(a);
		let mut vb = self.to_view(b);
		let plane = -self.near;
		match (va.z <= plane, vb.z <= plane) {
			(false, false) => return None,
			(true, false) => vb = clip_to_plane(va, vb, plane),
			(false, true) => va = clip_to_plane(vb, va, plane),
			(true, true) => {}
		}
		Some((
			self.project_view(va, viewport)?,
			self.project_view(vb, viewport)?,
		))
	}
}

/// Intersection of the segment `visible -> hidden` with the plane z = plane_z.
/// `visible.z <= plane_z < hidden.z` holds at every call site, so the
/// denominator is never zero.
fn clip_to_plane(visible: Vec3, hidden: Vec3, plane_z: f32) -> Vec3 {
	let t = (plane_z - visible.z) / (hidden.z - visible.z);
	let mut hit = visible + (hidden - visible) * t;
	// Pin z exactly so the clipped endpoint always passes the near test.
	hit.z = plane_z;
	hit
}
