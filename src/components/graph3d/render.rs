use web_sys::CanvasRenderingContext2d;

use super::scene::{BACKGROUND_COLOR, LINE_COLOR};
use super::state::Graph3dState;

/// Raster pass: clear to the background color, then stroke every resolved
/// link through the current camera. Segments behind the near plane are
/// clipped or dropped by the projection, nothing else is culled.
pub fn render(state: &Graph3dState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND_COLOR);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let viewport = state.viewport();
	ctx.set_stroke_style_str(LINE_COLOR);
	ctx.set_line_width(1.0);
	for line in &state.scene.lines {
		let Some((start, end)) = state.camera.project_segment(line.start, line.end, viewport)
		else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(start.x as f64, start.y as f64);
		ctx.line_to(end.x as f64, end.y as f64);
		ctx.stroke();
	}
}
