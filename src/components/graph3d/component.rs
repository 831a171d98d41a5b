use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlDivElement, MouseEvent, TouchEvent, TouchList, WheelEvent};

use super::error::{Graph3dError, Result};
use super::types::GraphData;
use super::view::Graph3dView;

type SharedView = Rc<RefCell<Option<Graph3dView>>>;
type SharedLoop = Rc<RefCell<Option<FrameLoop>>>;

/// A cancellable, self-rescheduling `requestAnimationFrame` task.
///
/// The handle of the most recently scheduled frame is kept at all times, so
/// [`cancel`] can always stop the loop; the fire-and-forget version of this
/// pattern keeps ticking after its component is long gone.
///
/// [`cancel`]: FrameLoop::cancel
pub struct FrameLoop {
	raf_id: Rc<Cell<Option<i32>>>,
	closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
	/// Schedule `tick` to run once per animation frame, starting with the
	/// next one, until [`cancel`] is called.
	///
	/// [`cancel`]: FrameLoop::cancel
	pub fn start(mut tick: impl FnMut() + 'static) -> Result<Self> {
		let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

		let (raf_inner, closure_inner) = (raf_id.clone(), closure.clone());
		let cb: Closure<dyn FnMut()> = Closure::new(move || {
			if raf_inner.get().is_none() {
				// Cancelled between scheduling and delivery.
				return;
			}
			tick();
			raf_inner.set(None);
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(ref cb) = *closure_inner.borrow() {
				if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
					raf_inner.set(Some(id));
				}
			}
		});

		let window = web_sys::window().ok_or(Graph3dError::NoWindow)?;
		let id = window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.map_err(Graph3dError::from_js)?;
		raf_id.set(Some(id));
		*closure.borrow_mut() = Some(cb);

		Ok(Self { raf_id, closure })
	}

	pub fn is_running(&self) -> bool {
		self.raf_id.get().is_some()
	}

	/// Stop the loop. Cancels the pending frame before the closure is
	/// dropped so the browser never calls into a dead closure. Idempotent.
	pub fn cancel(&self) {
		if let Some(id) = self.raf_id.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		self.closure.borrow_mut().take();
	}
}

/// Static 3D node-link diagram with orbit controls.
///
/// Renders link lines onto a canvas and floats one HTML card per node on an
/// overlay above it. Dragging orbits the camera around the origin, the
/// wheel and two-finger pinches dolly it. When `width`/`height` are not
/// given the diagram fills the browser window.
///
/// Setup runs in an effect once the container div exists; changing `data`
/// re-runs it, replacing the previous scene. Unmounting cancels the frame
/// loop and detaches everything the setup created.
#[component]
pub fn Graph3dCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let view: SharedView = Rc::new(RefCell::new(None));
	let frame: SharedLoop = Rc::new(RefCell::new(None));

	let (view_init, frame_init) = (view.clone(), frame.clone());
	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		let container: HtmlDivElement = container.into();
		let data = data.get();

		// A re-run replaces the previous instance, it never stacks one.
		teardown(&view_init, &frame_init);
		if let Err(err) = initialize(&container, &data, width, height, &view_init, &frame_init) {
			error!("graph3d setup failed: {err}");
			teardown(&view_init, &frame_init);
		}
	});

	let view_md = view.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(ref mut v) = *view_md.borrow_mut() {
			v.state_mut()
				.controls
				.begin_rotate(ev.client_x() as f64, ev.client_y() as f64);
		}
	};

	let view_mm = view.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(ref mut v) = *view_mm.borrow_mut() {
			let height = v.state().height;
			v.state_mut()
				.controls
				.rotate_to(ev.client_x() as f64, ev.client_y() as f64, height);
		}
	};

	let view_mu = view.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut v) = *view_mu.borrow_mut() {
			v.state_mut().controls.end_rotate();
		}
	};

	let view_ml = view.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut v) = *view_ml.borrow_mut() {
			v.state_mut().controls.end_rotate();
		}
	};

	let view_wh = view.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut v) = *view_wh.borrow_mut() {
			v.state_mut().controls.dolly(ev.delta_y());
		}
	};

	let view_ts = view.clone();
	let on_touchstart = move |ev: TouchEvent| {
		let touches = ev.touches();
		if let Some(ref mut v) = *view_ts.borrow_mut() {
			let controls = &mut v.state_mut().controls;
			match touches.length() {
				1 => {
					if let Some(touch) = touches.item(0) {
						controls.begin_rotate(touch.client_x() as f64, touch.client_y() as f64);
					}
				}
				2 => {
					if let Some(distance) = pinch_distance(&touches) {
						controls.end_rotate();
						controls.pinch_start(distance);
					}
				}
				_ => {}
			}
		}
	};

	let view_tm = view.clone();
	let on_touchmove = move |ev: TouchEvent| {
		let touches = ev.touches();
		if let Some(ref mut v) = *view_tm.borrow_mut() {
			match touches.length() {
				1 => {
					// Suppress page scroll only while a drag is live.
					if v.state().controls.is_rotating() {
						ev.prevent_default();
					}
					if let Some(touch) = touches.item(0) {
						let height = v.state().height;
						v.state_mut().controls.rotate_to(
							touch.client_x() as f64,
							touch.client_y() as f64,
							height,
						);
					}
				}
				2 => {
					ev.prevent_default();
					if let Some(distance) = pinch_distance(&touches) {
						v.state_mut().controls.pinch_move(distance);
					}
				}
				_ => {}
			}
		}
	};

	let view_te = view.clone();
	let on_touchend = move |ev: TouchEvent| {
		let touches = ev.touches();
		if let Some(ref mut v) = *view_te.borrow_mut() {
			let controls = &mut v.state_mut().controls;
			match touches.length() {
				0 => {
					controls.end_rotate();
					controls.pinch_end();
				}
				// Two fingers down to one: the pinch becomes a drag.
				1 => {
					controls.pinch_end();
					if let Some(touch) = touches.item(0) {
						controls.begin_rotate(touch.client_x() as f64, touch.client_y() as f64);
					}
				}
				_ => {}
			}
		}
	};

	let cells = SendWrapper::new((view, frame));
	on_cleanup(move || {
		let (view, frame) = &*cells;
		teardown(view, frame);
	});

	view! {
		<div
			node_ref=container_ref
			class="graph3d-container"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend
		/>
	}
}

fn initialize(
	container: &HtmlDivElement,
	data: &GraphData,
	width: Option<f64>,
	height: Option<f64>,
	view: &SharedView,
	frame: &SharedLoop,
) -> Result<()> {
	let (width, height) = viewport_size(width, height)?;
	*view.borrow_mut() = Some(Graph3dView::initialize(container, data, width, height)?);

	let tick_view = view.clone();
	*frame.borrow_mut() = Some(FrameLoop::start(move || {
		if let Some(ref mut v) = *tick_view.borrow_mut() {
			v.render_frame();
		}
	})?);
	Ok(())
}

/// Stop the frame loop first so no further tick touches the view, then
/// release the view's DOM. Harmless when nothing is initialized.
fn teardown(view: &SharedView, frame: &SharedLoop) {
	if let Some(frame) = frame.borrow_mut().take() {
		frame.cancel();
	}
	if let Some(view) = view.borrow_mut().take() {
		view.dispose();
	}
}

fn viewport_size(width: Option<f64>, height: Option<f64>) -> Result<(f64, f64)> {
	let window = web_sys::window().ok_or(Graph3dError::NoWindow)?;
	let width = match width {
		Some(width) => width,
		None => window
			.inner_width()
			.map_err(Graph3dError::from_js)?
			.as_f64()
			.unwrap_or(0.0),
	};
	let height = match height {
		Some(height) => height,
		None => window
			.inner_height()
			.map_err(Graph3dError::from_js)?
			.as_f64()
			.unwrap_or(0.0),
	};
	Ok((width, height))
}

fn pinch_distance(touches: &TouchList) -> Option<f64> {
	let a = touches.item(0)?;
	let b = touches.item(1)?;
	let dx = a.client_x() as f64 - b.client_x() as f64;
	let dy = a.client_y() as f64 - b.client_y() as f64;
	Some((dx * dx + dy * dy).sqrt())
}
