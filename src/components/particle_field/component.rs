//! Leptos component hosting the particle field on a background canvas.
//!
//! The component owns the host side of the engine: it sizes the canvas to the
//! window, drives ticks from `requestAnimationFrame`, and forwards window
//! resizes. A theme change cancels the pending frame, detaches the resize
//! listener and restarts the engine from scratch. Unmounting the component or
//! detaching the canvas stops the engine and drops the animation callback.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::config::FieldConfig;
use super::engine::{Control, ParticleEngine};
use super::theme::ThemeMode;
use super::viewport::Viewport;

/// Host resources that must not outlive a run of the engine.
#[derive(Default)]
struct HostHandles {
	frame: Option<i32>,
	resize: Option<Closure<dyn FnMut()>>,
}

impl HostHandles {
	/// Cancel the pending frame and detach the resize listener.
	/// Safe to call repeatedly or before anything was scheduled.
	fn release(&mut self, window: &Window) {
		if let Some(id) = self.frame.take() {
			let _ = window.cancel_animation_frame(id);
		}
		if let Some(cb) = self.resize.take() {
			let _ =
				window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}
}

/// Everything one mounted canvas keeps alive between frames.
///
/// The animation callback holds an `Rc` to its host, so the host holds the
/// callback only until [`shut_down`](Self::shut_down) takes it back out.
struct FieldHost<C = Closure<dyn FnMut(f64)>> {
	engine: RefCell<Option<ParticleEngine>>,
	handles: RefCell<HostHandles>,
	animate: RefCell<Option<C>>,
}

impl<C> Default for FieldHost<C> {
	fn default() -> Self {
		Self {
			engine: RefCell::new(None),
			handles: RefCell::new(HostHandles::default()),
			animate: RefCell::new(None),
		}
	}
}

impl<C> FieldHost<C> {
	/// Stop the engine and drop the animation callback. Idempotent.
	fn shut_down(&self) {
		if let Some(ref mut engine) = *self.engine.borrow_mut() {
			engine.stop();
		}
		let _callback = self.animate.borrow_mut().take();
	}
}

impl FieldHost {
	fn teardown(&self, window: &Window) {
		self.handles.borrow_mut().release(window);
		self.shut_down();
	}

	/// Request the next animation frame for the current callback, if any.
	fn schedule(&self, window: &Window) {
		let frame = match *self.animate.borrow() {
			Some(ref cb) => window.request_animation_frame(cb.as_ref().unchecked_ref()).ok(),
			None => None,
		};
		self.handles.borrow_mut().frame = frame;
	}
}

fn window_viewport(window: &Window) -> Viewport {
	let dimension = |value: Result<JsValue, JsValue>| {
		value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
	};
	Viewport::new(
		dimension(window.inner_width()),
		dimension(window.inner_height()),
	)
}

fn resize_canvas(canvas: &HtmlCanvasElement, viewport: &Viewport) {
	canvas.set_width(viewport.width() as u32);
	canvas.set_height(viewport.height() as u32);
}

fn random_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Animated particle background that follows the `theme` signal.
///
/// The canvas is fixed behind the page and ignores pointer events. When the
/// canvas leaves the document the next frame tears the loop down.
#[component]
pub fn ParticleFieldCanvas(
	/// Theme to draw with. Every change restarts the field.
	#[prop(into)]
	theme: Signal<ThemeMode>,
	/// Overrides for the simulation defaults.
	#[prop(optional)]
	config: FieldConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let host: Rc<FieldHost> = Rc::new(FieldHost::default());

	let stored = StoredValue::new_local(host.clone());
	on_cleanup(move || {
		if let Some(window) = web_sys::window() {
			let _ = stored.try_with_value(|host| host.teardown(&window));
		}
		info!("particle-field: unmounted, loop torn down");
	});

	Effect::new(move |_| {
		let theme = theme.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("particle-field: no window, not starting");
			return;
		};

		host.handles.borrow_mut().release(&window);

		let viewport = window_viewport(&window);
		resize_canvas(&canvas, &viewport);

		let Some(mut ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("particle-field: 2d context unavailable, not starting");
			return;
		};

		{
			let mut slot = host.engine.borrow_mut();
			match slot.as_mut() {
				Some(running) => running.restart(theme, viewport),
				None => {
					let mut fresh =
						ParticleEngine::new(config.clone(), theme, viewport, random_seed());
					fresh.start();
					*slot = Some(fresh);
				}
			}
		}

		let (host_resize, canvas_resize) = (host.clone(), canvas.clone());
		let on_resize = Closure::<dyn FnMut()>::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let next = window_viewport(&win);
			if let Some(ref mut e) = *host_resize.engine.borrow_mut() {
				if e.resize(next.width(), next.height()) {
					resize_canvas(&canvas_resize, e.viewport());
				}
			}
		});
		let _ =
			window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
		host.handles.borrow_mut().resize = Some(on_resize);

		let host_anim = host.clone();
		let animate = Closure::<dyn FnMut(f64)>::new(move |now: f64| {
			let Some(win) = web_sys::window() else {
				return;
			};
			host_anim.handles.borrow_mut().frame = None;

			if !canvas.is_connected() {
				// Dropping the running callback is deferred until it returns.
				host_anim.teardown(&win);
				info!("particle-field: canvas detached, loop torn down");
				return;
			}

			let control = match *host_anim.engine.borrow_mut() {
				Some(ref mut e) => e.tick(now, &mut ctx),
				None => Control::Stop,
			};
			if control == Control::Reschedule {
				host_anim.schedule(&win);
			}
		});
		*host.animate.borrow_mut() = Some(animate);
		host.schedule(&window);
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; display: block; pointer-events: none; z-index: -1;"
		/>
	}
}
