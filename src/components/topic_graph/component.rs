use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::instance::{Instance, swap};
use super::interaction::{Tooltip, tooltip};
use super::layout::{LayoutConfig, Point};
use super::render;
use super::scheduler::StopHandle;
use super::types::TopicGraphData;
use crate::error::GraphError;

const FALLBACK_WIDTH: f64 = 800.0;
const TOOLTIP_OFFSET: f64 = 10.0;

fn canvas_context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, GraphError> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		.ok_or(GraphError::CanvasUnavailable)
}

fn canvas_width(canvas: &HtmlCanvasElement) -> f64 {
	match canvas.client_width() {
		w if w > 0 => w as f64,
		_ => FALLBACK_WIDTH,
	}
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn cursor_for(hovering: bool) -> &'static str {
	if hovering { "pointer" } else { "default" }
}

fn set_cursor(canvas: &HtmlCanvasElement, hovering: bool) {
	// Spelled out: the leptos prelude brings its own `style` into scope.
	let _ = web_sys::HtmlElement::style(canvas).set_property("cursor", cursor_for(hovering));
}

/// Browser resources of one mounted graph. The frame and resize closures hold
/// an `Rc` back to this, so `teardown` must run to break the cycle.
#[derive(Default)]
struct FrameLoop {
	state: RefCell<Option<Instance>>,
	animate: RefCell<Option<Closure<dyn FnMut()>>>,
	resize: RefCell<Option<Closure<dyn FnMut()>>>,
	pending: Cell<Option<i32>>,
}

impl FrameLoop {
	fn request_frame(&self) {
		if let (Some(cb), Some(window)) = (self.animate.borrow().as_ref(), web_sys::window()) {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				self.pending.set(Some(id));
			}
		}
	}

	/// Stop the current instance, cancel its pending frame and drop its closure.
	fn halt(&self) {
		if let (Some(id), Some(window)) = (self.pending.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		swap(&mut self.state.borrow_mut(), None);
		self.animate.borrow_mut().take();
	}

	fn teardown(&self) {
		self.halt();
		if let Some(cb) = self.resize.borrow_mut().take() {
			if let Some(window) = web_sys::window() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	}

	fn watch_resize(self: &Rc<Self>, window: &Window, canvas: &HtmlCanvasElement, height: f64) {
		if self.resize.borrow().is_some() {
			return;
		}
		let (frames, canvas) = (Rc::clone(self), canvas.clone());
		let cb: Closure<dyn FnMut()> = Closure::new(move || {
			let width = canvas_width(&canvas);
			canvas.set_width(width as u32);
			if let Some(ref mut inst) = *frames.state.borrow_mut() {
				inst.layout.resize(width, height);
			}
		});
		let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		*self.resize.borrow_mut() = Some(cb);
	}

	fn run(self: &Rc<Self>, handle: StopHandle, mut ctx: CanvasRenderingContext2d) {
		let frames = Rc::clone(self);
		*self.animate.borrow_mut() = Some(Closure::new(move || {
			frames.pending.set(None);
			if !handle.is_running() {
				return;
			}
			if let Some(ref mut inst) = *frames.state.borrow_mut() {
				if inst.scheduler.advance(&mut inst.layout).is_none() {
					return;
				}
				render::render(&mut ctx, &inst.layout, inst.interaction.hovered());
			}
			frames.request_frame();
		}));
		self.request_frame();
	}
}

/// Force-directed view of topics and how often they appear together.
#[component]
pub fn TopicGraph(
	#[prop(into)] data: Signal<TopicGraphData>,
	#[prop(optional, into)] on_node_click: Option<Callback<String>>,
	#[prop(optional)] config: LayoutConfig,
	#[prop(default = 600.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let (tip, set_tip) = signal(None::<(Tooltip, Point)>);
	let frames: Rc<FrameLoop> = Rc::new(FrameLoop::default());

	let frames_cleanup = SendWrapper::new(frames.clone());
	on_cleanup(move || frames_cleanup.teardown());

	let frames_init = frames.clone();
	Effect::new(move |_| {
		let graph = data.get();

		// A new data push always retires the previous instance.
		frames_init.halt();
		set_tip.set(None);

		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if graph.is_empty() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let width = canvas_width(&canvas);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let ctx = match canvas_context(&canvas) {
			Ok(ctx) => ctx,
			Err(err) => {
				warn!("topic graph not drawn: {err}");
				return;
			}
		};

		let Some(instance) = Instance::start(&graph, width, height, config.clone()) else {
			return;
		};
		info!(
			"topic graph initialized with {} nodes and {} edges",
			instance.layout.nodes().len(),
			instance.layout.links().len()
		);
		let Some(handle) = swap(&mut frames_init.state.borrow_mut(), Some(instance)) else {
			return;
		};

		frames_init.watch_resize(&window, &canvas, height);
		frames_init.run(handle, ctx);
	});

	let frames_mm = frames.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let pointer = pointer_position(&canvas, &ev);

		if let Some(ref mut inst) = *frames_mm.state.borrow_mut() {
			if inst.interaction.pointer_moved(&inst.layout, pointer) {
				set_cursor(&canvas, inst.interaction.hovered().is_some());
			}
			set_tip.set(tooltip(&inst.layout, inst.interaction.hovered()).zip(inst.interaction.pointer()));
		}
	};

	let frames_ml = frames.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut inst) = *frames_ml.state.borrow_mut() {
			inst.interaction.pointer_left();
		}
		if let Some(canvas) = canvas_ref.get() {
			set_cursor(&canvas.into(), false);
		}
		set_tip.set(None);
	};

	let frames_click = frames.clone();
	let on_click = move |_: MouseEvent| {
		let clicked = frames_click
			.state
			.borrow()
			.as_ref()
			.and_then(|inst| inst.interaction.click().map(str::to_owned));
		if let (Some(id), Some(callback)) = (clicked, on_node_click.as_ref()) {
			info!("topic node clicked: {id}");
			callback.run(id);
		}
	};

	let is_empty = move || data.with(TopicGraphData::is_empty);

	view! {
		<div class="topic-graph" style="position: relative;">
			{move || {
				is_empty()
					.then(|| {
						view! {
							<div
								class="topic-graph-empty"
								style=format!(
									"height: {height}px; display: flex; align-items: center; justify-content: center;",
								)
							>
								"no data available"
							</div>
						}
					})
			}}
			<canvas
				node_ref=canvas_ref
				class="topic-graph-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:click=on_click
				style=move || {
					let display = if is_empty() { "none" } else { "block" };
					format!("display: {display}; width: 100%; height: {height}px; border-radius: 8px;")
				}
			/>
			{move || {
				tip.get()
					.map(|(tip, at)| {
						view! {
							<div
								class="topic-graph-tooltip"
								style=format!(
									"position: absolute; left: {}px; top: {}px; pointer-events: none; z-index: 1000;",
									at.x + TOOLTIP_OFFSET,
									at.y + TOOLTIP_OFFSET,
								)
							>
								<div class="topic-graph-tooltip-label">{tip.label}</div>
								<div class="topic-graph-tooltip-count">{tip.count}</div>
							</div>
						}
					})
			}}
		</div>
	}
}
