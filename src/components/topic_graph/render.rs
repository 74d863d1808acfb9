use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::layout::{Layout, Point};

pub const LABEL_THRESHOLD: f64 = 3.0;
const RADIUS_SCALE: f64 = 3.0;
const MIN_RADIUS: f64 = 5.0;
const LABEL_GAP: f64 = 10.0;

const EDGE_COLOR: &str = "rgba(128, 128, 128, 0.3)";
const NODE_COLOR: &str = "#8b5cf6";
const HOVER_COLOR: &str = "#6366f1";
const LABEL_COLOR: &str = "#fff";
const LABEL_FONT: &str = "12px sans-serif";
const HOVER_FONT: &str = "bold 14px sans-serif";

/// Drawing primitives the renderer needs from its target.
pub trait Surface {
	fn clear(&mut self, width: f64, height: f64);
	fn line(&mut self, from: Point, to: Point, width: f64, color: &str);
	fn circle(&mut self, center: Point, radius: f64, color: &str);
	/// Text centered horizontally and vertically on `at`.
	fn text(&mut self, text: &str, at: Point, font: &str, color: &str);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn line(&mut self, from: Point, to: Point, width: f64, color: &str) {
		self.set_stroke_style_str(color);
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.x, from.y);
		self.line_to(to.x, to.y);
		self.stroke();
	}

	fn circle(&mut self, center: Point, radius: f64, color: &str) {
		self.set_fill_style_str(color);
		self.begin_path();
		let _ = self.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
		self.fill();
	}

	fn text(&mut self, text: &str, at: Point, font: &str, color: &str) {
		self.set_fill_style_str(color);
		self.set_font(font);
		self.set_text_align("center");
		self.set_text_baseline("middle");
		let _ = self.fill_text(text, at.x, at.y);
	}
}

/// Area, not radius, grows with weight.
pub fn node_radius(weight: f64) -> f64 {
	weight.max(0.0).sqrt() * RADIUS_SCALE + MIN_RADIUS
}

pub fn edge_width(weight: f64) -> f64 {
	weight.max(0.0).sqrt() * 0.5
}

pub fn render<S: Surface + ?Sized>(surface: &mut S, layout: &Layout, hovered: Option<&str>) {
	surface.clear(layout.width(), layout.height());
	if layout.is_empty() {
		return;
	}

	let nodes = layout.nodes();
	for link in layout.links() {
		surface.line(
			nodes[link.from].position,
			nodes[link.to].position,
			edge_width(link.weight),
			EDGE_COLOR,
		);
	}

	for node in nodes {
		let radius = node_radius(node.weight);
		let is_hovered = hovered == Some(node.id.as_str());
		let color = if is_hovered { HOVER_COLOR } else { NODE_COLOR };
		surface.circle(node.position, radius, color);

		if is_hovered || node.weight > LABEL_THRESHOLD {
			let font = if is_hovered { HOVER_FONT } else { LABEL_FONT };
			let at = Point::new(node.position.x, node.position.y - radius - LABEL_GAP);
			surface.text(&node.label, at, font, LABEL_COLOR);
		}
	}
}
