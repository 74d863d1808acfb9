use super::layout::{Layout, Point};
use super::render::node_radius;

/// The node under `pointer`. Overlaps resolve to the topmost drawn node,
/// which is the last one in input order.
pub fn hit_test<'a>(layout: &'a Layout, pointer: Point) -> Option<&'a str> {
	layout
		.nodes()
		.iter()
		.rev()
		.find(|node| node.position.distance(pointer) < node_radius(node.weight))
		.map(|node| node.id.as_str())
}

/// Hover state for one graph instance.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
	hovered: Option<String>,
	pointer: Option<Point>,
}

impl Interaction {
	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// Last pointer position while something is hovered.
	pub fn pointer(&self) -> Option<Point> {
		self.pointer
	}

	/// Returns true when the hovered node changed.
	pub fn pointer_moved(&mut self, layout: &Layout, pointer: Point) -> bool {
		let found = hit_test(layout, pointer).map(str::to_owned);
		self.pointer = found.as_ref().map(|_| pointer);
		if found == self.hovered {
			return false;
		}
		self.hovered = found;
		true
	}

	pub fn pointer_left(&mut self) {
		self.hovered = None;
		self.pointer = None;
	}

	/// Id to hand to the host when the pointer is clicked.
	pub fn click(&self) -> Option<&str> {
		self.hovered()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub label: String,
	pub count: String,
}

pub fn tooltip(layout: &Layout, hovered: Option<&str>) -> Option<Tooltip> {
	let node = layout.node(hovered?)?;
	Some(Tooltip {
		label: format!("#{}", node.label),
		count: count_label(node.weight),
	})
}

pub fn count_label(value: f64) -> String {
	let noun = if value == 1.0 { "entry" } else { "entries" };
	if value.fract() == 0.0 {
		format!("{} {}", value as i64, noun)
	} else {
		format!("{} {}", value, noun)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topic_graph::layout::LayoutConfig;
	use crate::components::topic_graph::render::{self, Surface};
	use crate::components::topic_graph::scheduler::FrameScheduler;
	use crate::components::topic_graph::types::{TopicEdge, TopicGraphData, TopicNode};

	fn scenario() -> TopicGraphData {
		TopicGraphData {
			nodes: vec![
				TopicNode {
					id: "a".into(),
					label: "a".into(),
					value: 1.0,
				},
				TopicNode {
					id: "b".into(),
					label: "b".into(),
					value: 9.0,
				},
			],
			edges: vec![TopicEdge::new("a", "b", 5.0)],
		}
	}

	#[derive(Default)]
	struct Lines(usize);

	impl Surface for Lines {
		fn clear(&mut self, _: f64, _: f64) {}
		fn line(&mut self, _: Point, _: Point, _: f64, _: &str) {
			self.0 += 1;
		}
		fn circle(&mut self, _: Point, _: f64, _: &str) {}
		fn text(&mut self, _: &str, _: Point, _: &str, _: &str) {}
	}

	#[test]
	fn settled_pair_scenario() {
		let mut layout = Layout::new(&scenario(), 800.0, 600.0, LayoutConfig::default());
		let mut scheduler = FrameScheduler::new(layout.config().settle_ticks);
		scheduler.start();
		for _ in 0..400 {
			scheduler.advance(&mut layout);
		}

		let (a, b) = (layout.node("a").unwrap(), layout.node("b").unwrap());
		assert!(node_radius(b.weight) > node_radius(a.weight));

		let mut lines = Lines::default();
		render::render(&mut lines, &layout, None);
		assert_eq!(lines.0, 1);

		assert_eq!(hit_test(&layout, b.position), Some("b"));
	}

	#[test]
	fn center_hit_resolves_to_node() {
		let data = TopicGraphData {
			nodes: (0..6).map(|i| TopicNode::new(format!("n{i}"), 2.0)).collect(),
			edges: vec![],
		};
		let layout = Layout::new(&data, 800.0, 600.0, LayoutConfig::default());
		for node in layout.nodes() {
			assert_eq!(hit_test(&layout, node.position), Some(node.id.as_str()));
		}
		assert_eq!(hit_test(&layout, layout.center()), None);
	}

	#[test]
	fn overlap_prefers_topmost() {
		// Forty heavy topics on the initial ring: neighbouring circles overlap.
		let data = TopicGraphData {
			nodes: (0..40).map(|i| TopicNode::new(format!("n{i}"), 50.0)).collect(),
			edges: vec![],
		};
		let layout = Layout::new(&data, 800.0, 600.0, LayoutConfig::default());
		let (first, second) = (layout.nodes()[0].position, layout.nodes()[1].position);
		let between = (first + second) * 0.5;
		let radius = node_radius(50.0);
		assert!(between.distance(first) < radius && between.distance(second) < radius);
		assert_eq!(hit_test(&layout, between), Some("n1"));
	}

	#[test]
	fn empty_graph_never_hits() {
		let layout = Layout::new(&TopicGraphData::default(), 800.0, 600.0, LayoutConfig::default());
		let mut interaction = Interaction::default();
		for p in [Point::new(0.0, 0.0), Point::new(400.0, 300.0), Point::new(-5.0, 1e6)] {
			assert_eq!(hit_test(&layout, p), None);
			assert!(!interaction.pointer_moved(&layout, p));
		}
		assert_eq!(interaction.click(), None);
		assert_eq!(tooltip(&layout, interaction.hovered()), None);
	}

	#[test]
	fn hover_tracks_changes_and_clicks() {
		let layout = Layout::new(&scenario(), 800.0, 600.0, LayoutConfig::default());
		let b = layout.position_of("b").unwrap();
		let mut interaction = Interaction::default();

		assert!(interaction.pointer_moved(&layout, b));
		assert!(!interaction.pointer_moved(&layout, b + Point::new(1.0, 1.0)));
		assert_eq!(interaction.click(), Some("b"));
		assert_eq!(interaction.pointer(), Some(b + Point::new(1.0, 1.0)));

		assert!(interaction.pointer_moved(&layout, layout.center()));
		assert_eq!(interaction.click(), None);
		assert_eq!(interaction.pointer(), None);

		interaction.pointer_moved(&layout, b);
		interaction.pointer_left();
		assert_eq!(interaction.hovered(), None);
	}

	#[test]
	fn tooltip_pluralizes() {
		let layout = Layout::new(&scenario(), 800.0, 600.0, LayoutConfig::default());
		assert_eq!(
			tooltip(&layout, Some("a")),
			Some(Tooltip {
				label: "#a".into(),
				count: "1 entry".into()
			})
		);
		assert_eq!(tooltip(&layout, Some("b")).unwrap().count, "9 entries");
		assert_eq!(tooltip(&layout, Some("zzz")), None);
		assert_eq!(count_label(0.0), "0 entries");
		assert_eq!(count_label(2.5), "2.5 entries");
	}
}
