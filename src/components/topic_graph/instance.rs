use log::debug;

use super::interaction::Interaction;
use super::layout::{Layout, LayoutConfig};
use super::scheduler::{FrameScheduler, StopHandle};
use super::types::TopicGraphData;

/// Everything one data push owns: positions, its frame loop and hover state.
pub struct Instance {
	pub layout: Layout,
	pub scheduler: FrameScheduler,
	pub interaction: Interaction,
}

impl Instance {
	/// A running instance, or `None` for an empty graph (placeholder state).
	pub fn start(data: &TopicGraphData, width: f64, height: f64, config: LayoutConfig) -> Option<Self> {
		if data.is_empty() {
			return None;
		}
		let layout = Layout::new(data, width, height, config);
		let mut scheduler = FrameScheduler::new(layout.config().settle_ticks);
		scheduler.start();
		Some(Self {
			layout,
			scheduler,
			interaction: Interaction::default(),
		})
	}

	pub fn retire(&mut self) {
		debug!("retiring topic graph after {} frames", self.scheduler.frame());
		self.scheduler.stop();
	}
}

/// Retire whatever occupies `slot`, install `next` and hand back its stop handle.
pub fn swap(slot: &mut Option<Instance>, next: Option<Instance>) -> Option<StopHandle> {
	if let Some(mut previous) = slot.take() {
		previous.retire();
	}
	*slot = next;
	slot.as_ref().map(|inst| inst.scheduler.stop_handle())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topic_graph::layout::Point;
	use crate::components::topic_graph::types::{TopicEdge, TopicNode};

	fn graph(ids: &[&str]) -> TopicGraphData {
		TopicGraphData {
			nodes: ids.iter().map(|id| TopicNode::new(*id, 4.0)).collect(),
			edges: vec![TopicEdge::new(ids[0], ids[ids.len() - 1], 2.0)],
		}
	}

	fn positions(inst: &Instance) -> Vec<Point> {
		inst.layout.nodes().iter().map(|n| n.position).collect()
	}

	#[test]
	fn empty_graph_starts_nothing() {
		assert!(Instance::start(&TopicGraphData::default(), 800.0, 600.0, LayoutConfig::default()).is_none());

		let mut slot = None;
		assert!(swap(&mut slot, None).is_none());
		assert!(slot.is_none());
	}

	#[test]
	fn new_push_retires_previous_loop() {
		let mut slot = None;
		let first = Instance::start(&graph(&["a", "b"]), 800.0, 600.0, LayoutConfig::default());
		let first_handle = swap(&mut slot, first).expect("first instance installed");
		assert!(first_handle.is_running());

		if let Some(inst) = slot.as_mut() {
			for _ in 0..50 {
				inst.scheduler.advance(&mut inst.layout);
			}
			assert_eq!(inst.scheduler.frame(), 50);
		}

		let second = Instance::start(&graph(&["x", "y", "z"]), 800.0, 600.0, LayoutConfig::default());
		let second_handle = swap(&mut slot, second).expect("second instance installed");

		assert!(!first_handle.is_running());
		assert!(second_handle.is_running());

		let inst = slot.as_ref().expect("slot holds the new instance");
		assert_eq!(inst.scheduler.frame(), 0);
		assert!(inst.layout.node("a").is_none());
		assert!(inst.interaction.hovered().is_none());

		let fresh = Instance::start(&graph(&["x", "y", "z"]), 800.0, 600.0, LayoutConfig::default())
			.expect("fresh instance");
		assert_eq!(positions(inst), positions(&fresh));
	}

	#[test]
	fn emptied_data_stops_the_running_loop() {
		let mut slot = None;
		let handle = swap(
			&mut slot,
			Instance::start(&graph(&["a", "b"]), 800.0, 600.0, LayoutConfig::default()),
		)
		.expect("instance installed");

		let next = Instance::start(&TopicGraphData::default(), 800.0, 600.0, LayoutConfig::default());
		assert!(swap(&mut slot, next).is_none());
		assert!(!handle.is_running());
		assert!(slot.is_none());
	}
}
