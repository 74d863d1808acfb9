use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use super::layout::Layout;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Physics still runs on every frame.
	Simulating,
	/// Positions are frozen; frames only repaint.
	Settled,
}

/// Stops a running loop from code that does not own the scheduler.
#[derive(Clone, Debug)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
	pub fn stop(&self) {
		self.0.store(false, Ordering::Relaxed);
	}

	pub fn is_running(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// Frame-driven loop over one layout. The frame counter is the only clock,
/// so a test can single-step it without any display refresh.
#[derive(Debug)]
pub struct FrameScheduler {
	running: Arc<AtomicBool>,
	frame: u32,
	settle_ticks: u32,
}

impl FrameScheduler {
	pub fn new(settle_ticks: u32) -> Self {
		Self {
			running: Arc::new(AtomicBool::new(false)),
			frame: 0,
			settle_ticks,
		}
	}

	pub fn start(&mut self) {
		self.running.store(true, Ordering::Relaxed);
	}

	pub fn stop(&mut self) {
		self.running.store(false, Ordering::Relaxed);
	}

	pub fn is_running(&self) -> bool {
		self.running.load(Ordering::Relaxed)
	}

	pub fn stop_handle(&self) -> StopHandle {
		StopHandle(self.running.clone())
	}

	pub fn frame(&self) -> u32 {
		self.frame
	}

	pub fn phase(&self) -> Phase {
		if self.frame < self.settle_ticks {
			Phase::Simulating
		} else {
			Phase::Settled
		}
	}

	/// Run one frame. `None` once the loop has been stopped.
	pub fn advance(&mut self, layout: &mut Layout) -> Option<Phase> {
		if !self.is_running() {
			return None;
		}
		let phase = self.phase();
		if phase == Phase::Simulating {
			layout.step();
		}
		self.frame = self.frame.saturating_add(1);
		if self.frame == self.settle_ticks {
			debug!("topic graph settled after {} ticks", self.frame);
		}
		Some(phase)
	}
}
