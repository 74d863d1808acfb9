use std::collections::HashMap;
use std::f64::consts::PI;
use std::ops::{Add, AddAssign, Mul, Sub};

use super::types::TopicGraphData;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	pub fn distance(self, other: Point) -> f64 {
		(self - other).length()
	}
}

impl Add for Point {
	type Output = Point;
	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl AddAssign for Point {
	fn add_assign(&mut self, rhs: Point) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl Sub for Point {
	type Output = Point;
	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Point;
	fn mul(self, rhs: f64) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}

/// Simulation constants. The defaults settle a few dozen topics on a
/// 600px tall canvas in well under the tick budget.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Fraction of the velocity applied to the position each tick.
	pub alpha: f64,
	pub center_gain: f64,
	/// Inverse-square repulsion numerator.
	pub repulsion: f64,
	/// Spring gain per unit of edge weight.
	pub attraction: f64,
	/// Multiplicative velocity decay per tick.
	pub damping: f64,
	/// Ticks of physics before the layout freezes.
	pub settle_ticks: u32,
	/// Initial ring radius as a fraction of the smaller canvas side.
	pub ring_ratio: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			alpha: 0.1,
			center_gain: 0.01,
			repulsion: 3000.0,
			attraction: 0.001,
			damping: 0.9,
			settle_ticks: 300,
			ring_ratio: 0.3,
		}
	}
}

/// A positioned topic as seen by the renderer and the hit test.
#[derive(Clone, Debug)]
pub struct LaidOutNode {
	pub id: String,
	pub label: String,
	pub weight: f64,
	pub position: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub from: usize,
	pub to: usize,
	pub weight: f64,
}

/// Owned layout state for one graph instance.
pub struct Layout {
	nodes: Vec<LaidOutNode>,
	velocities: Vec<Point>,
	links: Vec<Link>,
	index: HashMap<String, usize>,
	width: f64,
	height: f64,
	config: LayoutConfig,
}

impl Layout {
	pub fn new(data: &TopicGraphData, width: f64, height: f64, config: LayoutConfig) -> Self {
		let mut index = HashMap::with_capacity(data.nodes.len());
		let mut nodes = Vec::with_capacity(data.nodes.len());

		for node in &data.nodes {
			if index.contains_key(&node.id) {
				continue;
			}
			index.insert(node.id.clone(), nodes.len());
			nodes.push(LaidOutNode {
				id: node.id.clone(),
				label: node.label.clone(),
				weight: node.value.max(0.0),
				position: Point::default(),
			});
		}

		let center = Point::new(width / 2.0, height / 2.0);
		let ring = width.min(height) * config.ring_ratio;
		let count = nodes.len() as f64;
		for (i, node) in nodes.iter_mut().enumerate() {
			let angle = (i as f64 / count) * 2.0 * PI;
			node.position = center + Point::new(angle.cos(), angle.sin()) * ring;
		}

		let mut links = Vec::with_capacity(data.edges.len());
		for edge in &data.edges {
			match (index.get(&edge.from), index.get(&edge.to)) {
				(Some(&from), Some(&to)) => links.push(Link {
					from,
					to,
					weight: edge.value.max(0.0),
				}),
				// Dangling reference: the edge takes no part in layout or drawing.
				_ => continue,
			}
		}

		Self {
			velocities: vec![Point::default(); nodes.len()],
			nodes,
			links,
			index,
			width,
			height,
			config,
		}
	}

	/// Advance the simulation by one tick.
	///
	/// Forces for every node are computed from the positions at the start of
	/// the tick, then all nodes move together. Nodes never see a neighbour
	/// that already moved during the same tick, so the result does not
	/// depend on iteration order.
	pub fn step(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let positions: Vec<Point> = self.nodes.iter().map(|n| n.position).collect();
		let center = self.center();
		let cfg = &self.config;

		for (i, &p) in positions.iter().enumerate() {
			let mut force = (center - p) * cfg.center_gain;

			for (j, &q) in positions.iter().enumerate() {
				if i == j {
					continue;
				}
				let delta = p - q;
				let mut dist = delta.length();
				if dist == 0.0 {
					dist = 1.0;
				}
				force += delta * (cfg.repulsion / (dist * dist * dist));
			}

			for link in &self.links {
				let other = if link.from == i {
					link.to
				} else if link.to == i {
					link.from
				} else {
					continue;
				};
				force += (positions[other] - p) * (cfg.attraction * link.weight);
			}

			self.velocities[i] += force;
		}

		for (node, velocity) in self.nodes.iter_mut().zip(self.velocities.iter_mut()) {
			node.position += *velocity * cfg.alpha;
			*velocity = *velocity * cfg.damping;
		}
	}

	pub fn nodes(&self) -> &[LaidOutNode] {
		&self.nodes
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	pub fn node(&self, id: &str) -> Option<&LaidOutNode> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	#[cfg(test)]
	pub fn position_of(&self, id: &str) -> Option<Point> {
		self.node(id).map(|n| n.position)
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
