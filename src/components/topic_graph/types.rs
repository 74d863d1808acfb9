use serde::Deserialize;

use crate::error::GraphError;

#[derive(Clone, Debug, PartialEq)]
pub struct TopicNode {
	pub id: String,
	pub label: String,
	pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TopicEdge {
	pub from: String,
	pub to: String,
	#[serde(default)]
	pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TopicGraphData {
	#[serde(default)]
	pub nodes: Vec<TopicNode>,
	#[serde(default)]
	pub edges: Vec<TopicEdge>,
}

// Label falls back to the id when the payload leaves it out.
#[derive(Deserialize)]
struct RawNode {
	id: String,
	label: Option<String>,
	#[serde(default)]
	value: f64,
}

impl<'de> Deserialize<'de> for TopicNode {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = RawNode::deserialize(deserializer)?;
		Ok(Self {
			label: raw.label.unwrap_or_else(|| raw.id.clone()),
			id: raw.id,
			value: raw.value,
		})
	}
}

#[cfg(test)]
impl TopicNode {
	pub fn new(id: impl Into<String>, value: f64) -> Self {
		let id = id.into();
		Self {
			label: id.clone(),
			id,
			value,
		}
	}
}

#[cfg(test)]
impl TopicEdge {
	pub fn new(from: impl Into<String>, to: impl Into<String>, value: f64) -> Self {
		Self {
			from: from.into(),
			to: to.into(),
			value,
		}
	}
}

impl TopicGraphData {
	/// Parse the `{ nodes, edges }` payload served by the topic graph endpoint.
	pub fn from_json(payload: &str) -> Result<Self, GraphError> {
		Ok(serde_json::from_str(payload)?)
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Up to `n` edges, heaviest first. Ties keep payload order.
	pub fn strongest_edges(&self, n: usize) -> Vec<&TopicEdge> {
		let mut edges: Vec<&TopicEdge> = self.edges.iter().collect();
		edges.sort_by(|a, b| b.value.total_cmp(&a.value));
		edges.truncate(n);
		edges
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_backend_payload() {
		let data = TopicGraphData::from_json(
			r#"{
				"nodes": [
					{"id": "anxiety", "label": "anxiety", "value": 4},
					{"id": "work", "value": 2}
				],
				"edges": [{"from": "anxiety", "to": "work", "value": 3}]
			}"#,
		)
		.expect("payload should parse");

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[1].label, "work");
		assert_eq!(data.nodes[0].value, 4.0);
		assert_eq!(data.edges[0], TopicEdge::new("anxiety", "work", 3.0));
	}

	#[test]
	fn missing_collections_mean_empty_graph() {
		let data = TopicGraphData::from_json("{}").expect("empty object should parse");
		assert!(data.is_empty());
		assert!(data.edges.is_empty());
	}

	#[test]
	fn rejects_malformed_payload() {
		let err = TopicGraphData::from_json(r#"{"nodes": [{"label": "no id"}]}"#);
		assert!(matches!(err, Err(GraphError::InvalidPayload(_))));
	}

	#[test]
	fn strongest_edges_are_sorted_and_truncated() {
		let data = TopicGraphData {
			nodes: vec![],
			edges: vec![
				TopicEdge::new("a", "b", 1.0),
				TopicEdge::new("b", "c", 5.0),
				TopicEdge::new("a", "c", 5.0),
				TopicEdge::new("c", "d", 2.0),
			],
		};
		let top: Vec<_> = data
			.strongest_edges(3)
			.into_iter()
			.map(|e| (e.from.as_str(), e.to.as_str()))
			.collect();
		assert_eq!(top, vec![("b", "c"), ("a", "c"), ("c", "d")]);
	}
}
