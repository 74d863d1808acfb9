use leptos::prelude::*;
use log::warn;

use crate::components::topic_graph::{TopicGraph, TopicGraphData};

/// Snapshot of the public topic connections payload.
const SAMPLE_PAYLOAD: &str = r#"{
	"nodes": [
		{"id": "anxiety", "label": "anxiety", "value": 14},
		{"id": "burnout", "label": "burnout", "value": 11},
		{"id": "cofounders", "label": "cofounders", "value": 7},
		{"id": "fundraising", "label": "fundraising", "value": 9},
		{"id": "sleep", "label": "sleep", "value": 5},
		{"id": "family", "label": "family", "value": 4},
		{"id": "imposter-syndrome", "label": "imposter-syndrome", "value": 6},
		{"id": "shipping", "label": "shipping", "value": 3},
		{"id": "loneliness", "label": "loneliness", "value": 2},
		{"id": "exercise", "label": "exercise", "value": 1}
	],
	"edges": [
		{"from": "anxiety", "to": "fundraising", "value": 6},
		{"from": "anxiety", "to": "burnout", "value": 5},
		{"from": "burnout", "to": "sleep", "value": 4},
		{"from": "cofounders", "to": "burnout", "value": 3},
		{"from": "anxiety", "to": "imposter-syndrome", "value": 3},
		{"from": "family", "to": "loneliness", "value": 2},
		{"from": "shipping", "to": "imposter-syndrome", "value": 2},
		{"from": "cofounders", "to": "fundraising", "value": 2},
		{"from": "exercise", "to": "sleep", "value": 1},
		{"from": "family", "to": "burnout", "value": 1},
		{"from": "loneliness", "to": "anxiety", "value": 1}
	]
}"#;

fn sample_data() -> TopicGraphData {
	TopicGraphData::from_json(SAMPLE_PAYLOAD).unwrap_or_else(|err| {
		warn!("sample topic payload rejected: {err}");
		TopicGraphData::default()
	})
}

/// Explore page: how topics relate across public posts.
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Memo::new(|_| sample_data());
	let (selected, set_selected) = signal(None::<String>);

	let top_connections = move || {
		graph_data.with(|data| {
			data.strongest_edges(10)
				.into_iter()
				.map(|edge| {
					view! {
						<div class="topic-connection">
							<span class="text-accent">{format!("#{}", edge.from)}</span>
							<span class="text-tertiary">" ↔ "</span>
							<span class="text-accent">{format!("#{}", edge.to)}</span>
							<span class="text-secondary">
								{format!(" {} shared posts", edge.value)}
							</span>
						</div>
					}
				})
				.collect_view()
		})
	};

	view! {
		<div class="container">
			<h1>"explore topic connections"</h1>
			<p class="subtitle">"discover how topics relate across all public posts"</p>

			<Show
				when=move || !graph_data.with(TopicGraphData::is_empty)
				fallback=|| {
					view! {
						<div class="card text-center text-secondary">
							<p>"no topic connections yet. start by creating some posts!"</p>
						</div>
					}
				}
			>
				<div class="card">
					<p class="text-secondary">
						"larger nodes represent topics with more posts. thicker connections mean topics appear together more often. click a node to select it."
					</p>
				</div>
			</Show>

			<div class="card">
				<TopicGraph
					data=graph_data
					on_node_click=move |id: String| set_selected.set(Some(id))
				/>
			</div>

			<p class="selected-topic">
				{move || {
					selected
						.get()
						.map(|id| format!("selected topic: #{id}"))
						.unwrap_or_else(|| "click a topic to select it".into())
				}}
			</p>

			<div class="card">
				<h3>"top connected topics"</h3>
				{top_connections}
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_payload_is_consistent() {
		let data = sample_data();
		assert_eq!(data.nodes.len(), 10);
		for edge in &data.edges {
			assert!(data.nodes.iter().any(|n| n.id == edge.from), "{}", edge.from);
			assert!(data.nodes.iter().any(|n| n.id == edge.to), "{}", edge.to);
		}
		assert_eq!(data.strongest_edges(1)[0].value, 6.0);
	}
}
