use leptos::prelude::*;
use log::warn;

use crate::components::line_chart::{ChartPoint, ChartSeries, LineChart};

// Snapshot of the token usage endpoint; counts arrive as numbers or strings.
const TOKEN_USAGE_PAYLOAD: &str = r#"[
	{"date": "2024-03-01", "input_tokens": 18200, "output_tokens": 4100},
	{"date": "2024-03-02", "input_tokens": 21450, "output_tokens": "5230"},
	{"date": "2024-03-03", "input_tokens": 16780, "output_tokens": 3900},
	{"date": "2024-03-04", "input_tokens": 25010, "output_tokens": 6120},
	{"date": "2024-03-05", "input_tokens": "23300", "output_tokens": 5480},
	{"date": "2024-03-06", "input_tokens": 19870, "output_tokens": 4410},
	{"date": "2024-03-07", "input_tokens": 27640, "output_tokens": 7010}
]"#;

fn token_usage() -> Vec<ChartPoint> {
	ChartPoint::from_json_list(TOKEN_USAGE_PAYLOAD).unwrap_or_else(|err| {
		warn!("token usage payload rejected: {err}");
		Vec::new()
	})
}

/// Deterministic month of daily activity for the dashboard preview.
fn sample_activity(days: usize) -> Vec<ChartPoint> {
	(0..days)
		.map(|day| {
			let wave = ((day * 7919) % 13) as f64;
			ChartPoint::new(format!("mar {}", day + 1))
				.with("active_sessions", 20.0 + wave * 3.0 + day as f64)
				.with("posts_created", (wave / 2.0).floor() + (day / 5) as f64)
		})
		.collect()
}

/// Admin analytics: daily sessions and posts.
#[component]
pub fn Activity() -> impl IntoView {
	let (range, set_range) = signal(30_usize);
	let activity = Signal::derive(move || sample_activity(range.get()));
	let tokens = Signal::derive(token_usage);

	view! {
		<div class="container">
			<div class="card">
				<h2>"Daily Activity"</h2>
				<div class="range-picker">
					<button on:click=move |_| set_range.set(7)>"last 7 days"</button>
					<button on:click=move |_| set_range.set(30)>"last 30 days"</button>
				</div>
				<LineChart
					data=activity
					series=vec![
						ChartSeries::new("active_sessions", "Sessions", "#f59e0b"),
						ChartSeries::new("posts_created", "Posts", "#ec4899"),
					]
					height=250.0
				/>
			</div>
			<div class="card">
				<h2>"API Token Usage"</h2>
				<LineChart
					data=tokens
					series=vec![
						ChartSeries::new("input_tokens", "Input", "#3b82f6"),
						ChartSeries::new("output_tokens", "Output", "#10b981"),
					]
					height=250.0
				/>
			</div>
		</div>
	}
}
