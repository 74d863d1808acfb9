use std::sync::Arc;

use leptos::prelude::*;

use super::scale::{ChartScale, PADDING, PlotPoint, VIEW_WIDTH, axis_labels, format_number};
use super::types::{ChartPoint, ChartSeries};

/// Multi-series SVG line chart with a hover tooltip.
#[component]
pub fn LineChart(
	#[prop(into)] data: Signal<Vec<ChartPoint>>,
	series: Vec<ChartSeries>,
	#[prop(default = 300.0)] height: f64,
) -> impl IntoView {
	let series = Arc::new(series);
	let hovered = RwSignal::new(None::<usize>);

	// Row indices from the previous data set mean nothing for the next one.
	Effect::new(move |_| {
		data.track();
		hovered.set(None);
	});

	view! {
		<div class="line-chart" style="position: relative;">
			{move || {
				let rows = data.get();
				if rows.is_empty() {
					view! {
						<div
							class="line-chart-empty"
							style=format!(
								"height: {height}px; display: flex; align-items: center; justify-content: center; font-size: 14px;",
							)
						>
							"no data available"
						</div>
					}
						.into_any()
				} else {
					let scale = ChartScale::new(&rows, &series, height);
					chart(rows, scale, series.clone(), height, hovered).into_any()
				}
			}}
		</div>
	}
}

fn chart(
	rows: Vec<ChartPoint>,
	scale: ChartScale,
	series: Arc<Vec<ChartSeries>>,
	height: f64,
	hovered: RwSignal<Option<usize>>,
) -> impl IntoView {
	// Hover targets and the guide line follow the first series.
	let anchor: Vec<PlotPoint> = series
		.first()
		.map(|s| scale.points(&s.key).to_vec())
		.unwrap_or_default();
	let bottom = height - PADDING;

	let grid = scale
		.grid()
		.into_iter()
		.map(|line| {
			let y = line.y.to_string();
			view! {
				<g>
					<line
						x1=PADDING.to_string()
						y1=y.clone()
						x2=(VIEW_WIDTH - PADDING).to_string()
						y2=y
						stroke="var(--border)"
						stroke-width="0.3"
						stroke-dasharray="1,1"
					/>
					<text
						x="6"
						y=(line.y + 1.5).to_string()
						font-size="4"
						fill="var(--text-tertiary)"
						text-anchor="end"
					>
						{line.label}
					</text>
				</g>
			}
		})
		.collect_view();

	let polylines = series
		.iter()
		.map(|s| {
			let points = scale
				.points(&s.key)
				.iter()
				.map(|p| format!("{},{}", p.x, p.y))
				.collect::<Vec<_>>()
				.join(" ");
			view! {
				<polyline
					points=points
					fill="none"
					stroke=s.color.clone()
					stroke-width="0.6"
					stroke-linejoin="round"
					stroke-linecap="round"
				/>
			}
		})
		.collect_view();

	let guide_anchor = anchor.clone();
	let guide = move || {
		hovered.get().and_then(|i| guide_anchor.get(i).copied()).map(|p| {
			let x = p.x.to_string();
			view! {
				<line
					x1=x.clone()
					y1=PADDING.to_string()
					x2=x
					y2=bottom.to_string()
					stroke="var(--text-tertiary)"
					stroke-width="0.3"
					stroke-dasharray="2,2"
				/>
			}
		})
	};

	let dots = series
		.iter()
		.flat_map(|s| {
			let color = s.color.clone();
			scale
				.points(&s.key)
				.iter()
				.enumerate()
				.map(move |(i, p)| {
					view! {
						<circle
							cx=p.x.to_string()
							cy=p.y.to_string()
							r=move || if hovered.get() == Some(i) { "1.5" } else { "1" }
							fill=color.clone()
							stroke="var(--bg-primary)"
							stroke-width="0.5"
							style="cursor: pointer; transition: r 0.2s;"
							on:mouseenter=move |_| hovered.set(Some(i))
						/>
					}
				})
				.collect::<Vec<_>>()
		})
		.collect_view();

	let targets = anchor
		.iter()
		.enumerate()
		.map(|(i, p)| {
			view! {
				<circle
					cx=p.x.to_string()
					cy=p.y.to_string()
					r="3"
					fill="transparent"
					style="cursor: pointer;"
					on:mouseenter=move |_| hovered.set(Some(i))
				/>
			}
		})
		.collect_view();

	let dates: Vec<String> = rows.iter().map(|r| r.date.clone()).collect();
	let (tip_series, tip_scale) = (series.clone(), scale.clone());
	let tooltip = move || {
		let i = hovered.get()?;
		let p = anchor.get(i)?;
		let values = tip_series
			.iter()
			.map(|s| {
				let value = tip_scale.points(&s.key).get(i).map(|p| p.value).unwrap_or(0.0);
				view! {
					<div style="display: flex; align-items: center; gap: 6px; margin-top: 2px;">
						<div style=format!(
							"width: 8px; height: 8px; border-radius: 50%; background: {};",
							s.color,
						) />
						<span class="text-secondary" style="font-size: 11px;">
							{format!("{}:", s.label)}
						</span>
						<span style="font-weight: 600; font-size: 12px;">{format_number(value)}</span>
					</div>
				}
			})
			.collect_view();
		Some(view! {
			<div
				class="line-chart-tooltip"
				style=format!(
					"position: absolute; left: {}%; top: 0; transform: translateX(-50%); pointer-events: none; z-index: 10; white-space: nowrap;",
					p.x,
				)
			>
				<div style="font-weight: 600; margin-bottom: 4px; font-size: 12px;">
					{dates.get(i).cloned().unwrap_or_default()}
				</div>
				{values}
			</div>
		})
	};

	let legend = series
		.iter()
		.map(|s| {
			view! {
				<div style="display: flex; align-items: center; gap: 6px; font-size: 13px;">
					<div style=format!(
						"width: 16px; height: 3px; border-radius: 2px; background: {};",
						s.color,
					) />
					<span class="text-secondary">{s.label.clone()}</span>
				</div>
			}
		})
		.collect_view();

	let axis = axis_labels(&rows)
		.into_iter()
		.map(|date| view! { <span>{date.to_string()}</span> })
		.collect_view();

	view! {
		<svg
			viewBox=format!("0 0 {VIEW_WIDTH} {height}")
			style=format!("width: 100%; height: {height}px; overflow: visible;")
			on:mouseleave=move |_| hovered.set(None)
		>
			{grid}
			{polylines}
			{guide}
			{dots}
			{targets}
		</svg>
		{tooltip}
		<div
			class="line-chart-legend"
			style="display: flex; gap: 16px; margin-top: 16px; flex-wrap: wrap; justify-content: center;"
		>
			{legend}
		</div>
		<div
			class="line-chart-axis"
			style="display: flex; justify-content: space-between; margin-top: 12px; font-size: 12px; padding-left: 8%; padding-right: 8%;"
		>
			{axis}
		</div>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
	use leptos::task::tick;
	use wasm_bindgen::JsCast;
	use wasm_bindgen_test::*;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	fn rows(offset: f64) -> Vec<ChartPoint> {
		(0..5)
			.map(|d| ChartPoint::new(format!("d{d}")).with("posts", offset + d as f64))
			.collect()
	}

	fn find(host: &web_sys::HtmlElement, selector: &str) -> Option<web_sys::Element> {
		host.query_selector(selector).ok().flatten()
	}

	#[wasm_bindgen_test]
	async fn new_rows_clear_the_hovered_point() {
		let document = web_sys::window()
			.and_then(|w| w.document())
			.expect("document available");
		let host: web_sys::HtmlElement = document
			.create_element("div")
			.expect("div created")
			.unchecked_into();
		document
			.body()
			.expect("body available")
			.append_child(&host)
			.expect("host attached");

		let (data, set_data) = signal(rows(0.0));
		leptos::mount::mount_to(host.clone(), move || {
			view! { <LineChart data=data series=vec![ChartSeries::new("posts", "Posts", "#000")] /> }
		})
		.forget();

		let target = find(&host, "circle[fill='transparent']").expect("hover target rendered");
		let enter = web_sys::Event::new("mouseenter").expect("event created");
		target.dispatch_event(&enter).expect("event dispatched");
		tick().await;
		assert!(find(&host, ".line-chart-tooltip").is_some());

		set_data.set(rows(10.0));
		tick().await;
		assert!(find(&host, ".line-chart-tooltip").is_none());
	}
}
