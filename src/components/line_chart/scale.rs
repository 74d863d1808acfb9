//! Maps chart rows onto a `0 0 100 height` SVG viewbox.

use std::collections::HashMap;

use super::types::{ChartPoint, ChartSeries};

pub const VIEW_WIDTH: f64 = 100.0;
pub const PADDING: f64 = 8.0;
pub const GRID_RATIOS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];
const HEADROOM: f64 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotPoint {
	pub x: f64,
	pub y: f64,
	pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridLine {
	pub y: f64,
	pub label: String,
}

#[derive(Clone, Debug)]
pub struct ChartScale {
	max_value: f64,
	height: f64,
	points: HashMap<String, Vec<PlotPoint>>,
}

impl ChartScale {
	pub fn new(data: &[ChartPoint], series: &[ChartSeries], height: f64) -> Self {
		let peak = series
			.iter()
			.flat_map(|s| data.iter().map(move |d| d.value(&s.key)))
			.fold(0.0_f64, f64::max);
		let max_value = match peak * HEADROOM {
			m if m > 0.0 => m,
			_ => 1.0,
		};

		let span = (data.len().saturating_sub(1)).max(1) as f64;
		let mut scale = Self {
			max_value,
			height,
			points: HashMap::with_capacity(series.len()),
		};
		for s in series {
			let line = data
				.iter()
				.enumerate()
				.map(|(i, d)| {
					let value = d.value(&s.key);
					PlotPoint {
						x: PADDING + (i as f64 / span) * (VIEW_WIDTH - PADDING * 2.0),
						y: scale.y(value),
						value,
					}
				})
				.collect();
			scale.points.insert(s.key.clone(), line);
		}
		scale
	}

	#[cfg(test)]
	pub fn max_value(&self) -> f64 {
		self.max_value
	}

	pub fn y(&self, value: f64) -> f64 {
		self.height - PADDING - (value / self.max_value) * (self.height - PADDING * 2.0)
	}

	pub fn points(&self, key: &str) -> &[PlotPoint] {
		self.points.get(key).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn grid(&self) -> Vec<GridLine> {
		GRID_RATIOS
			.iter()
			.map(|&ratio| GridLine {
				y: self.height - PADDING - ratio * (self.height - PADDING * 2.0),
				label: format_number((self.max_value * ratio).round()),
			})
			.collect()
	}
}

/// First, middle (only with more than two rows) and last date.
pub fn axis_labels(data: &[ChartPoint]) -> Vec<&str> {
	let mut labels = Vec::with_capacity(3);
	if let Some(first) = data.first() {
		labels.push(first.date.as_str());
	}
	if data.len() > 2 {
		labels.push(data[data.len() / 2].date.as_str());
	}
	if data.len() > 1 {
		if let Some(last) = data.last() {
			labels.push(last.date.as_str());
		}
	}
	labels
}

/// Thousands separators and at most three fraction digits: `12,345.678`.
pub fn format_number(value: f64) -> String {
	if !value.is_finite() {
		return "0".into();
	}
	let milli = (value.abs() * 1000.0).round() as u64;
	let sign = if value < 0.0 && milli > 0 { "-" } else { "" };
	let (whole, thousandths) = (milli / 1000, milli % 1000);
	let fraction = if thousandths == 0 {
		String::new()
	} else {
		format!(".{thousandths:03}").trim_end_matches('0').to_string()
	};

	let digits = whole.to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(ch);
	}
	format!("{sign}{grouped}{fraction}")
}
