use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::GraphError;

/// One dated row of an analytics series, e.g.
/// `{ "date": "2024-03-01", "posts_created": 4, "active_sessions": 11 }`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ChartPoint {
	pub date: String,
	#[serde(flatten)]
	pub values: BTreeMap<String, Value>,
}

impl ChartPoint {
	pub fn new(date: impl Into<String>) -> Self {
		Self {
			date: date.into(),
			values: BTreeMap::new(),
		}
	}

	pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
		self.values.insert(key.into(), Value::from(value));
		self
	}

	/// Numeric value under `key`; anything non-numeric counts as zero.
	pub fn value(&self, key: &str) -> f64 {
		let value = match self.values.get(key) {
			Some(Value::Number(n)) => n.as_f64(),
			Some(Value::String(s)) => s.trim().parse().ok(),
			Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
			_ => None,
		};
		value.filter(|v: &f64| v.is_finite()).unwrap_or(0.0)
	}

	pub fn from_json_list(payload: &str) -> Result<Vec<Self>, GraphError> {
		Ok(serde_json::from_str(payload)?)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartSeries {
	pub key: String,
	pub label: String,
	pub color: String,
}

impl ChartSeries {
	pub fn new(key: impl Into<String>, label: impl Into<String>, color: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			label: label.into(),
			color: color.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn values_are_coerced() {
		let points = ChartPoint::from_json_list(
			r#"[{"date": "2024-03-01", "input_tokens": 1200, "output_tokens": "340", "note": null}]"#,
		)
		.expect("list should parse");

		let point = &points[0];
		assert_eq!(point.date, "2024-03-01");
		assert_eq!(point.value("input_tokens"), 1200.0);
		assert_eq!(point.value("output_tokens"), 340.0);
		assert_eq!(point.value("note"), 0.0);
		assert_eq!(point.value("missing"), 0.0);
	}

	#[test]
	fn rows_without_date_are_rejected() {
		assert!(ChartPoint::from_json_list(r#"[{"posts": 1}]"#).is_err());
	}
}
