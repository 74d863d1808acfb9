mod component;
pub mod scale;
mod types;

pub use component::LineChart;
pub use types::{ChartPoint, ChartSeries};
