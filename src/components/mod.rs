pub mod line_chart;
pub mod topic_graph;
