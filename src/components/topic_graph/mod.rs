mod component;
mod instance;
mod interaction;
mod layout;
mod render;
mod scheduler;
mod types;

pub use component::TopicGraph;
pub use types::{TopicEdge, TopicGraphData, TopicNode};
