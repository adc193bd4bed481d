pub mod answer;
pub mod graph;

pub use answer::validate_answer;
pub use graph::{validate_definition, GraphReport};
