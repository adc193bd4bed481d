pub mod questions;

pub use questions::{default_definition, load_definition, parse_definition, DEFAULT_QUESTIONS};
