//! Service layer
//!
//! Turns a finished interview into files: the motion document, its markdown
//! summary and the plain-text results dump. Everything goes through
//! `InterviewIo`, so the CLI and the tests share the same code paths.

pub mod document_service;
pub mod results_service;
pub mod summary_service;

pub use document_service::{document_context, DocumentRenderer, RenderError, DEFAULT_TEMPLATE};
pub use results_service::{format_results, save_results};
pub use summary_service::{format_summary, write_summary};
