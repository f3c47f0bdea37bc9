//! Core slide types, export filename deduplication, and Markdown rendering
//! for PPTX to Markdown conversion.

pub mod error;
pub mod markdown;
pub mod naming;
pub mod types;

pub use error::{Error, Result};
pub use markdown::MarkdownRenderer;
pub use naming::ExportNames;
pub use types::{ImageRef, Slide, SlideBuilder};
