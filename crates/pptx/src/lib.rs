//! PPTX (Office Open XML) package reader.
//!
//! Opens the ZIP container, resolves slide order through the presentation's
//! relationships, walks each slide's shape tree, and exports referenced media.

pub mod archive;
pub mod convert;
pub mod export;
pub mod order;
pub mod presentation;
pub mod rels;
pub mod shapes;
pub mod slide;

mod xml;

#[cfg(test)]
mod test_support;

pub use archive::Archive;
pub use convert::{convert, default_image_dir, markdown_path, ConvertOptions, Conversion};
pub use export::{export_images, ExportSummary};
pub use presentation::Presentation;
pub use rels::{resolve, RelationshipMap};
