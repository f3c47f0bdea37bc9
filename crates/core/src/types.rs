//! Domain types for representing extracted slide content.

use serde::{Deserialize, Serialize};

/// A single slide after assembly. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    index: usize,
    title: Option<String>,
    bodies: Vec<String>,
    images: Vec<ImageRef>,
}

impl Slide {
    /// 1-based position in presentation order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// First title-placeholder paragraph, if the slide has one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Non-title paragraphs in document order.
    pub fn bodies(&self) -> &[String] {
        &self.bodies
    }

    /// Image references in shape-tree order, including unresolved ones.
    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    /// Image references that point at an archive path.
    pub fn resolved_images(&self) -> impl Iterator<Item = &ImageRef> {
        self.images.iter().filter(|img| img.is_resolved())
    }
}

/// Link from a picture to its media part inside the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Relationship ID from the picture's blip.
    pub rel_id: String,

    /// Archive path of the media, e.g. `ppt/media/image1.png`.
    /// Empty when the relationship ID could not be resolved.
    pub media_path: String,
}

impl ImageRef {
    /// Create a reference whose media path is not known yet.
    pub fn unresolved(rel_id: impl Into<String>) -> Self {
        Self {
            rel_id: rel_id.into(),
            media_path: String::new(),
        }
    }

    /// Whether this reference points at an archive path.
    pub fn is_resolved(&self) -> bool {
        !self.media_path.is_empty()
    }

    /// File name portion of the media path.
    pub fn file_name(&self) -> &str {
        self.media_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.media_path)
    }
}

/// Accumulates text and images for one slide in document order.
#[derive(Debug, Clone, Default)]
pub struct SlideBuilder {
    title: Option<String>,
    bodies: Vec<String>,
    images: Vec<ImageRef>,
}

impl SlideBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paragraph.
    ///
    /// The first paragraph from a title placeholder becomes the title; every
    /// other paragraph becomes a body. Blank paragraphs and bodies already
    /// present are dropped.
    pub fn add_paragraph(&mut self, text: &str, from_title_placeholder: bool) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        if from_title_placeholder && self.title.is_none() {
            self.title = Some(text.to_string());
        } else if !self.bodies.iter().any(|b| b == text) {
            self.bodies.push(text.to_string());
        }
    }

    /// Add an image reference.
    pub fn add_image(&mut self, image: ImageRef) {
        self.images.push(image);
    }

    /// Fill in media paths by looking up each relationship ID.
    ///
    /// IDs the lookup cannot answer keep an empty path.
    pub fn resolve_images<F>(&mut self, mut lookup: F)
    where
        F: FnMut(&str) -> Option<String>,
    {
        for image in &mut self.images {
            image.media_path = lookup(&image.rel_id).unwrap_or_default();
        }
    }

    /// Finish the slide at the given 1-based position.
    pub fn build(self, index: usize) -> Slide {
        Slide {
            index,
            title: self.title,
            bodies: self.bodies,
            images: self.images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_never_overwritten() {
        let mut builder = SlideBuilder::new();
        builder.add_paragraph("T", true);
        builder.add_paragraph("X", true);
        builder.add_paragraph("Second title", true);
        let slide = builder.build(1);

        assert_eq!(slide.title(), Some("T"));
        assert_eq!(slide.bodies(), &["X".to_string(), "Second title".to_string()]);
    }

    #[test]
    fn test_body_before_title() {
        let mut builder = SlideBuilder::new();
        builder.add_paragraph("Intro", false);
        builder.add_paragraph("Heading", true);
        let slide = builder.build(3);

        assert_eq!(slide.index(), 3);
        assert_eq!(slide.title(), Some("Heading"));
        assert_eq!(slide.bodies(), &["Intro".to_string()]);
    }

    #[test]
    fn test_blank_and_duplicate_bodies_dropped() {
        let mut builder = SlideBuilder::new();
        builder.add_paragraph("   ", false);
        builder.add_paragraph("", true);
        builder.add_paragraph(" Point ", false);
        builder.add_paragraph("Point", false);
        let slide = builder.build(1);

        assert_eq!(slide.title(), None);
        assert_eq!(slide.bodies(), &["Point".to_string()]);
    }

    #[test]
    fn test_resolve_images_keeps_unresolved() {
        let mut builder = SlideBuilder::new();
        builder.add_image(ImageRef::unresolved("rId2"));
        builder.add_image(ImageRef::unresolved("rId9"));
        builder.resolve_images(|id| (id == "rId2").then(|| "ppt/media/image1.png".to_string()));
        let slide = builder.build(1);

        assert_eq!(slide.images().len(), 2);
        assert_eq!(slide.images()[0].media_path, "ppt/media/image1.png");
        assert!(!slide.images()[1].is_resolved());
        assert_eq!(slide.resolved_images().count(), 1);
    }

    #[test]
    fn test_image_file_name() {
        let image = ImageRef {
            rel_id: "rId1".to_string(),
            media_path: "ppt/media/image3.jpeg".to_string(),
        };
        assert_eq!(image.file_name(), "image3.jpeg");
    }

    #[test]
    fn test_slide_serializes() {
        let mut builder = SlideBuilder::new();
        builder.add_paragraph("Title", true);
        let json = serde_json::to_string(&builder.build(1)).unwrap();
        assert!(json.contains("\"title\":\"Title\""));
        assert!(json.contains("\"index\":1"));
    }
}
