//! Markdown output for extracted slides.
//!
//! Each slide becomes a `##` heading followed by its body paragraphs and
//! image links, with a `---` rule between slides.

use crate::naming::ExportNames;
use crate::types::Slide;

/// Renders slides into a single Markdown document.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    /// Directory name used in image links, relative to the document.
    image_dir: String,
}

impl MarkdownRenderer {
    /// Create a renderer that links images under `image_dir`.
    pub fn new(image_dir: impl Into<String>) -> Self {
        Self {
            image_dir: image_dir.into(),
        }
    }

    /// Render slides using the given export names for image links.
    ///
    /// # Example output
    /// ```text
    /// ## Welcome
    ///
    /// A developer toolkit
    ///
    /// ---
    ///
    /// ## Slide 2
    ///
    /// ![image1.png](./deck_images/image1.png)
    /// ```
    pub fn render(&self, slides: &[Slide], names: &ExportNames) -> String {
        let mut out = String::new();

        for (i, slide) in slides.iter().enumerate() {
            if i > 0 {
                out.push_str("---\n\n");
            }

            match slide.title() {
                Some(title) => out.push_str(&format!("## {}\n\n", title)),
                None => out.push_str(&format!("## Slide {}\n\n", slide.index())),
            }

            for body in slide.bodies() {
                out.push_str(body);
                out.push_str("\n\n");
            }

            for image in slide.resolved_images() {
                let file_name = names
                    .get(&image.media_path)
                    .unwrap_or_else(|| image.file_name());
                out.push_str(&format!(
                    "![{}](./{})\n\n",
                    file_name,
                    self.image_link(file_name)
                ));
            }
        }

        let mut doc = out.trim_end_matches('\n').to_string();
        doc.push('\n');
        doc
    }

    /// Link target for an exported image, always joined with `/`.
    fn image_link(&self, file_name: &str) -> String {
        let dir = self.image_dir.trim_end_matches(['/', '\\']);
        if dir.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", dir, file_name)
        }
    }
}
