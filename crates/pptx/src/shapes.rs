//! Slide shape trees.
//!
//! A slide's `p:spTree` holds shapes (`p:sp`), pictures (`p:pic`) and groups
//! (`p:grpSp`) that nest more of the same. The XML is first read into a small
//! tagged tree, then walked to pull out title text, body paragraphs and
//! picture relationship IDs.

use crate::xml::{attr, local_name, malformed, part_text, prefixed_attr};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use slidemark_core::{ImageRef, Result, SlideBuilder};

/// How many group levels the walker descends into. Groups nested inside a
/// group are not visited.
pub const MAX_GROUP_DEPTH: usize = 1;

/// A node of a slide's shape tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeNode {
    Shape(Shape),
    Picture(Picture),
    Group(Vec<ShapeNode>),
}

/// A `p:sp` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shape {
    /// `p:ph@type`; empty when the placeholder has no explicit type.
    pub placeholder: Option<String>,

    /// Paragraph texts when the shape has a `p:txBody`.
    pub paragraphs: Option<Vec<String>>,
}

impl Shape {
    /// Title and centered-title placeholders.
    pub fn is_title(&self) -> bool {
        matches!(self.placeholder.as_deref(), Some("title") | Some("ctrTitle"))
    }
}

/// A `p:pic` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Picture {
    /// `a:blip@r:embed` from the picture's fill.
    pub embed: Option<String>,
}

/// Parse the shape tree of a slide part.
pub fn parse_shape_tree(xml: &[u8], part: &str) -> Result<Vec<ShapeNode>> {
    let text = part_text(xml, part)?;
    let mut reader = Reader::from_str(text);
    let mut builder = TreeBuilder::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => builder.open(e, false),
            Ok(Event::Empty(ref e)) => builder.open(e, true),
            Ok(Event::End(_)) => builder.close(),
            Ok(Event::Text(ref e)) => {
                if builder.in_text {
                    let text = e.unescape().map_err(|err| malformed(part, err))?;
                    builder.push_text(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if builder.in_text {
                    builder.push_text(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(part, e)),
            _ => {}
        }
    }

    if !builder.path.is_empty() {
        return Err(malformed(part, "unexpected end of document"));
    }

    Ok(builder.root.unwrap_or_default())
}

/// Extract title, bodies and picture references from a shape tree.
///
/// Each level is visited in three passes: shapes, then pictures, then
/// groups. Picture references carry only their relationship ID.
pub fn walk(tree: &[ShapeNode]) -> SlideBuilder {
    let mut slide = SlideBuilder::new();
    visit_level(tree, &mut slide, 0);
    slide
}

#[derive(Debug, Clone, Copy)]
enum Pass {
    Text,
    Pictures,
    Groups,
}

fn visit_level(nodes: &[ShapeNode], slide: &mut SlideBuilder, depth: usize) {
    for pass in [Pass::Text, Pass::Pictures, Pass::Groups] {
        for node in nodes {
            match (pass, node) {
                (Pass::Text, ShapeNode::Shape(shape)) => {
                    let is_title = shape.is_title();
                    for para in shape.paragraphs.iter().flatten() {
                        slide.add_paragraph(para, is_title);
                    }
                }
                (Pass::Pictures, ShapeNode::Picture(pic)) => {
                    if let Some(embed) = pic.embed.as_deref().filter(|id| !id.is_empty()) {
                        slide.add_image(ImageRef::unresolved(embed));
                    }
                }
                (Pass::Groups, ShapeNode::Group(children)) if depth < MAX_GROUP_DEPTH => {
                    visit_level(children, slide, depth + 1);
                }
                (Pass::Groups, ShapeNode::Group(children)) => {
                    log::debug!(
                        "Skipping group nested {} levels deep ({} children)",
                        depth + 1,
                        children.len()
                    );
                }
                (Pass::Text, _) | (Pass::Pictures, _) | (Pass::Groups, _) => {}
            }
        }
    }
}

/// An open `p:spTree` or `p:grpSp`.
#[derive(Debug)]
struct Frame {
    /// Element path length at which the container was opened.
    depth: usize,
    nodes: Vec<ShapeNode>,
}

#[derive(Debug)]
enum Leaf {
    Shape(Shape),
    Picture(Picture),
}

impl From<Leaf> for ShapeNode {
    fn from(leaf: Leaf) -> Self {
        match leaf {
            Leaf::Shape(shape) => ShapeNode::Shape(shape),
            Leaf::Picture(pic) => ShapeNode::Picture(pic),
        }
    }
}

/// Event-driven builder for the shape tree.
#[derive(Debug, Default)]
struct TreeBuilder {
    /// Local names of the currently open elements.
    path: Vec<Vec<u8>>,
    frames: Vec<Frame>,
    /// Shape or picture being read, with the path length it was opened at.
    leaf: Option<(usize, Leaf)>,
    in_text: bool,
    root: Option<Vec<ShapeNode>>,
}

impl TreeBuilder {
    fn open(&mut self, e: &BytesStart, empty: bool) {
        let name = local_name(e.name().as_ref()).to_vec();
        let depth = self.path.len() + 1;
        let direct_child = self.leaf.is_none()
            && self.frames.last().map_or(false, |f| f.depth == self.path.len());

        match name.as_slice() {
            b"spTree" if self.frames.is_empty() && self.root.is_none() => {
                if empty {
                    self.root = Some(Vec::new());
                } else {
                    self.frames.push(Frame {
                        depth,
                        nodes: Vec::new(),
                    });
                }
            }
            b"grpSp" if direct_child => {
                if empty {
                    self.push_node(ShapeNode::Group(Vec::new()));
                } else {
                    self.frames.push(Frame {
                        depth,
                        nodes: Vec::new(),
                    });
                }
            }
            b"sp" | b"pic" if direct_child => {
                let leaf = if name.as_slice() == b"sp" {
                    Leaf::Shape(Shape::default())
                } else {
                    Leaf::Picture(Picture::default())
                };
                if empty {
                    self.push_node(leaf.into());
                } else {
                    self.leaf = Some((depth, leaf));
                }
            }
            b"ph" => {
                if let Some((_, Leaf::Shape(shape))) = &mut self.leaf {
                    if shape.placeholder.is_none() {
                        shape.placeholder = Some(attr(e, b"type").unwrap_or_default());
                    }
                }
            }
            b"txBody" => {
                if let Some((_, Leaf::Shape(shape))) = &mut self.leaf {
                    shape.paragraphs.get_or_insert_with(Vec::new);
                }
            }
            b"p" if self.parent_is(b"txBody") => {
                if let Some(paragraphs) = self.paragraphs_mut() {
                    paragraphs.push(String::new());
                }
            }
            b"t" if !empty && self.parent_is(b"r") => {
                let has_paragraph = self.paragraphs_mut().map_or(false, |p| !p.is_empty());
                self.in_text = has_paragraph;
            }
            b"blip" => {
                if let Some((_, Leaf::Picture(pic))) = &mut self.leaf {
                    if pic.embed.is_none() {
                        pic.embed = prefixed_attr(e, b"embed");
                    }
                }
            }
            _ => {}
        }

        if !empty {
            self.path.push(name);
        }
    }

    fn close(&mut self) {
        let depth = self.path.len();

        if self.leaf.as_ref().map_or(false, |(d, _)| *d == depth) {
            if let Some((_, leaf)) = self.leaf.take() {
                self.push_node(leaf.into());
            }
        } else if self.frames.last().map_or(false, |f| f.depth == depth) {
            if let Some(frame) = self.frames.pop() {
                if self.frames.is_empty() {
                    self.root = Some(frame.nodes);
                } else {
                    self.push_node(ShapeNode::Group(frame.nodes));
                }
            }
        }

        if self.path.last().map(Vec::as_slice) == Some(b"t".as_slice()) {
            self.in_text = false;
        }
        self.path.pop();
    }

    fn push_text(&mut self, text: &str) {
        if let Some(para) = self.paragraphs_mut().and_then(|p| p.last_mut()) {
            para.push_str(text);
        }
    }

    fn push_node(&mut self, node: ShapeNode) {
        if let Some(frame) = self.frames.last_mut() {
            frame.nodes.push(node);
        }
    }

    fn parent_is(&self, name: &[u8]) -> bool {
        self.path.last().map(Vec::as_slice) == Some(name)
    }

    fn paragraphs_mut(&mut self) -> Option<&mut Vec<String>> {
        match &mut self.leaf {
            Some((_, Leaf::Shape(shape))) => shape.paragraphs.as_mut(),
            _ => None,
        }
    }
}
