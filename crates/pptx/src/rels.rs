//! Relationship parts (`*.rels`) and part-path resolution.
//!
//! A relationship part maps short IDs (`rId3`) to target paths relative to
//! the directory of the part that owns it. IDs are only unique within one
//! relationship part, so maps are never merged.

use crate::archive::Archive;
use crate::xml::{attr, local_name, malformed, part_text};
use quick_xml::events::Event;
use quick_xml::Reader;
use slidemark_core::{Error, Result};
use std::collections::HashMap;
use std::io::{Read, Seek};

/// One `Relationship` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Target as written, relative to the owning part's directory or
    /// package-absolute when it starts with `/`.
    pub target: String,

    /// Relationship type URI.
    pub rel_type: String,

    /// Whether the target lives outside the package (`TargetMode="External"`).
    pub external: bool,
}

/// Relationship ID to relationship, for a single relationship part.
#[derive(Debug, Clone, Default)]
pub struct RelationshipMap {
    rels: HashMap<String, Relationship>,
}

impl RelationshipMap {
    /// Parse relationship XML. `part` names the source in errors.
    pub fn parse(xml: &[u8], part: &str) -> Result<Self> {
        let text = part_text(xml, part)?;
        let mut reader = Reader::from_str(text);
        reader.trim_text(true);

        let mut rels = HashMap::new();
        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    let Some(id) = attr(e, b"Id") else {
                        continue;
                    };
                    let rel = Relationship {
                        target: attr(e, b"Target").unwrap_or_default(),
                        rel_type: attr(e, b"Type").unwrap_or_default(),
                        external: attr(e, b"TargetMode").as_deref() == Some("External"),
                    };
                    rels.insert(id, rel);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(malformed(part, e)),
                _ => {}
            }
        }

        Ok(Self { rels })
    }

    /// Relationship for `id`.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.rels.get(id)
    }

    /// Archive path of the internal target for `id`, resolved against `base`.
    ///
    /// Returns `None` for unknown IDs and external targets.
    pub fn resolve(&self, id: &str, base: &str) -> Option<String> {
        self.get(id)
            .filter(|rel| !rel.external && !rel.target.is_empty())
            .map(|rel| resolve(base, &rel.target))
    }

    /// First relationship whose type URI ends with `/<kind>`.
    pub fn find_by_type(&self, kind: &str) -> Option<&Relationship> {
        let suffix = format!("/{}", kind);
        let mut matches: Vec<(&String, &Relationship)> = self
            .rels
            .iter()
            .filter(|(_, rel)| rel.rel_type.ends_with(&suffix))
            .collect();
        matches.sort_by(|a, b| a.0.cmp(b.0));
        matches.into_iter().next().map(|(_, rel)| rel)
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Whether the part declared no relationships.
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}

/// Read a required relationship part.
pub fn read_relationships<R: Read + Seek>(
    archive: &mut Archive<R>,
    rels_path: &str,
) -> Result<RelationshipMap> {
    let content = archive.read_entry(rels_path)?;
    RelationshipMap::parse(&content, rels_path)
}

/// Read a relationship part that may be absent; absence yields an empty map.
pub fn read_optional_relationships<R: Read + Seek>(
    archive: &mut Archive<R>,
    rels_path: &str,
) -> Result<RelationshipMap> {
    match archive.read_entry(rels_path) {
        Ok(content) => RelationshipMap::parse(&content, rels_path),
        Err(Error::PartMissing { .. }) => Ok(RelationshipMap::default()),
        Err(e) => Err(e),
    }
}

/// Resolve a relationship target against a base directory.
///
/// Targets starting with `/` are package-absolute. Anything else is joined
/// to `base` and normalized: `..` ascends one directory, `.` and empty
/// segments are dropped.
pub fn resolve(base: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return normalize(absolute);
    }
    normalize(&format!("{}/{}", base, target))
}

fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Directory portion of a part path: `ppt/slides/slide1.xml` -> `ppt/slides`.
pub fn part_dir(part: &str) -> &str {
    part.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Relationship part for a part: `ppt/slides/slide1.xml` ->
/// `ppt/slides/_rels/slide1.xml.rels`.
pub fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, name)) => format!("{}/_rels/{}.rels", dir, name),
        None => format!("_rels/{}.rels", part),
    }
}
