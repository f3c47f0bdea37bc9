//! Small helpers over quick-xml events.

use quick_xml::events::BytesStart;
use slidemark_core::Error;

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Value of the unprefixed attribute `key`.
pub(crate) fn attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    find_attr(e, |name| name == key)
}

/// Value of a namespace-prefixed attribute with local name `key`,
/// e.g. `r:id` or `r:embed`.
pub(crate) fn prefixed_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    find_attr(e, |name| name.contains(&b':') && local_name(name) == key)
}

fn find_attr(e: &BytesStart, matches: impl Fn(&[u8]) -> bool) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        if !matches(attr.key.as_ref()) {
            return None;
        }
        Some(match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).to_string(),
        })
    })
}

/// Decode part bytes as UTF-8 XML text.
pub(crate) fn part_text<'a>(bytes: &'a [u8], part: &str) -> Result<&'a str, Error> {
    std::str::from_utf8(bytes).map_err(|e| malformed(part, e))
}

/// Build a `MalformedXml` error for `part`.
pub(crate) fn malformed(part: &str, reason: impl std::fmt::Display) -> Error {
    Error::MalformedXml {
        path: part.to_string(),
        reason: reason.to_string(),
    }
}
