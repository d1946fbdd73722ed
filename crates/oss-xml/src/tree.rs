//! Schema-free XML decoding into a generic tree.
//!
//! Some OSS responses have shapes the SDK does not model (error documents
//! with undocumented fields, processing results, user-extended documents).
//! [`decode_tree`] turns any well-formed document into an [`XmlNode`] tree
//! without a predeclared schema:
//!
//! - attributes are recorded under `@`-prefixed keys, so they can never
//!   collide with same-named child elements;
//! - repeated sibling elements with the same tag collapse into an ordered
//!   [`XmlNode::Sequence`] preserving document order;
//! - a self-closing element decodes to [`XmlNode::Absent`], distinguishable
//!   from `<a></a>` which decodes to an empty [`XmlNode::Scalar`];
//! - text margins are trimmed, interior whitespace (including newlines
//!   between content runs) is preserved verbatim;
//! - mixed content keeps its text under the reserved `#text` key.

use quick_xml::Reader;
use quick_xml::events::{BytesRef, Event};

use crate::error::XmlError;

/// Reserved key prefix for attributes inside an [`XmlNode::Object`].
pub const ATTR_PREFIX: &str = "@";

/// Reserved key for the text of an element that also has children.
pub const TEXT_KEY: &str = "#text";

/// A decoded XML value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum XmlNode {
    /// A self-closing element (`<a/>`): no value at all.
    #[default]
    Absent,
    /// Element text, margins trimmed.
    Scalar(String),
    /// Repeated sibling elements, in document order.
    Sequence(Vec<XmlNode>),
    /// An element with attributes and/or children.
    Object(XmlMap),
}

impl XmlNode {
    /// The scalar text, if this node is a scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// The child map, if this node is an object.
    #[must_use]
    pub fn as_map(&self) -> Option<&XmlMap> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }

    /// View this node as a sequence: a bare node yields itself as a
    /// one-element slice-equivalent.
    ///
    /// Callers that accept "one or many" use this to avoid handling the
    /// single/sequence duality by hand.
    #[must_use]
    pub fn iter_values(&self) -> Vec<&XmlNode> {
        match self {
            Self::Sequence(seq) => seq.iter().collect(),
            other => vec![other],
        }
    }
}

/// An insertion-ordered map of child name to node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlMap {
    entries: Vec<(String, XmlNode)>,
}

impl XmlMap {
    /// Look up a child by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&XmlNode> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// The scalar text of a child, if present and scalar.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(XmlNode::as_str)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &XmlNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge a finalized child under `name`: first occurrence stores the
    /// value bare, the second promotes to a two-element sequence, later
    /// occurrences append.
    fn merge_child(&mut self, name: &str, node: XmlNode) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| k == name) {
            if let XmlNode::Sequence(seq) = existing {
                seq.push(node);
            } else {
                let first = std::mem::take(existing);
                *existing = XmlNode::Sequence(vec![first, node]);
            }
        } else {
            self.entries.push((name.to_string(), node));
        }
    }
}

/// An in-progress element.
struct Frame {
    name: String,
    map: XmlMap,
    text: String,
}

/// Decode a whole document into its top-level map (root name -> value).
///
/// # Errors
///
/// Returns [`XmlError::Malformed`] with the byte offset on unbalanced tags
/// or invalid encoding; no partial tree is returned.
pub fn decode_tree(xml: &[u8]) -> Result<XmlMap, XmlError> {
    let mut reader = Reader::from_reader(xml);
    let mut doc = XmlMap::default();
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| XmlError::malformed(reader.buffer_position(), e.to_string()))?;
        match event {
            Event::Start(e) => {
                let frame = open_frame(&reader, &e)?;
                stack.push(frame);
            }
            Event::Empty(e) => {
                // Self-closing: no text is possible, finalize in place.
                let frame = open_frame(&reader, &e)?;
                let node = if frame.map.is_empty() {
                    XmlNode::Absent
                } else {
                    XmlNode::Object(frame.map)
                };
                merge_into_parent(&mut stack, &mut doc, &frame.name, node);
            }
            Event::Text(e) => {
                if let Some(frame) = stack.last_mut() {
                    let decoded = e
                        .decode()
                        .map_err(|err| XmlError::malformed(reader.buffer_position(), err.to_string()))?;
                    frame.text.push_str(&decoded);
                }
            }
            // References arrive as their own events, outside Text.
            Event::GeneralRef(e) => {
                if let Some(frame) = stack.last_mut() {
                    let resolved = resolve_reference(&e)
                        .map_err(|msg| XmlError::malformed(reader.buffer_position(), msg))?;
                    frame.text.push_str(&resolved);
                }
            }
            Event::CData(e) => {
                if let Some(frame) = stack.last_mut() {
                    let raw = std::str::from_utf8(&e).map_err(|err| {
                        XmlError::malformed(reader.buffer_position(), err.to_string())
                    })?;
                    frame.text.push_str(raw);
                }
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or_else(|| {
                    XmlError::malformed(reader.buffer_position(), "unexpected closing tag")
                })?;
                let node = finalize_frame(frame.map, &frame.text);
                merge_into_parent(&mut stack, &mut doc, &frame.name, node);
            }
            Event::Eof => {
                if !stack.is_empty() {
                    return Err(XmlError::malformed(
                        reader.buffer_position(),
                        format!("unclosed element <{}>", stack[stack.len() - 1].name),
                    ));
                }
                tracing::trace!(roots = doc.len(), "decoded XML tree");
                return Ok(doc);
            }
            // Declarations, comments, processing instructions.
            _ => {}
        }
    }
}

/// Resolve a general entity reference to its replacement text.
///
/// Handles `#`-numeric character references and the five predefined
/// entities. Custom DTD entities are rejected.
pub(crate) fn resolve_reference(e: &BytesRef<'_>) -> Result<String, String> {
    if let Some(ch) = e.resolve_char_ref().map_err(|err| err.to_string())? {
        return Ok(ch.to_string());
    }
    let name = e.decode().map_err(|err| err.to_string())?;
    quick_xml::escape::resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| format!("unresolvable entity reference &{name};"))
}

/// Capture an element name and its attributes into a fresh frame.
fn open_frame(reader: &Reader<&[u8]>, e: &quick_xml::events::BytesStart<'_>) -> Result<Frame, XmlError> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|err| XmlError::malformed(reader.buffer_position(), err.to_string()))?
        .to_string();

    let mut map = XmlMap::default();
    for attr in e.attributes() {
        let attr =
            attr.map_err(|err| XmlError::malformed(reader.buffer_position(), err.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| XmlError::malformed(reader.buffer_position(), err.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|err| XmlError::malformed(reader.buffer_position(), err.to_string()))?;
        map.merge_child(
            &format!("{ATTR_PREFIX}{key}"),
            XmlNode::Scalar(value.into_owned()),
        );
    }

    Ok(Frame {
        name,
        map,
        text: String::new(),
    })
}

/// Turn a closed frame into its node value.
///
/// No attributes and no children yields the trimmed text, which may be the
/// empty string (`<a></a>` is an empty scalar, not absent). Otherwise text,
/// if any, lands under the reserved `#text` key.
fn finalize_frame(mut map: XmlMap, text: &str) -> XmlNode {
    let trimmed = trim_margins(text);
    if map.is_empty() {
        return XmlNode::Scalar(trimmed.to_string());
    }
    if !trimmed.is_empty() {
        map.merge_child(TEXT_KEY, XmlNode::Scalar(trimmed.to_string()));
    }
    XmlNode::Object(map)
}

/// Attach a finalized node to its parent frame, or to the document map when
/// the stack is empty.
fn merge_into_parent(stack: &mut [Frame], doc: &mut XmlMap, name: &str, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.map.merge_child(name, node),
        None => doc.merge_child(name, node),
    }
}

/// Strip leading and trailing whitespace margins while keeping interior
/// whitespace, including line breaks between content runs, verbatim.
fn trim_margins(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_decode_scalar_element() {
        let doc = decode_tree(b"<Root><Name>hello</Name></Root>").expect("decode");
        let root = doc.get("Root").and_then(XmlNode::as_map).expect("root map");
        assert_eq!(root.get_str("Name"), Some("hello"));
    }

    #[test]
    fn test_should_distinguish_self_closing_from_empty_text() {
        let doc = decode_tree(b"<Root><A/><B></B></Root>").expect("decode");
        let root = doc.get("Root").and_then(XmlNode::as_map).expect("root map");
        assert_eq!(root.get("A"), Some(&XmlNode::Absent));
        assert_eq!(root.get("B"), Some(&XmlNode::Scalar(String::new())));
    }

    #[test]
    fn test_should_promote_repeated_siblings_to_sequence() {
        let doc = decode_tree(b"<R><K>1</K><K>2</K><K>3</K></R>").expect("decode");
        let root = doc.get("R").and_then(XmlNode::as_map).expect("root map");
        let XmlNode::Sequence(seq) = root.get("K").expect("K") else {
            panic!("expected sequence");
        };
        let texts: Vec<_> = seq.iter().filter_map(XmlNode::as_str).collect();
        assert_eq!(texts, ["1", "2", "3"]);
    }

    #[test]
    fn test_should_keep_single_sibling_bare() {
        let doc = decode_tree(b"<R><K>only</K></R>").expect("decode");
        let root = doc.get("R").and_then(XmlNode::as_map).expect("root map");
        assert!(matches!(root.get("K"), Some(XmlNode::Scalar(_))));
    }

    #[test]
    fn test_should_promote_two_siblings_in_document_order() {
        let doc = decode_tree(b"<R><K>first</K><K>second</K></R>").expect("decode");
        let root = doc.get("R").and_then(XmlNode::as_map).expect("root map");
        let XmlNode::Sequence(seq) = root.get("K").expect("K") else {
            panic!("expected sequence");
        };
        assert_eq!(seq.len(), 2);
        assert_eq!(seq[0].as_str(), Some("first"));
        assert_eq!(seq[1].as_str(), Some("second"));
    }

    #[test]
    fn test_should_namespace_attributes_with_prefix() {
        let doc = decode_tree(br#"<R><E type="x"><type>child</type></E></R>"#).expect("decode");
        let root = doc.get("R").and_then(XmlNode::as_map).expect("root map");
        let e = root.get("E").and_then(XmlNode::as_map).expect("E map");
        assert_eq!(e.get_str("@type"), Some("x"));
        assert_eq!(e.get_str("type"), Some("child"));
    }

    #[test]
    fn test_should_trim_margins_but_keep_interior_newlines() {
        let doc = decode_tree(b"<R><T>\n   line one\nline two   \n</T></R>").expect("decode");
        let root = doc.get("R").and_then(XmlNode::as_map).expect("root map");
        assert_eq!(root.get_str("T"), Some("line one\nline two"));
    }

    #[test]
    fn test_should_keep_mixed_content_text_under_reserved_key() {
        let doc = decode_tree(b"<R>prose<C>v</C></R>").expect("decode");
        let root = doc.get("R").and_then(XmlNode::as_map).expect("root map");
        assert_eq!(root.get_str(TEXT_KEY), Some("prose"));
        assert_eq!(root.get_str("C"), Some("v"));
    }

    #[test]
    fn test_should_unescape_entities() {
        let doc = decode_tree(b"<R><T>a &amp; b &lt; c</T></R>").expect("decode");
        let root = doc.get("R").and_then(XmlNode::as_map).expect("root map");
        assert_eq!(root.get_str("T"), Some("a & b < c"));
    }

    #[test]
    fn test_should_resolve_numeric_character_references() {
        let doc = decode_tree(b"<R><T>q&#34;q</T><U>&#x2F;tmp</U></R>").expect("decode");
        let root = doc.get("R").and_then(XmlNode::as_map).expect("root map");
        assert_eq!(root.get_str("T"), Some("q\"q"));
        assert_eq!(root.get_str("U"), Some("/tmp"));
    }

    #[test]
    fn test_should_fail_on_unknown_entity_reference() {
        let err = decode_tree(b"<R><T>&bogus;</T></R>").expect_err("must fail");
        assert!(matches!(err, XmlError::Malformed { .. }));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_should_fail_on_unclosed_element() {
        let err = decode_tree(b"<R><K>1</K>").expect_err("must fail");
        assert!(matches!(err, XmlError::Malformed { .. }));
        assert!(err.to_string().contains("R"));
    }

    #[test]
    fn test_should_fail_on_mismatched_end_tag() {
        assert!(decode_tree(b"<R><A>1</B></R>").is_err());
    }

    #[test]
    fn test_should_decode_nested_objects() {
        let doc =
            decode_tree(b"<A><B><C>deep</C></B></A>").expect("decode");
        let a = doc.get("A").and_then(XmlNode::as_map).expect("A");
        let b = a.get("B").and_then(XmlNode::as_map).expect("B");
        assert_eq!(b.get_str("C"), Some("deep"));
    }

    #[test]
    fn test_should_iterate_bare_value_as_single_entry() {
        let node = XmlNode::Scalar("x".to_string());
        assert_eq!(node.iter_values().len(), 1);
        let seq = XmlNode::Sequence(vec![XmlNode::Absent, XmlNode::Absent, XmlNode::Absent]);
        assert_eq!(seq.iter_values().len(), 3);
    }
}
