//! Event-driven construction of the element tree

use std::borrow::Cow;

use log::{debug, trace};
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};

use super::element::{Attribute, Element, QName};
use crate::error::{Error, Result};

/// Default buffer capacity for XML parsing (4KB)
const XML_BUFFER_CAPACITY: usize = 4096;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Decode raw file content into text
///
/// Accepts UTF-8 with or without a byte order mark, and UTF-16 (either
/// endianness) introduced by a byte order mark.
pub fn decode_input(bytes: &[u8]) -> Result<Cow<'_, str>> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return utf8(rest).map(Cow::Borrowed);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        return utf16(rest, u16::from_le_bytes).map(Cow::Owned);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        return utf16(rest, u16::from_be_bytes).map(Cow::Owned);
    }
    utf8(bytes).map(Cow::Borrowed)
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| {
        Error::malformed_at(e.valid_up_to() as u64, "Invalid UTF-8 encoding")
    })
}

fn utf16(bytes: &[u8], convert: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Error::MalformedXml(
            "Truncated UTF-16 input: odd number of bytes".to_string(),
        ));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| convert([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units)
        .map_err(|e| Error::MalformedXml(format!("Invalid UTF-16 encoding: {}", e)))
}

/// Parse a complete document into its root element
///
/// The whole input must be a single well-formed document. On any error no
/// tree is returned.
pub fn parse_document(bytes: &[u8]) -> Result<Element> {
    let text = decode_input(bytes)?;
    let mut reader = NsReader::from_reader(text.as_bytes());
    reader.config_mut().trim_text(false);

    let mut buf = Vec::with_capacity(XML_BUFFER_CAPACITY);
    // Open elements paired with their accumulated raw character data
    let mut stack: Vec<(Element, String)> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let (ns, event) = match reader.read_resolved_event_into(&mut buf) {
            Ok(resolved) => resolved,
            Err(e) => return Err(Error::malformed_at(position, e)),
        };
        let namespace = namespace_uri(ns).map_err(|e| Error::malformed_at(position, e))?;

        match event {
            Event::Start(ref e) => {
                if root.is_some() && stack.is_empty() {
                    return Err(Error::malformed_at(position, "Multiple root elements"));
                }
                let element = open_element(&reader, e, namespace, position)?;
                trace!(tag:% = element.tag; "Opened element");
                stack.push((element, String::new()));
            }
            Event::Empty(ref e) => {
                if root.is_some() && stack.is_empty() {
                    return Err(Error::malformed_at(position, "Multiple root elements"));
                }
                let element = open_element(&reader, e, namespace, position)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                let Some((mut element, text)) = stack.pop() else {
                    return Err(Error::malformed_at(position, "Unexpected closing tag"));
                };
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    element.text = Some(trimmed.to_string());
                }
                attach(&mut stack, &mut root, element);
            }
            Event::Text(ref t) => {
                let raw = std::str::from_utf8(t.as_ref())
                    .map_err(|e| Error::malformed_at(position, e))?;
                let value = quick_xml::escape::unescape(raw)?;
                push_text(&mut stack, &value, position)?;
            }
            Event::GeneralRef(ref r) => {
                let name = std::str::from_utf8(r.as_ref())
                    .map_err(|e| Error::malformed_at(position, e))?;
                let reference = format!("&{};", name);
                let value = quick_xml::escape::unescape(&reference)?;
                push_text(&mut stack, &value, position)?;
            }
            Event::CData(ref c) => {
                let value = std::str::from_utf8(c.as_ref())
                    .map_err(|e| Error::malformed_at(position, e))?;
                push_text(&mut stack, value, position)?;
            }
            Event::DocType(_) => {
                // External entities are never expanded
                return Err(Error::malformed_at(
                    position,
                    "DTD declarations are not allowed in ARXML input",
                ));
            }
            Event::Eof => break,
            // Declaration, comments and processing instructions carry no model data
            _ => {}
        }
        buf.clear();
    }

    if let Some((open, _)) = stack.last() {
        return Err(Error::malformed_at(
            reader.buffer_position() as u64,
            format!("Unexpected end of input inside <{}>", open.tag.local),
        ));
    }

    let root =
        root.ok_or_else(|| Error::MalformedXml("Document has no root element".to_string()))?;
    debug!(root:% = root.tag; "Parsed XML document");
    Ok(root)
}

fn namespace_uri(ns: ResolveResult<'_>) -> std::result::Result<Option<String>, String> {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => std::str::from_utf8(uri)
            .map(|s| Some(s.to_string()))
            .map_err(|e| e.to_string()),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(format!(
            "Undeclared namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        )),
    }
}

fn open_element<R>(
    reader: &NsReader<R>,
    start: &BytesStart<'_>,
    namespace: Option<String>,
    position: u64,
) -> Result<Element> {
    let local = std::str::from_utf8(start.local_name().as_ref())
        .map_err(|e| Error::malformed_at(position, e))?
        .to_string();
    let mut element = Element::new(QName { namespace, local });

    for attr in start.attributes() {
        let attr = attr?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let (ns, local) = reader.resolver().resolve_attribute(attr.key);
        let namespace = namespace_uri(ns).map_err(|e| Error::malformed_at(position, e))?;
        let local = std::str::from_utf8(local.as_ref())
            .map_err(|e| Error::malformed_at(position, e))?
            .to_string();
        let raw = std::str::from_utf8(&attr.value).map_err(|e| Error::malformed_at(position, e))?;
        let value = quick_xml::escape::unescape(raw)?.into_owned();
        element.attributes.push(Attribute {
            name: QName { namespace, local },
            value,
        });
    }

    Ok(element)
}

fn attach(stack: &mut [(Element, String)], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some((parent, _)) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn push_text(stack: &mut [(Element, String)], value: &str, position: u64) -> Result<()> {
    match stack.last_mut() {
        Some((_, text)) => {
            text.push_str(value);
            Ok(())
        }
        None if value.trim().is_empty() => Ok(()),
        None => Err(Error::malformed_at(
            position,
            "Character data outside the root element",
        )),
    }
}
