use super::{Element, ElementTree};
use crate::error::XmlError;
use ahash::AHashMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::str;

/// Parses UTF-8 XML text into an `ElementTree`.
///
/// Namespace prefixes are stripped from tags and attribute names, `xmlns`
/// declarations are dropped and whitespace-only text is ignored.
pub fn parse_xml(xml: &str) -> Result<ElementTree, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| XmlError::Syntax {
                position: reader.error_position() as u64,
                message: e.to_string(),
            })?;

        match event {
            Event::Start(e) => {
                stack.push(element_from_start(&e)?);
            }
            Event::Empty(e) => {
                let element = element_from_start(&e)?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::End(e) => {
                let closing = local_name(e.local_name().as_ref())?;
                let element = stack.pop().ok_or_else(|| XmlError::MismatchedTag {
                    expected: String::new(),
                    found: closing.clone(),
                })?;
                if element.tag != closing {
                    return Err(XmlError::MismatchedTag {
                        expected: element.tag,
                        found: closing,
                    });
                }
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| XmlError::Syntax {
                    position: reader.buffer_position() as u64,
                    message: e.to_string(),
                })?;
                push_text(&mut stack, &text);
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                let text = str::from_utf8(&raw).map_err(|e| XmlError::Syntax {
                    position: reader.buffer_position() as u64,
                    message: e.to_string(),
                })?;
                push_text(&mut stack, text);
            }
            Event::Eof => break,
            // Declarations, comments and processing instructions carry nothing we need.
            _ => {}
        }

        buf.clear();
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed(open.tag));
    }
    root.map(ElementTree::new).ok_or(XmlError::EmptyDocument)
}

fn element_from_start(e: &BytesStart<'_>) -> Result<Element, XmlError> {
    let tag = local_name(e.local_name().as_ref())?;
    let mut attributes = AHashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| XmlError::Attribute {
            element: tag.clone(),
            message: err.to_string(),
        })?;
        if attr.key.as_ref().starts_with(b"xmlns") {
            continue;
        }
        let key = local_name(attr.key.local_name().as_ref())?;
        let value = attr.unescape_value().map_err(|err| XmlError::Attribute {
            element: tag.clone(),
            message: err.to_string(),
        })?;
        attributes.insert(key, value.into_owned());
    }
    Ok(Element {
        tag,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(XmlError::Syntax {
                position: 0,
                message: format!("second root element '{}'", element.tag),
            });
        }
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if let Some(current) = stack.last_mut() {
        current.text.push_str(text);
    }
}

fn local_name(raw: &[u8]) -> Result<String, XmlError> {
    str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| XmlError::Syntax {
            position: 0,
            message: format!("invalid UTF-8 in name: {}", e),
        })
}
