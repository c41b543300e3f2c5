use crate::error::{NamecheapError, NcResult};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One element currently being decoded.
struct Frame {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<(String, Value)>,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
            text: String::new(),
        }
    }
}

/// Decode raw XML text into a mapping-of-mappings `Value`.
///
/// The decoder only ever produces `Value::Object` and `Value::String`:
/// attributes merge into the element's object under their literal names,
/// an element holding both attributes and text keeps the text under the
/// `#text` key (the `#` marker is stripped later by the key normalizer),
/// and repeated sibling elements become an object keyed `"0"`, `"1"`, ...
/// in encounter order. The array-ification pass turns those numeric-keyed
/// objects into real sequences afterwards.
pub fn decode(text: &str) -> NcResult<Value> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    // Implicit document frame at the bottom so a (malformed) multi-root
    // document still decodes the same way the reference parser does.
    let mut stack = vec![Frame::new(String::new())];

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let mut frame = Frame::new(name_of(e.name().as_ref()));
                collect_attrs(&e, &mut frame)?;
                stack.push(frame);
            }
            Event::Empty(e) => {
                let mut frame = Frame::new(name_of(e.name().as_ref()));
                collect_attrs(&e, &mut frame)?;
                close_frame(&mut stack, frame)?;
            }
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| NamecheapError::MalformedResponse(e.to_string()))?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                let bytes = c.into_inner();
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&bytes));
                }
            }
            Event::End(_) => match stack.pop() {
                Some(frame) if !stack.is_empty() => close_frame(&mut stack, frame)?,
                _ => {
                    return Err(NamecheapError::MalformedResponse(
                        "unexpected closing tag".into(),
                    ))
                }
            },
            Event::Eof => break,
            _ => {}
        }
    }

    match stack.pop() {
        Some(document) if stack.is_empty() && !document.children.is_empty() => {
            Ok(Value::Object(build_map(document)))
        }
        Some(_) if !stack.is_empty() => Err(NamecheapError::MalformedResponse(
            "unexpected end of document".into(),
        )),
        _ => Err(NamecheapError::MalformedResponse("no root element".into())),
    }
}

fn name_of(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn collect_attrs(e: &quick_xml::events::BytesStart<'_>, frame: &mut Frame) -> NcResult<()> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| NamecheapError::MalformedResponse(e.to_string()))?;
        let key = name_of(attr.key.as_ref());
        let value = attr
            .unescape_value()
            .map_err(|e| NamecheapError::MalformedResponse(e.to_string()))?
            .into_owned();
        frame.attrs.push((key, value));
    }
    Ok(())
}

/// Finish a frame into a `Value` and attach it to its parent.
fn close_frame(stack: &mut Vec<Frame>, frame: Frame) -> NcResult<()> {
    let name = frame.name.clone();
    let value = finish(frame);
    let parent = stack.last_mut().ok_or_else(|| {
        NamecheapError::MalformedResponse("unexpected closing tag".into())
    })?;
    parent.children.push((name, value));
    Ok(())
}

fn finish(frame: Frame) -> Value {
    if frame.attrs.is_empty() && frame.children.is_empty() {
        // Text-only (or empty) element collapses to its string content.
        return Value::String(frame.text);
    }
    Value::Object(build_map(frame))
}

fn build_map(frame: Frame) -> Map<String, Value> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for (name, _) in &frame.children {
        *counts.entry(name.clone()).or_insert(0) += 1;
    }

    let mut map = Map::new();
    for (key, value) in frame.attrs {
        map.insert(key, Value::String(value));
    }

    for (name, value) in frame.children {
        if counts.get(&name).copied().unwrap_or(0) > 1 {
            // Repeated siblings collect under numeric string keys.
            match map.get_mut(&name) {
                Some(Value::Object(group)) => {
                    let index = group.len().to_string();
                    group.insert(index, value);
                }
                _ => {
                    let mut group = Map::new();
                    group.insert("0".to_string(), value);
                    map.insert(name, Value::Object(group));
                }
            }
        } else {
            map.insert(name, value);
        }
    }

    if !frame.text.is_empty() {
        map.insert("#text".to_string(), Value::String(frame.text));
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_text_element() {
        let value = decode("<Root><Name>hello</Name></Root>").unwrap();
        assert_eq!(value, json!({ "Root": { "Name": "hello" } }));
    }

    #[test]
    fn test_decode_merges_attributes() {
        let value = decode(r#"<Root><Host Name="@" TTL="1800"/></Root>"#).unwrap();
        assert_eq!(
            value,
            json!({ "Root": { "Host": { "Name": "@", "TTL": "1800" } } })
        );
    }

    #[test]
    fn test_decode_attribute_and_text() {
        let value = decode(r#"<Root><Forward mailbox="info">dest@example.com</Forward></Root>"#)
            .unwrap();
        assert_eq!(
            value,
            json!({ "Root": { "Forward": { "mailbox": "info", "#text": "dest@example.com" } } })
        );
    }

    #[test]
    fn test_decode_empty_element_is_empty_string() {
        let value = decode("<Root><Empty/></Root>").unwrap();
        assert_eq!(value, json!({ "Root": { "Empty": "" } }));
    }

    #[test]
    fn test_decode_repeated_siblings_get_numeric_keys() {
        let value = decode("<Root><Item>a</Item><Item>b</Item><Item>c</Item></Root>").unwrap();
        assert_eq!(
            value,
            json!({ "Root": { "Item": { "0": "a", "1": "b", "2": "c" } } })
        );
    }

    #[test]
    fn test_decode_single_sibling_stays_flat() {
        let value = decode("<Root><Item>a</Item><Other>b</Other></Root>").unwrap();
        assert_eq!(value, json!({ "Root": { "Item": "a", "Other": "b" } }));
    }

    #[test]
    fn test_decode_unescapes_entities() {
        let value = decode("<Root><Text>a &amp; b</Text></Root>").unwrap();
        assert_eq!(value, json!({ "Root": { "Text": "a & b" } }));
    }

    #[test]
    fn test_decode_malformed_fails() {
        assert!(decode("<Root><Unclosed></Root>").is_err());
        assert!(decode("").is_err());
    }
}
