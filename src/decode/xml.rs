//! Minimal XML element tree to JSON value conversion
//!
//! Handles the flat element structures RPD error bodies use. Attributes
//! are ignored; repeated sibling elements collapse into an array; text
//! content stays a string so error fields survive verbatim.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Parse an XML document into a JSON value rooted at the document element.
pub(crate) fn parse(input: &str) -> Result<Value> {
    let mut rest = input.trim_start();

    if let Some(after_decl) = rest.strip_prefix("<?") {
        let end = after_decl
            .find("?>")
            .ok_or_else(|| Error::malformed_xml("unterminated XML declaration"))?;
        rest = after_decl[end + 2..].trim_start();
    }

    if !rest.starts_with('<') {
        return Err(Error::malformed_xml("input does not appear to be XML"));
    }

    let (_, value, _) = parse_element(rest)?;
    Ok(value)
}

/// Parse one element, returning its name, value, and the remaining input.
fn parse_element(input: &str) -> Result<(&str, Value, &str)> {
    let input = input.trim_start();
    let after_open = input
        .strip_prefix('<')
        .ok_or_else(|| Error::malformed_xml("expected opening tag"))?;
    let tag_end = after_open
        .find('>')
        .ok_or_else(|| Error::malformed_xml("unclosed tag"))?;
    let tag = &after_open[..tag_end];

    // Self-closing element carries no content
    if let Some(bare) = tag.strip_suffix('/') {
        let name = element_name(bare)?;
        return Ok((name, Value::Null, &after_open[tag_end + 1..]));
    }

    let name = element_name(tag)?;
    let content_start = &after_open[tag_end + 1..];
    let close_tag = format!("</{name}>");
    let close_pos = content_start
        .find(&close_tag)
        .ok_or_else(|| Error::malformed_xml(format!("missing closing tag for <{name}>")))?;

    let content = &content_start[..close_pos];
    let rest = &content_start[close_pos + close_tag.len()..];
    Ok((name, parse_content(content)?, rest))
}

/// Tag name without attributes
fn element_name(tag: &str) -> Result<&str> {
    tag.split_whitespace()
        .next()
        .filter(|name| !name.is_empty() && !name.starts_with('/'))
        .ok_or_else(|| Error::malformed_xml("malformed tag"))
}

/// Parse element content: empty, text, or child elements.
fn parse_content(content: &str) -> Result<Value> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    if !trimmed.contains('<') {
        return Ok(Value::String(unescape(trimmed)));
    }

    let mut fields = Map::new();
    let mut rest = trimmed;
    while let Some(pos) = rest.find('<') {
        rest = &rest[pos..];
        let (name, value, remaining) = parse_element(rest)?;

        // Repeated sibling names collapse into an array
        match fields.get_mut(name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                fields.insert(name.to_string(), value);
            }
        }
        rest = remaining;
    }

    Ok(Value::Object(fields))
}

/// Resolve the five predefined XML entities
fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
