//! XML fragment parsing and rendering for string arguments that look like
//! markup.
//!
//! Parsing builds a minimal element tree from `quick-xml` events; anything
//! a strict parser would reject (mismatched tags, trailing content, more
//! than one root) yields `None` and the caller falls back to structured
//! encoding. Rendering walks the tree into the span vocabulary the viewer
//! styles: `bracket`, `namespace`, `tag`, `attribute`, `string`, `block`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::html::escape_attr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct XmlElement {
    prefix: Option<String>,
    local: String,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct XmlAttribute {
    prefix: Option<String>,
    local: String,
    value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum XmlNode {
    Element(XmlElement),
    Content(String),
}

/// Parses a document with exactly one root element. `None` means the text
/// is not well-formed XML.
pub(crate) fn parse(text: &str) -> Option<XmlElement> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Err(_) => return None,
            Ok(Event::Eof) => break,
            Ok(Event::Start(start)) => {
                if root.is_some() {
                    return None;
                }
                stack.push(element_from(&start)?);
            }
            Ok(Event::Empty(start)) => {
                if root.is_some() {
                    return None;
                }
                let element = element_from(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(element)),
                    None => root = Some(element),
                }
            }
            Ok(Event::End(end)) => {
                let element = stack.pop()?;
                if end.name().as_ref() != element.qualified_name().as_bytes() {
                    return None;
                }
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(element)),
                    None => root = Some(element),
                }
            }
            Ok(Event::Text(text)) => {
                let value = text.unescape().ok()?.into_owned();
                // Whitespace between elements is formatting, not content.
                if value.trim().is_empty() {
                    continue;
                }
                stack.last_mut()?.children.push(XmlNode::Content(value));
            }
            Ok(Event::CData(data)) => {
                let value = String::from_utf8(data.into_inner().into_owned()).ok()?;
                stack.last_mut()?.children.push(XmlNode::Content(value));
            }
            Ok(Event::Comment(_))
            | Ok(Event::Decl(_))
            | Ok(Event::PI(_))
            | Ok(Event::DocType(_)) => {}
        }
    }

    if !stack.is_empty() {
        return None;
    }
    root
}

/// Renders the element tree, one node per indented line.
pub(crate) fn render(root: &XmlElement) -> String {
    render_element(root, 0)
}

impl XmlElement {
    fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.local.clone(),
        }
    }
}

fn element_from(start: &BytesStart<'_>) -> Option<XmlElement> {
    let qname = start.name();
    let name = std::str::from_utf8(qname.as_ref()).ok()?;
    let (prefix, local) = split_name(name);

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.ok()?;
        let key = std::str::from_utf8(attribute.key.as_ref()).ok()?;
        let (prefix, local) = split_name(key);
        attributes.push(XmlAttribute {
            prefix,
            local,
            value: attribute.unescape_value().ok()?.into_owned(),
        });
    }

    Some(XmlElement {
        prefix,
        local,
        attributes,
        children: Vec::new(),
    })
}

fn split_name(name: &str) -> (Option<String>, String) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
        None => (None, name.to_string()),
    }
}

/// Newline padded with spaces to the nesting width.
fn indent(depth: usize) -> String {
    let mut tab = String::from("\n");
    while tab.len() < depth * 4 {
        tab.push(' ');
    }
    tab
}

fn render_element(element: &XmlElement, depth: usize) -> String {
    let tab = indent(depth);
    let name = name_markup(element);

    let mut html = tab.clone();
    html.push_str("<span class=\"bracket\">&lt;</span>");
    html.push_str(&name);

    for attribute in &element.attributes {
        html.push(' ');
        if let Some(prefix) = &attribute.prefix {
            html.push_str("<span class=\"namespace\">");
            html.push_str(prefix);
            html.push_str(":</span>");
        }
        html.push_str("<span class=\"attribute\">");
        html.push_str(&attribute.local);
        html.push_str("=</span><span class=\"string\">&quot;");
        html.push_str(&escape_attr(&attribute.value));
        html.push_str("&quot;</span>");
    }

    html.push_str("<span class=\"bracket\">&gt;</span>");

    if !element.children.is_empty() {
        html.push_str("<span class=\"block\">");
        for child in &element.children {
            match child {
                XmlNode::Element(child) => html.push_str(&render_element(child, depth + 1)),
                XmlNode::Content(text) => {
                    html.push_str(&indent(depth + 1));
                    html.push_str(&escape_attr(text));
                }
            }
        }
        html.push_str(&tab);
        html.push_str("</span>");
    }

    html.push_str("<span class=\"bracket\">&lt;/</span>");
    html.push_str(&name);
    html.push_str("<span class=\"bracket\">&gt;</span>");
    html
}

fn name_markup(element: &XmlElement) -> String {
    let mut name = String::new();
    if let Some(prefix) = &element.prefix {
        name.push_str("<span class=\"namespace\">");
        name.push_str(prefix);
        name.push_str(":</span>");
    }
    name.push_str("<span class=\"tag\">");
    name.push_str(&element.local);
    name.push_str("</span>");
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Parsing ====================

    #[test]
    fn parses_a_simple_element() {
        let root = parse("<a>hi</a>").unwrap();
        assert_eq!(root.local, "a");
        assert_eq!(root.children, vec![XmlNode::Content("hi".to_string())]);
    }

    #[test]
    fn parses_self_closing_root() {
        let root = parse("<br/>").unwrap();
        assert_eq!(root.local, "br");
        assert!(root.children.is_empty());
    }

    #[test]
    fn splits_namespaced_names() {
        let root = parse(r#"<soap:envelope soap:id="1"/>"#).unwrap();
        assert_eq!(root.prefix.as_deref(), Some("soap"));
        assert_eq!(root.local, "envelope");
        assert_eq!(root.attributes[0].prefix.as_deref(), Some("soap"));
        assert_eq!(root.attributes[0].local, "id");
    }

    #[test]
    fn drops_whitespace_between_elements() {
        let root = parse("<a> <b/> </a>").unwrap();
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn decodes_entities_in_text_and_attributes() {
        let root = parse(r#"<a href="?x=1&amp;y=2">a &lt; b</a>"#).unwrap();
        assert_eq!(root.attributes[0].value, "?x=1&y=2");
        assert_eq!(root.children, vec![XmlNode::Content("a < b".to_string())]);
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(parse("<a>").is_none());
        assert!(parse("<a></b>").is_none());
        assert!(parse("<a/><b/>").is_none());
        assert!(parse("<a/>trailing").is_none());
        assert!(parse("not xml").is_none());
    }

    #[test]
    fn skips_declaration_and_comments() {
        let root = parse(r#"<?xml version="1.0"?><!-- note --><a/>"#).unwrap();
        assert_eq!(root.local, "a");
    }

    // ==================== Rendering ====================

    #[test]
    fn renders_nested_elements_with_indent() {
        let root = parse("<a><b>hi</b></a>").unwrap();
        assert_eq!(
            render(&root),
            "\n<span class=\"bracket\">&lt;</span><span class=\"tag\">a</span>\
             <span class=\"bracket\">&gt;</span><span class=\"block\">\
             \n   <span class=\"bracket\">&lt;</span><span class=\"tag\">b</span>\
             <span class=\"bracket\">&gt;</span><span class=\"block\">\
             \n       hi\n   </span>\
             <span class=\"bracket\">&lt;/</span><span class=\"tag\">b</span>\
             <span class=\"bracket\">&gt;</span>\n</span>\
             <span class=\"bracket\">&lt;/</span><span class=\"tag\">a</span>\
             <span class=\"bracket\">&gt;</span>"
        );
    }

    #[test]
    fn renders_attributes_with_quoted_values() {
        let root = parse(r#"<a href="x & 'y'"/>"#).unwrap();
        let html = render(&root);
        assert!(html.contains(
            "<span class=\"attribute\">href=</span>\
             <span class=\"string\">&quot;x &amp; &apos;y&apos;&quot;</span>"
        ));
    }

    #[test]
    fn renders_namespace_prefixes_as_spans() {
        let root = parse("<soap:body/>").unwrap();
        let html = render(&root);
        assert!(html.contains(
            "<span class=\"namespace\">soap:</span><span class=\"tag\">body</span>"
        ));
    }

    #[test]
    fn escapes_text_content() {
        let root = parse("<a>1 &lt; 2</a>").unwrap();
        assert!(render(&root).contains("\n   1 &lt; 2\n"));
    }
}
