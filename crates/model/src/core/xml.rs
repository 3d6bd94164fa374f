use crate::core::error::FormatError;
use roxmltree::{Document, Node, NodeType};
use std::{fmt, str::FromStr};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A well-formed XML document, kept as the canonical markup of its root
/// element.
///
/// The prolog (declaration, comments, processing instructions before the root)
/// is dropped. The root is re-serialized rather than copied, so documents that
/// differ only in quoting, empty-element syntax or insignificant whitespace
/// have the same markup:
///
/// - attribute values in double quotes, escaped;
/// - namespace declarations on the element that introduces them, ahead of the
///   other attributes;
/// - childless elements as `<name />`;
/// - whitespace-only text nodes removed, CDATA sections written as escaped
///   text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlDocument {
    outer_xml: String,
}

impl XmlDocument {
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let doc = Document::parse(text).map_err(|e| FormatError::Xml(e.to_string()))?;
        let root = doc
            .root()
            .first_element_child()
            .ok_or(FormatError::MissingRoot)?;

        let mut outer_xml = String::with_capacity(text.len());
        write_element(&mut outer_xml, text, root);
        Ok(Self { outer_xml })
    }

    /// Markup of the root element, from its start tag to its end tag.
    pub fn outer_xml(&self) -> &str {
        &self.outer_xml
    }
}

fn write_node(out: &mut String, source: &str, node: Node) {
    match node.node_type() {
        NodeType::Element => write_element(out, source, node),
        NodeType::Text if is_blank_text(&node) => {}
        NodeType::Text => escape_into(out, node.text().unwrap_or_default(), false),
        NodeType::Comment => {
            out.push_str("<!--");
            out.push_str(node.text().unwrap_or_default());
            out.push_str("-->");
        }
        NodeType::PI => {
            if let Some(pi) = node.pi() {
                out.push_str("<?");
                out.push_str(pi.target);
                if let Some(value) = pi.value {
                    out.push(' ');
                    out.push_str(value);
                }
                out.push_str("?>");
            }
        }
        NodeType::Root => {}
    }
}

fn write_element(out: &mut String, source: &str, node: Node) {
    let name = qualified_name(source, node);
    out.push('<');
    out.push_str(name);

    let inherited: Vec<_> = node
        .parent_element()
        .map(|parent| {
            parent
                .namespaces()
                .map(|ns| (ns.name(), ns.uri()))
                .collect()
        })
        .unwrap_or_default();
    for ns in node.namespaces() {
        if ns.uri() == XML_NAMESPACE || inherited.contains(&(ns.name(), ns.uri())) {
            continue;
        }
        match ns.name() {
            Some(prefix) => {
                out.push_str(" xmlns:");
                out.push_str(prefix);
            }
            None => out.push_str(" xmlns"),
        }
        out.push_str("=\"");
        escape_into(out, ns.uri(), true);
        out.push('"');
    }

    for attr in node.attributes() {
        out.push(' ');
        if let Some(prefix) = attr.namespace().and_then(|uri| attribute_prefix(node, uri)) {
            out.push_str(&prefix);
            out.push(':');
        }
        out.push_str(attr.name());
        out.push_str("=\"");
        escape_into(out, attr.value(), true);
        out.push('"');
    }

    let mut children = node
        .children()
        .filter(|child| !is_blank_text(child))
        .peekable();
    if children.peek().is_none() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in children {
        write_node(out, source, child);
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn is_blank_text(node: &Node) -> bool {
    node.is_text() && node.text().unwrap_or_default().trim().is_empty()
}

/// Element name with the prefix used in the source start tag.
fn qualified_name<'a>(source: &'a str, node: Node) -> &'a str {
    let tag = &source[node.range()];
    let tag = tag.strip_prefix('<').unwrap_or(tag);
    let end = tag
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(tag.len());
    &tag[..end]
}

/// Attributes never take the default namespace, so only named prefixes count.
fn attribute_prefix(node: Node, uri: &str) -> Option<String> {
    if uri == XML_NAMESPACE {
        return Some("xml".to_string());
    }
    node.namespaces()
        .filter(|ns| ns.uri() == uri)
        .find_map(|ns| ns.name().map(str::to_string))
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\t' if attribute => out.push_str("&#x9;"),
            '\n' if attribute => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c => out.push(c),
        }
    }
}

impl FromStr for XmlDocument {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.outer_xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outer(text: &str) -> String {
        XmlDocument::parse(text).unwrap().outer_xml().to_string()
    }

    #[test]
    fn test_parse_strips_prolog() {
        assert_eq!(
            outer(
                r#"<?xml version="1.0" encoding="utf-8"?>
<!-- generated -->
<root a="1"><child/></root>"#
            ),
            r#"<root a="1"><child /></root>"#
        );
    }

    #[test]
    fn test_equivalent_documents_share_markup() {
        let single = XmlDocument::parse("<root a='1'><child/></root>").unwrap();
        let double = XmlDocument::parse(r#"<root a="1"><child /></root>"#).unwrap();
        let spaced =
            XmlDocument::parse("<root  a = \"1\" >\n  <child></child>\n</root>").unwrap();
        assert_eq!(single, double);
        assert_eq!(single, spaced);
        assert_eq!(single.outer_xml(), r#"<root a="1"><child /></root>"#);
    }

    #[test]
    fn test_escaping() {
        assert_eq!(
            outer(r#"<r q='say "hi"' amp="&amp;&lt;">a &gt; b &amp; <![CDATA[<c>]]></r>"#),
            r#"<r q="say &quot;hi&quot;" amp="&amp;&lt;">a &gt; b &amp; &lt;c&gt;</r>"#
        );
    }

    #[test]
    fn test_namespaces_are_declared_once() {
        assert_eq!(
            outer(concat!(
                r#"<p:root xmlns:p="urn:p"><p:item p:id="1" xml:lang="en"/>"#,
                r#"<leaf xmlns="urn:d"><x/></leaf></p:root>"#
            )),
            concat!(
                r#"<p:root xmlns:p="urn:p"><p:item p:id="1" xml:lang="en" />"#,
                r#"<leaf xmlns="urn:d"><x /></leaf></p:root>"#
            )
        );
    }

    #[test]
    fn test_comments_and_instructions_inside_root() {
        assert_eq!(
            outer("<r><!--note--><?app run?>text</r>"),
            "<r><!--note--><?app run?>text</r>"
        );
    }

    #[test]
    fn test_parse_rejects_malformed_markup() {
        assert!(matches!(
            XmlDocument::parse("<root><child></root>"),
            Err(FormatError::Xml(_))
        ));
        assert!(XmlDocument::parse("").is_err());
    }
}
