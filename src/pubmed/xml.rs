//! Owned XML element tree
//!
//! EFetch documents are small (one request, at most a few hundred articles), so
//! the whole response is read into a tree with quick-xml's pull reader and the
//! extractor queries it with ElementTree-style paths.

use crate::error::{PubMedError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, instrument};

/// A node inside an element: either a child element or a run of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with its attributes and children in document order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an element without attributes or children
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Value of an attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Direct child elements with the given name
    pub fn children_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a XmlElement> {
        self.child_elements().filter(move |child| child.name == name)
    }

    /// First direct child element with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children_named(name).next()
    }

    /// All descendant elements in document order, excluding `self`
    pub fn descendants(&self) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        let mut stack: Vec<&XmlElement> = self.child_elements().collect();
        stack.reverse();
        while let Some(element) = stack.pop() {
            out.push(element);
            let start = stack.len();
            stack.extend(element.child_elements());
            stack[start..].reverse();
        }
        out
    }

    /// Every element matching `path`, in document order
    ///
    /// The first step matches descendants at any depth and each following step
    /// matches direct children, i.e. `["Journal", "Title"]` behaves like the
    /// ElementTree path `.//Journal/Title`.
    pub fn select_all(&self, path: &[&str]) -> Vec<&XmlElement> {
        let Some((first, rest)) = path.split_first() else {
            return Vec::new();
        };

        let mut current: Vec<&XmlElement> = self
            .descendants()
            .into_iter()
            .filter(|element| element.name == *first)
            .collect();

        for step in rest {
            current = current
                .into_iter()
                .flat_map(|element| element.children_named(step))
                .collect();
        }

        current
    }

    /// First element matching `path` (see [`select_all`](Self::select_all))
    pub fn select(&self, path: &[&str]) -> Option<&XmlElement> {
        self.select_all(path).into_iter().next()
    }

    /// Concatenated text of this element and all of its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }

    /// Trimmed text content, `None` when it is empty
    pub fn trimmed_text(&self) -> Option<String> {
        let text = self.text_content();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Parse an XML document into its root element
///
/// # Errors
///
/// Returns [`PubMedError::XmlParseError`] when the document is not well formed:
/// mismatched or unclosed tags, content outside the root element, a missing
/// root, or undecodable entities and attributes.
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse_document(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                ensure_single_root(&root, &stack)?;
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&root, &stack)?;
                let element = element_from_start(&start)?;
                attach(element, &mut stack, &mut root);
            }
            Event::End(_) => {
                // quick-xml has already verified the end tag matches the open one
                let element = stack.pop().ok_or_else(|| PubMedError::XmlParseError {
                    message: "closing tag without matching opening tag".to_string(),
                })?;
                attach(element, &mut stack, &mut root);
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                push_text(&text, &mut stack)?;
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                push_text(&text, &mut stack)?;
            }
            Event::Eof => break,
            // Declaration, DOCTYPE, comments and processing instructions
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(PubMedError::XmlParseError {
            message: format!("unclosed element <{}>", open.name),
        });
    }

    let root = root.ok_or_else(|| PubMedError::XmlParseError {
        message: "document has no root element".to_string(),
    })?;

    debug!(root = %root.name, "Parsed XML document");
    Ok(root)
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn ensure_single_root(root: &Option<XmlElement>, stack: &[XmlElement]) -> Result<()> {
    if stack.is_empty() && root.is_some() {
        return Err(PubMedError::XmlParseError {
            message: "more than one root element".to_string(),
        });
    }
    Ok(())
}

fn attach(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None => *root = Some(element),
    }
}

fn push_text(text: &str, stack: &mut [XmlElement]) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Text(text.to_string()));
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(PubMedError::XmlParseError {
            message: "text outside of the root element".to_string(),
        }),
    }
}
