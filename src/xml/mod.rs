//! A minimal, read-only element tree.
//!
//! The engine never looks at raw XML. It consumes an `ElementTree` whose tags and
//! attribute names have already been reduced to their local names, so
//! `bpmn:userTask` and `userTask` are the same thing from here on.

use ahash::AHashMap;

mod reader;

pub use reader::parse_xml;

/// A single node of the tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: AHashMap<String, String>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The `id` attribute, or an empty string.
    pub fn id(&self) -> &str {
        self.attr("id").unwrap_or_default()
    }

    /// The `name` attribute, or an empty string.
    pub fn name(&self) -> &str {
        self.attr("name").unwrap_or_default()
    }

    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    pub fn first_child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Text content of every direct child with the given tag, in document order.
    pub fn child_texts(&self, tag: &str) -> Vec<String> {
        self.children_named(tag)
            .map(|c| c.text.clone())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Depth-first, document-order walk over all descendants with the given tag.
    pub fn descendants_named<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_descendants(tag, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.tag == tag {
                found.push(child);
            }
            child.collect_descendants(tag, found);
        }
    }

    /// Finds the first descendant with the given tag and id.
    pub fn find_by_id<'a>(&'a self, tag: &str, id: &str) -> Option<&'a Element> {
        self.descendants_named(tag).into_iter().find(|e| e.id() == id)
    }
}

/// A parsed document. Owned by the caller; the engine only borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTree {
    pub root: Element,
}

impl ElementTree {
    pub fn new(root: Element) -> Self {
        Self { root }
    }
}
