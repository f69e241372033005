//! Rendered output: a small markup tree and its HTML serialization.

use crate::html_escape::{css_property, escape_into, escape_style_text};
use crate::stylesheet::Stylesheet;
use crate::template::SectionKind;
use crate::value::stringify;
use serde::Serialize;
use serde_json::{Map, Value};

const VOID_ELEMENTS: &[&str] = &["img", "hr", "br"];

/// A node of presentation markup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    Element(Element),
    Text(String),
}

impl Markup {
    pub fn text(text: impl Into<String>) -> Self {
        Markup::Text(text.into())
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Markup::Element(element) => element.write_html(out),
            Markup::Text(text) => escape_into(out, text),
        }
    }
}

impl From<Element> for Markup {
    fn from(element: Element) -> Self {
        Markup::Element(element)
    }
}

/// An element with attributes and children
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Markup>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a child only when there is one
    pub fn child_opt(mut self, child: Option<impl Into<Markup>>) -> Self {
        if let Some(child) = child {
            self.children.push(child.into());
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Markup::text(text))
    }

    /// Concatenated text content of the element and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        self.write_open_tag(out);
        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        self.write_close_tag(out);
    }

    fn write_open_tag(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(out, value);
            out.push('"');
        }
        out.push('>');
    }

    fn write_close_tag(&self, out: &mut String) {
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

fn collect_text(children: &[Markup], out: &mut String) {
    for child in children {
        match child {
            Markup::Text(text) => out.push_str(text),
            Markup::Element(element) => collect_text(&element.children, out),
        }
    }
}

/// One rendered section and its rendered children
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedBlock {
    pub id: String,
    pub kind: SectionKind,
    pub style: Map<String, Value>,
    pub content: Element,
    pub children: Vec<RenderedBlock>,
}

impl RenderedBlock {
    /// Inline CSS for the block's merged style
    pub fn inline_style(&self) -> String {
        inline_style(&self.style)
    }

    /// Depth-first search for a block by section id
    pub fn find(&self, id: &str) -> Option<&RenderedBlock> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn write_html(&self, out: &mut String) {
        let mut section = Element::new("section")
            .class(format!("section section-{}", self.kind))
            .attr("data-section-id", self.id.as_str());
        let style = self.inline_style();
        if !style.is_empty() {
            section = section.attr("style", style);
        }

        section.write_open_tag(out);
        self.content.write_html(out);
        if !self.children.is_empty() {
            let container = Element::new("div").class("section-children");
            container.write_open_tag(out);
            for child in &self.children {
                child.write_html(out);
            }
            container.write_close_tag(out);
        }
        section.write_close_tag(out);
    }
}

/// A fully rendered invitation page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    pub stylesheet: Stylesheet,
    pub max_width: String,
    pub blocks: Vec<RenderedBlock>,
}

impl RenderedPage {
    /// Depth-first search for a block by section id
    pub fn find(&self, id: &str) -> Option<&RenderedBlock> {
        self.blocks.iter().find_map(|block| block.find(id))
    }

    /// Serialize the page as an HTML fragment: the theme `<style>` followed
    /// by the page container.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<style>");
        out.push_str(&escape_style_text(self.stylesheet.css()));
        out.push_str("</style>");

        out.push_str("<main class=\"invitation\" style=\"max-width:");
        escape_into(&mut out, &self.max_width);
        out.push_str("\">");
        for block in &self.blocks {
            block.write_html(&mut out);
        }
        out.push_str("</main>");
        out
    }
}

fn inline_style(style: &Map<String, Value>) -> String {
    style
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| format!("{}:{}", css_property(name), stringify(value)))
        .collect::<Vec<_>>()
        .join(";")
}
