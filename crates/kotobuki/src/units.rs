//! Presentation units: one pure function per section kind.
//!
//! A unit receives a section's props after placeholder resolution and builds
//! its markup. Missing props simply leave their element out.

use crate::document::{Element, Markup};
use crate::html_escape::is_safe_url;
use crate::options::RenderOptions;
use crate::template::SectionKind;
use crate::value::stringify;
use log::debug;
use serde_json::Value;

/// Input handed to a presentation unit
#[derive(Debug, Clone, Copy)]
pub struct UnitContext<'a> {
    pub props: &'a Value,
    pub options: &'a RenderOptions,
}

impl<'a> UnitContext<'a> {
    pub fn new(props: &'a Value, options: &'a RenderOptions) -> Self {
        Self { props, options }
    }

    fn text(&self, key: &str) -> Option<String> {
        text_of(self.props.get(key)?)
    }

    fn flag(&self, key: &str) -> Option<bool> {
        match self.props.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s == "true" => Some(true),
            Value::String(s) if s == "false" => Some(false),
            _ => None,
        }
    }

    /// Image element, or `None` when `src` uses a scheme that is not allowed
    fn image(&self, class: &str, src: &str, alt: Option<&str>) -> Option<Element> {
        let src = safe_url(src)?;
        Some(
            Element::new("img")
                .class(class)
                .attr("src", self.options.asset_url(src))
                .attr("alt", alt.unwrap_or_default()),
        )
    }
}

/// Renders resolved props into markup
pub type PresentationUnit = fn(&UnitContext) -> Element;

/// Look up the presentation unit for a section kind.
/// Unrecognized kinds have no unit.
pub fn unit_for(kind: &SectionKind) -> Option<PresentationUnit> {
    let unit: PresentationUnit = match kind {
        SectionKind::Header => header,
        SectionKind::Cover => cover,
        SectionKind::Couple => couple,
        SectionKind::Event => event,
        SectionKind::Gallery => gallery,
        SectionKind::Blessing => blessing,
        SectionKind::Guestbook => guestbook,
        SectionKind::Rsvp => rsvp,
        SectionKind::Divider => divider,
        SectionKind::Spacer => spacer,
        SectionKind::Custom => custom,
        SectionKind::Unrecognized(_) => return None,
    };
    Some(unit)
}

fn safe_url(reference: &str) -> Option<&str> {
    if is_safe_url(reference) {
        Some(reference)
    } else {
        debug!("dropping url with a disallowed scheme: {reference}");
        None
    }
}

/// Non-empty text of a scalar value
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => {
            let text = stringify(value);
            (!text.is_empty()).then_some(text)
        }
        _ => None,
    }
}

fn texts_of(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(text_of).collect(),
        Some(other) => text_of(other).into_iter().collect(),
        None => Vec::new(),
    }
}

fn tagged(tag: &'static str, class: &str, text: Option<String>) -> Option<Element> {
    text.map(|text| Element::new(tag).class(class).text(text))
}

fn header(ctx: &UnitContext) -> Element {
    Element::new("header")
        .class("kb-header")
        .child_opt(tagged("h1", "title", ctx.text("title")))
        .child_opt(tagged("p", "subtitle", ctx.text("subtitle")))
}

fn cover(ctx: &UnitContext) -> Element {
    let title = ctx.text("title");
    let image = ctx
        .text("image")
        .and_then(|src| ctx.image("cover-image", &src, title.as_deref()));
    Element::new("div")
        .class("kb-cover")
        .child_opt(image)
        .child_opt(tagged("h1", "title", title))
        .child_opt(tagged("p", "subtitle", ctx.text("subtitle")))
        .child_opt(tagged("p", "date", ctx.text("date")))
}

fn person(ctx: &UnitContext, role: &str) -> Option<Element> {
    let props = ctx.props.get(role)?;
    let person = UnitContext::new(props, ctx.options);
    let name = person.text("name");
    let avatar = person
        .text("avatar")
        .and_then(|src| ctx.image("avatar", &src, name.as_deref()));
    let intro: Vec<Markup> = texts_of(props.get("intro"))
        .into_iter()
        .map(|line| Element::new("li").text(line).into())
        .collect();
    let intro = (!intro.is_empty()).then(|| Element::new("ul").class("intro").children(intro));

    Some(
        Element::new("div")
            .class(format!("person person-{role}"))
            .child_opt(avatar)
            .child_opt(tagged("h3", "name", name))
            .child_opt(tagged("p", "bio", person.text("bio")))
            .child_opt(intro),
    )
}

fn couple(ctx: &UnitContext) -> Element {
    let connector = ctx.text("connector").unwrap_or_else(|| "&".to_string());
    Element::new("div")
        .class("kb-couple")
        .child_opt(person(ctx, "groom"))
        .child(Element::new("span").class("connector").text(connector))
        .child_opt(person(ctx, "bride"))
}

fn event(ctx: &UnitContext) -> Element {
    let href = ctx.text("mapUrl");
    let map = href.as_deref().and_then(safe_url).map(|href| {
        let label = ctx.text("mapLabel").unwrap_or_else(|| "View map".to_string());
        Element::new("a").class("map-link").attr("href", href).text(label)
    });
    Element::new("div")
        .class("kb-event")
        .child_opt(tagged("h2", "title", ctx.text("title")))
        .child_opt(tagged("p", "date", ctx.text("date")))
        .child_opt(tagged("p", "time", ctx.text("time")))
        .child_opt(tagged("p", "venue", ctx.text("venue")))
        .child_opt(tagged("p", "address", ctx.text("address")))
        .child_opt(map)
}

fn gallery(ctx: &UnitContext) -> Element {
    let layout = ctx.text("layout").unwrap_or_else(|| "grid".to_string());
    let figures: Vec<Markup> = match ctx.props.get("images") {
        Some(Value::Array(images)) => images.iter().filter_map(|image| figure(ctx, image)).collect(),
        _ => Vec::new(),
    };
    Element::new("div")
        .class(format!("kb-gallery gallery-{layout}"))
        .child_opt(tagged("h2", "title", ctx.text("title")))
        .children(figures)
}

fn figure(ctx: &UnitContext, image: &Value) -> Option<Markup> {
    let (url, caption) = match image {
        Value::String(url) => (Some(url.clone()), None),
        Value::Object(fields) => (
            fields.get("url").and_then(text_of),
            fields.get("caption").and_then(text_of),
        ),
        _ => (None, None),
    };
    let image = ctx.image("photo", &url?, caption.as_deref())?;
    Some(
        Element::new("figure")
            .child(image)
            .child_opt(caption.map(|text| Element::new("figcaption").text(text)))
            .into(),
    )
}

fn blessing(ctx: &UnitContext) -> Element {
    Element::new("blockquote")
        .class("kb-blessing")
        .child_opt(tagged("p", "text", ctx.text("text")))
        .child_opt(tagged("cite", "author", ctx.text("author")))
}

fn guestbook(ctx: &UnitContext) -> Element {
    let enabled = ctx.flag("enabled").unwrap_or(true);
    let mut root = Element::new("div")
        .class(if enabled { "kb-guestbook" } else { "kb-guestbook guestbook-closed" })
        .child_opt(tagged("h2", "title", ctx.text("title")));
    if !enabled {
        return root;
    }

    let entries: Vec<Markup> = match ctx.props.get("entries") {
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| {
                let entry = UnitContext::new(entry, ctx.options);
                Element::new("li")
                    .class("entry")
                    .child_opt(tagged("strong", "name", entry.text("name")))
                    .child_opt(tagged("p", "message", entry.text("message")))
                    .child_opt(tagged("time", "timestamp", entry.text("timestamp")))
                    .into()
            })
            .collect(),
        _ => Vec::new(),
    };
    if !entries.is_empty() {
        root = root.child(Element::new("ul").class("entries").children(entries));
    }
    root
}

fn rsvp(ctx: &UnitContext) -> Element {
    let enabled = ctx.flag("enabled").unwrap_or(true);
    let root = Element::new("div")
        .class("kb-rsvp")
        .child_opt(tagged("h2", "title", ctx.text("title")));
    if !enabled {
        let closed = ctx
            .text("closedText")
            .unwrap_or_else(|| "RSVP is closed".to_string());
        return root.child(Element::new("p").class("closed").text(closed));
    }
    root.child_opt(tagged("p", "deadline", ctx.text("deadline")))
        .child_opt(tagged("p", "contact", ctx.text("contact")))
}

fn divider(ctx: &UnitContext) -> Element {
    Element::new("div")
        .class("kb-divider")
        .child(Element::new("hr"))
        .child_opt(tagged("span", "symbol", ctx.text("symbol")))
}

fn spacer(ctx: &UnitContext) -> Element {
    let height = match ctx.props.get("height") {
        Some(number @ Value::Number(_)) => format!("{}px", stringify(number)),
        Some(value) => text_of(value).unwrap_or_else(|| "24px".to_string()),
        None => "24px".to_string(),
    };
    Element::new("div")
        .class("kb-spacer")
        .attr("style", format!("height:{height}"))
}

fn custom(ctx: &UnitContext) -> Element {
    let mut paragraphs = texts_of(ctx.props.get("paragraphs"));
    if paragraphs.is_empty() {
        paragraphs = texts_of(ctx.props.get("text"));
    }
    Element::new("div")
        .class("kb-custom")
        .child_opt(tagged("h2", "title", ctx.text("title")))
        .children(
            paragraphs
                .into_iter()
                .map(|text| Markup::from(Element::new("p").text(text))),
        )
}
