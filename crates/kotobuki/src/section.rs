//! Section factory: renders one section node and its children.

use crate::document::RenderedBlock;
use crate::placeholder::PlaceholderParser;
use crate::template::{Animation, Section};
use crate::units::{unit_for, UnitContext};
use log::{debug, warn};
use serde_json::{Map, Value};

/// Duration used when an animation leaves it out, in seconds
pub const DEFAULT_ANIMATION_DURATION: f64 = 0.8;
const ANIMATION_EASING: &str = "ease-out both";

/// Renders section nodes against one data object.
///
/// Holds only shared references; rendering never mutates the template, the
/// data or the parser.
pub struct SectionFactory<'a> {
    parser: &'a PlaceholderParser,
}

impl<'a> SectionFactory<'a> {
    pub fn new(parser: &'a PlaceholderParser) -> Self {
        Self { parser }
    }

    /// Render a section and, recursively, its children.
    ///
    /// Returns `None` when the section's condition fails (its children are
    /// skipped with it) or when its kind has no presentation unit.
    pub fn render(&self, section: &Section, data: &Value) -> Option<RenderedBlock> {
        if !section.is_visible(data) {
            debug!("section '{}' hidden by its condition", section.id);
            return None;
        }

        let Some(unit) = unit_for(&section.kind) else {
            warn!(
                "skipping section '{}': unrecognized section type '{}'",
                section.id, section.kind
            );
            return None;
        };

        let props = match &section.props {
            Some(props) => self.parser.parse(props, data),
            None => Value::Object(Map::new()),
        };
        let style = merge_style(&section.style, section.animation.as_ref());
        let content = unit(&UnitContext::new(&props, self.parser.options()));

        let children = section
            .children
            .iter()
            .filter_map(|child| self.render(child, data))
            .collect();

        Some(RenderedBlock {
            id: section.id.clone(),
            kind: section.kind.clone(),
            style,
            content,
            children,
        })
    }
}

/// Merge the section's style with the directives derived from its animation
pub fn merge_style(style: &Map<String, Value>, animation: Option<&Animation>) -> Map<String, Value> {
    let mut merged = style.clone();
    if let Some(animation) = animation {
        let duration = animation.duration.unwrap_or(DEFAULT_ANIMATION_DURATION);
        let delay = animation.delay.unwrap_or(0.0);
        merged.insert(
            "animation".to_string(),
            Value::String(format!(
                "{} {}s {}",
                animation.name,
                seconds(duration),
                ANIMATION_EASING
            )),
        );
        merged.insert(
            "animationDelay".to_string(),
            Value::String(format!("{}s", seconds(delay))),
        );
    }
    merged
}

fn seconds(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Condition, ConditionKind, SectionKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn section(value: Value) -> Section {
        serde_json::from_value(value).unwrap()
    }

    fn render(section: &Section, data: &Value) -> Option<RenderedBlock> {
        let parser = PlaceholderParser::default();
        SectionFactory::new(&parser).render(section, data)
    }

    #[test]
    fn test_resolves_props() {
        let node = section(json!({
            "id": "intro",
            "type": "header",
            "props": {"title": "{{couple.groom.name}} & {{couple.bride.name}}"}
        }));
        let data = json!({"couple": {"groom": {"name": "Ken"}, "bride": {"name": "Mio"}}});
        let block = render(&node, &data).unwrap();
        assert_eq!(block.id, "intro");
        assert_eq!(block.kind, SectionKind::Header);
        assert_eq!(block.content.text_content(), "Ken & Mio");
    }

    #[test]
    fn test_condition_gates_node_and_children() {
        let mut node = section(json!({
            "id": "gallery",
            "type": "gallery",
            "children": [{"id": "inner", "type": "divider"}]
        }));
        node.condition = Some(Condition {
            path: "gallery.images".to_string(),
            value: json!(0),
            kind: ConditionKind::Show,
        });
        let data = json!({"gallery": {"images": [{"url": "a.jpg"}]}});
        assert!(render(&node, &data).is_none());

        node.condition.as_mut().unwrap().kind = ConditionKind::Hide;
        let block = render(&node, &data).unwrap();
        assert_eq!(block.children.len(), 1);
    }

    #[test]
    fn test_unrecognized_kind_is_skipped() {
        let node = section(json!({"id": "odd", "type": "hologram"}));
        assert!(render(&node, &json!({})).is_none());
    }

    #[test]
    fn test_unrecognized_child_does_not_abort_parent() {
        let node = section(json!({
            "id": "parent",
            "type": "custom",
            "children": [
                {"id": "a", "type": "spacer"},
                {"id": "b", "type": "bogus"},
                {"id": "c", "type": "divider"}
            ]
        }));
        let block = render(&node, &json!({})).unwrap();
        let ids: Vec<_> = block.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_child_conditions_use_root_data() {
        let node = section(json!({
            "id": "rsvp",
            "type": "rsvp",
            "children": [
                {"id": "deadline", "type": "custom",
                 "condition": {"path": "rsvp.enabled", "value": true, "type": "show"}},
                {"id": "closed", "type": "custom",
                 "condition": {"path": "rsvp.enabled", "value": true, "type": "hide"}}
            ]
        }));
        let block = render(&node, &json!({"rsvp": {"enabled": true}})).unwrap();
        let ids: Vec<_> = block.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["deadline"]);
    }

    #[test]
    fn test_missing_props_default_to_empty() {
        let node = section(json!({"id": "d", "type": "divider"}));
        let block = render(&node, &json!({})).unwrap();
        assert_eq!(block.content.to_html(), "<div class=\"kb-divider\"><hr></div>");
    }

    #[test]
    fn test_animation_merged_into_style() {
        let node = section(json!({
            "id": "h",
            "type": "header",
            "style": {"textAlign": "center"},
            "animation": {"type": "fadeIn", "duration": 1.5, "delay": 0.25}
        }));
        let block = render(&node, &json!({})).unwrap();
        assert_eq!(
            Value::Object(block.style),
            json!({
                "textAlign": "center",
                "animation": "fadeIn 1.5s ease-out both",
                "animationDelay": "0.25s"
            })
        );
    }

    #[test]
    fn test_animation_defaults() {
        let animation = Animation {
            name: "slideUp".to_string(),
            duration: None,
            delay: None,
        };
        let style = merge_style(&Map::new(), Some(&animation));
        assert_eq!(style["animation"], json!("slideUp 0.8s ease-out both"));
        assert_eq!(style["animationDelay"], json!("0s"));
        assert!(merge_style(&Map::new(), None).is_empty());
    }
}
