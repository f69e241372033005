//! Template documents: theme, page layout and the section tree.
//!
//! Templates are authored offline as JSON and never mutated while rendering.
//! Every field has a lenient default so a sloppy template degrades section by
//! section instead of failing to load.

use crate::error::Result;
use crate::path;
use crate::value::{strict_equals, type_name};
use log::warn;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A complete invitation template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Template {
    pub meta: TemplateMeta,
    pub theme: Theme,
    pub page: PageLayout,
    #[serde(deserialize_with = "lenient_sections")]
    pub sections: Vec<Section>,
}

impl Template {
    /// Decode a template from JSON source
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Decode a template from an already parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateMeta {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub colors: ThemeColors,
    pub fonts: ThemeFonts,
    pub spacing: ThemeSpacing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeColors {
    pub background: String,
    pub text: String,
    pub primary: String,
    pub secondary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: "#fffaf5".to_string(),
            text: "#333333".to_string(),
            primary: "#c9a063".to_string(),
            secondary: "#8b5e3c".to_string(),
            accent: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeFonts {
    pub heading: String,
    pub body: String,
}

impl Default for ThemeFonts {
    fn default() -> Self {
        Self {
            heading: "serif".to_string(),
            body: "sans-serif".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSpacing {
    pub section: String,
    pub element: String,
}

impl Default for ThemeSpacing {
    fn default() -> Self {
        Self {
            section: "48px".to_string(),
            element: "16px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageLayout {
    pub max_width: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            max_width: "480px".to_string(),
            padding: None,
        }
    }
}

/// One node of the section tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub style: Map<String, Value>,
    pub props: Option<Value>,
    #[serde(deserialize_with = "lenient_sections")]
    pub children: Vec<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
}

impl Section {
    /// Whether the section passes its condition against the root data.
    /// Sections without a condition are always visible.
    pub fn is_visible(&self, data: &Value) -> bool {
        self.condition
            .as_ref()
            .map_or(true, |condition| condition.is_satisfied(data))
    }
}

/// Decode a section list one node at a time. A node that fails to decode is
/// dropped with a warning and its siblings are kept. A list that is not an
/// array fails, which drops the section that owns it.
fn lenient_sections<'de, D>(deserializer: D) -> std::result::Result<Vec<Section>, D::Error>
where
    D: Deserializer<'de>,
{
    let nodes = match Value::deserialize(deserializer)? {
        Value::Array(nodes) => nodes,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(D::Error::custom(format!(
                "expected a list of sections, found {}",
                type_name(&other)
            )))
        }
    };

    Ok(nodes
        .into_iter()
        .filter_map(|node| {
            let id = node
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            match serde_json::from_value::<Section>(node) {
                Ok(section) => Some(section),
                Err(e) => {
                    warn!("skipping malformed section '{id}': {e}");
                    None
                }
            }
        })
        .collect())
}

/// Section type tag. Unknown tags, and tags that are not strings, are kept
/// as [`SectionKind::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum SectionKind {
    Header,
    Cover,
    Couple,
    Event,
    Gallery,
    Blessing,
    Guestbook,
    Rsvp,
    Divider,
    Spacer,
    Custom,
    Unrecognized(String),
}

impl SectionKind {
    pub fn as_str(&self) -> &str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Cover => "cover",
            SectionKind::Couple => "couple",
            SectionKind::Event => "event",
            SectionKind::Gallery => "gallery",
            SectionKind::Blessing => "blessing",
            SectionKind::Guestbook => "guestbook",
            SectionKind::Rsvp => "rsvp",
            SectionKind::Divider => "divider",
            SectionKind::Spacer => "spacer",
            SectionKind::Custom => "custom",
            SectionKind::Unrecognized(tag) => tag,
        }
    }
}

impl Default for SectionKind {
    fn default() -> Self {
        SectionKind::Unrecognized(String::new())
    }
}

impl From<String> for SectionKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "header" => SectionKind::Header,
            "cover" => SectionKind::Cover,
            "couple" => SectionKind::Couple,
            "event" => SectionKind::Event,
            "gallery" => SectionKind::Gallery,
            "blessing" => SectionKind::Blessing,
            "guestbook" => SectionKind::Guestbook,
            "rsvp" => SectionKind::Rsvp,
            "divider" => SectionKind::Divider,
            "spacer" => SectionKind::Spacer,
            "custom" => SectionKind::Custom,
            _ => SectionKind::Unrecognized(tag),
        }
    }
}

impl From<Value> for SectionKind {
    fn from(tag: Value) -> Self {
        match tag {
            Value::String(tag) => tag.into(),
            Value::Null => SectionKind::default(),
            other => SectionKind::Unrecognized(other.to_string()),
        }
    }
}

impl From<SectionKind> for String {
    fn from(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Unrecognized(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visibility condition: `{path, value, type}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub path: String,
    #[serde(default)]
    pub value: Value,
    #[serde(rename = "type", default)]
    pub kind: ConditionKind,
}

impl Condition {
    /// Evaluate against the root data. `show` needs a strictly equal value;
    /// any other type, or none, needs anything else (including a missing value).
    pub fn is_satisfied(&self, data: &Value) -> bool {
        let equal = strict_equals(path::resolve(data, &self.path), &self.value);
        match self.kind {
            ConditionKind::Show => equal,
            ConditionKind::Hide => !equal,
        }
    }
}

/// Only an explicit `show` tag selects [`ConditionKind::Show`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ConditionKind {
    Show,
    #[default]
    Hide,
}

impl From<String> for ConditionKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "show" => ConditionKind::Show,
            _ => ConditionKind::Hide,
        }
    }
}

/// Entrance animation, attached verbatim to the rendered block's style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    #[serde(rename = "type")]
    pub name: String,
    /// Seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
}
