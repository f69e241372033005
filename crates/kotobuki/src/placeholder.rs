//! Placeholder resolution for section prop trees.
//!
//! A prop tree is any JSON value. Strings may embed `{{...}}` spans, objects
//! tagged `"type": "placeholder"` are structured placeholders, and array
//! elements carrying `eachPath` are loop directives that expand once per item.
//!
//! ```rust
//! use kotobuki::PlaceholderParser;
//! use serde_json::json;
//!
//! let parser = PlaceholderParser::default();
//! let data = json!({"couple": {"groom": {"name": "Ken"}}});
//! assert_eq!(parser.parse_str("Dear {{couple.bride.name||guest}}", &data), "Dear guest");
//! assert_eq!(parser.parse_str("{{couple.groom.name}}", &data), "Ken");
//! ```

use crate::options::RenderOptions;
use crate::path::Scope;
use crate::value::{is_falsy, stringify, type_name};
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Key marking an array element as an `#each` directive
pub const EACH_PATH_KEY: &str = "eachPath";

static SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("placeholder span pattern is valid"));

/// Value transform applied by a structured placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Uppercase,
    Lowercase,
    Capitalize,
    Date,
    Time,
}

impl FromStr for Transform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uppercase" => Ok(Transform::Uppercase),
            "lowercase" => Ok(Transform::Lowercase),
            "capitalize" => Ok(Transform::Capitalize),
            "date" => Ok(Transform::Date),
            "time" => Ok(Transform::Time),
            other => Err(format!("unknown transform: {other}")),
        }
    }
}

/// Structured placeholder: `{"type": "placeholder", "path": ..., "defaultValue": ..., "transform": ...}`
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderExpr<'a> {
    pub path: &'a str,
    pub default_value: Option<&'a Value>,
    pub transform: Option<&'a str>,
}

/// Loop directive: `{"eachPath": ..., "props": ...}`
#[derive(Debug, Clone, Copy)]
pub struct EachDirective<'a> {
    pub each_path: &'a str,
    pub props: Option<&'a Value>,
    fields: &'a Map<String, Value>,
}

/// Classification of one prop tree node
#[derive(Debug, Clone, Copy)]
pub enum PropNode<'a> {
    /// Number, boolean or null
    Scalar(&'a Value),
    /// String, possibly containing `{{...}}` spans
    Text(&'a str),
    Placeholder(PlaceholderExpr<'a>),
    Each(EachDirective<'a>),
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
}

impl<'a> PropNode<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::String(s) => PropNode::Text(s),
            Value::Array(items) => PropNode::Array(items),
            Value::Object(fields) => Self::classify_object(fields),
            scalar => PropNode::Scalar(scalar),
        }
    }

    fn classify_object(fields: &'a Map<String, Value>) -> Self {
        if let Some(each_path) = fields.get(EACH_PATH_KEY) {
            return PropNode::Each(EachDirective {
                each_path: each_path.as_str().unwrap_or_default(),
                props: fields.get("props"),
                fields,
            });
        }
        if fields.get("type").and_then(Value::as_str) == Some("placeholder") {
            return PropNode::Placeholder(PlaceholderExpr {
                path: fields.get("path").and_then(Value::as_str).unwrap_or_default(),
                default_value: fields.get("defaultValue"),
                transform: fields.get("transform").and_then(Value::as_str),
            });
        }
        PropNode::Object(fields)
    }
}

/// Resolves placeholders in prop trees against wedding data.
///
/// The parser is an immutable bundle of options; one instance can be shared
/// by any number of concurrent renders.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderParser {
    options: RenderOptions,
}

impl PlaceholderParser {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Resolve every placeholder in `tree` against `data`
    pub fn parse(&self, tree: &Value, data: &Value) -> Value {
        self.parse_in(tree, &Scope::new(data))
    }

    /// Resolve the `{{...}}` spans of a single string against `data`
    pub fn parse_str(&self, text: &str, data: &Value) -> String {
        self.parse_str_in(text, &Scope::new(data))
    }

    /// Resolve every placeholder in `tree` against an explicit scope
    pub fn parse_in(&self, tree: &Value, scope: &Scope) -> Value {
        match PropNode::classify(tree) {
            PropNode::Scalar(value) => value.clone(),
            PropNode::Text(text) => Value::String(self.parse_str_in(text, scope)),
            PropNode::Placeholder(expr) => self.resolve_placeholder(&expr, scope),
            // Outside an array a directive is an ordinary object
            PropNode::Each(directive) => self.parse_object(directive.fields, scope),
            PropNode::Object(fields) => self.parse_object(fields, scope),
            PropNode::Array(items) => self.parse_array(items, scope),
        }
    }

    pub fn parse_str_in(&self, text: &str, scope: &Scope) -> String {
        SPAN.replace_all(text, |caps: &Captures| resolve_span(&caps[1], scope))
            .into_owned()
    }

    fn parse_object(&self, fields: &Map<String, Value>, scope: &Scope) -> Value {
        let resolved = fields
            .iter()
            .filter(|(key, _)| key.as_str() != EACH_PATH_KEY)
            .map(|(key, value)| (key.clone(), self.parse_in(value, scope)))
            .collect();
        Value::Object(resolved)
    }

    fn parse_array(&self, items: &[Value], scope: &Scope) -> Value {
        let has_directive = items
            .iter()
            .any(|item| matches!(PropNode::classify(item), PropNode::Each(_)));
        if !has_directive {
            return Value::Array(items.iter().map(|item| self.parse_in(item, scope)).collect());
        }

        let mut output = Vec::new();
        for item in items {
            match PropNode::classify(item) {
                PropNode::Each(directive) => output.extend(self.expand_each(&directive, scope)),
                _ => match self.parse_in(item, scope) {
                    Value::Array(nested) => output.extend(nested),
                    other => output.push(other),
                },
            }
        }
        output.retain(|value| !is_falsy(value));
        Value::Array(output)
    }

    fn expand_each(&self, directive: &EachDirective, scope: &Scope) -> Vec<Value> {
        let items = match scope.resolve(directive.each_path) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                debug!(
                    "eachPath '{}' resolved to {}, expected array",
                    directive.each_path,
                    type_name(other)
                );
                return Vec::new();
            }
            None => return Vec::new(),
        };

        let props = directive.props.unwrap_or(&Value::Null);
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let inner = scope.enter_loop(index, items.len(), item);
                self.parse_in(props, &inner)
            })
            .collect()
    }

    fn resolve_placeholder(&self, expr: &PlaceholderExpr, scope: &Scope) -> Value {
        match scope.resolve(expr.path) {
            None | Some(Value::Null) => expr
                .default_value
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())),
            Some(Value::String(s)) => match expr.transform {
                Some(name) => Value::String(self.apply_transform(name, s)),
                None => Value::String(s.clone()),
            },
            Some(other) => Value::String(stringify(other)),
        }
    }

    fn apply_transform(&self, name: &str, input: &str) -> String {
        let transform = match name.parse::<Transform>() {
            Ok(transform) => transform,
            Err(message) => {
                debug!("{message}; leaving value untransformed");
                return input.to_string();
            }
        };

        match transform {
            Transform::Uppercase => input.to_uppercase(),
            Transform::Lowercase => input.to_lowercase(),
            Transform::Capitalize => capitalize(input),
            Transform::Date => self.options.locale.format_date(input).unwrap_or_else(|| {
                debug!("cannot format '{input}' as a date");
                input.to_string()
            }),
            Transform::Time => self.options.locale.format_time(input).unwrap_or_else(|| {
                debug!("cannot format '{input}' as a time");
                input.to_string()
            }),
        }
    }
}

/// Resolve the inside of one `{{...}}` span.
///
/// `path:expected?result` shows `result` when the value at `path` is the
/// string `expected`; `path||default` falls back on null or missing values;
/// anything else is a plain path.
fn resolve_span(content: &str, scope: &Scope) -> String {
    if let Some((condition, result)) = content.split_once('?') {
        let (path, expected) = match condition.split_once(':') {
            Some((path, expected)) => (path.trim(), Some(expected.trim())),
            None => (condition.trim(), None),
        };
        let matched = match (scope.resolve(path), expected) {
            (Some(Value::String(actual)), Some(expected)) => actual == expected,
            (None, None) => true,
            _ => false,
        };
        return if matched {
            result.trim().to_string()
        } else {
            String::new()
        };
    }

    if let Some((path, default_value)) = content.split_once("||") {
        return match scope.resolve(path.trim()) {
            None | Some(Value::Null) => default_value.trim().to_string(),
            Some(value) => stringify(value),
        };
    }

    scope
        .resolve(content.trim())
        .map(stringify)
        .unwrap_or_default()
}

fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
