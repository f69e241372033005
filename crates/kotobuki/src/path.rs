//! Dotted-path resolution against wedding data and loop scopes.

use serde_json::Value;

/// Resolve a dotted path (e.g. `couple.groom.name`) against a JSON value.
///
/// Returns `None` as soon as a segment is missing or the current value is
/// not an object. Segments are plain object keys: no array indices and no
/// escaping of literal dots.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let value = root.as_object()?.get(first)?;
    walk(value, segments)
}

fn walk<'a, 'p>(mut value: &'a Value, segments: impl Iterator<Item = &'p str>) -> Option<&'a Value> {
    for segment in segments {
        value = match value {
            Value::Object(obj) => obj.get(segment)?,
            _ => return None,
        };
    }
    Some(value)
}

/// Per-iteration bindings injected by an `#each` expansion
#[derive(Debug)]
struct LoopFrame<'a> {
    index: Value,
    first: Value,
    last: Value,
    item: &'a Value,
}

impl<'a> LoopFrame<'a> {
    fn binding(&self, name: &str) -> Option<&Value> {
        match name {
            "index" => Some(&self.index),
            "first" => Some(&self.first),
            "last" => Some(&self.last),
            "item" => Some(self.item),
            _ => None,
        }
    }
}

/// Resolution scope: the root data plus the innermost loop frame, if any.
///
/// A nested loop replaces the outer frame entirely, so `item`, `index`,
/// `first` and `last` always refer to the innermost `#each`.
#[derive(Debug)]
pub struct Scope<'a> {
    root: &'a Value,
    frame: Option<LoopFrame<'a>>,
}

impl<'a> Scope<'a> {
    /// Create a scope over the root data
    pub fn new(root: &'a Value) -> Self {
        Self { root, frame: None }
    }

    /// The root data this scope was created from
    pub fn root(&self) -> &'a Value {
        self.root
    }

    /// Resolve a dotted path, looking at loop bindings before the root data
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        let Some(frame) = &self.frame else {
            return resolve(self.root, path);
        };

        let mut segments = path.split('.');
        let first = segments.next()?;
        match frame.binding(first) {
            Some(value) => walk(value, segments),
            None => resolve(self.root, path),
        }
    }

    /// Enter one iteration of an `#each` expansion
    pub fn enter_loop<'b>(&'b self, index: usize, len: usize, item: &'b Value) -> Scope<'b> {
        Scope {
            root: self.root,
            frame: Some(LoopFrame {
                index: Value::from(index),
                first: Value::Bool(index == 0),
                last: Value::Bool(index + 1 == len),
                item,
            }),
        }
    }
}
