//! Scoped data context for expression evaluation

use crate::model::Value;
use smallvec::SmallVec;
use std::sync::Arc;

/// One level of `$data` iteration scope
#[derive(Debug, Clone)]
struct IterationFrame {
    /// The current iteration item, bound to `$data`
    data: Arc<Value>,
    /// 0-based position within the iteration source, bound to `$index`
    index: usize,
}

/// Scoped view over caller-supplied data
///
/// Carries the immutable root value and a stack of iteration frames.
/// Contexts are immutable; entering an iteration produces a new child
/// context and the parent stays valid, so evaluation never needs locks.
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    root: Arc<Value>,
    frames: SmallVec<[IterationFrame; 4]>,
}

impl EvaluationContext {
    /// Create a new context over a root value
    pub fn new(root: Value) -> Self {
        Self {
            root: Arc::new(root),
            frames: SmallVec::new(),
        }
    }

    /// Create a child context with one more iteration frame
    pub fn with_frame(&self, data: Value, index: usize) -> Self {
        let mut frames = self.frames.clone();
        frames.push(IterationFrame {
            data: Arc::new(data),
            index,
        });
        Self {
            root: Arc::clone(&self.root),
            frames,
        }
    }

    /// The untouched top-level data, regardless of nesting depth
    pub fn root(&self) -> &Value {
        self.root.as_ref()
    }

    /// The value bare identifiers resolve against: the innermost
    /// iteration item, or the root outside any iteration
    pub fn scope_data(&self) -> &Value {
        self.frames
            .last()
            .map(|frame| frame.data.as_ref())
            .unwrap_or_else(|| self.root.as_ref())
    }

    /// The innermost iteration index, if any iteration is active
    pub fn index(&self) -> Option<usize> {
        self.frames.last().map(|frame| frame.index)
    }

    /// Number of active iteration frames
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Resolve a dotted identifier path to a value
    ///
    /// The first segment is looked up in the current scope's data and
    /// falls through to the root when absent there; `$root`, `$data` and
    /// `$index` pin the starting point instead. A miss at any segment
    /// yields `Null`, never an error.
    pub fn resolve(&self, path: &str) -> Value {
        let mut segments = path.split('.');
        let Some(first) = segments.next() else {
            return Value::Null;
        };

        let start: Value = match first {
            "$root" => self.root.as_ref().clone(),
            "$data" => self.scope_data().clone(),
            "$index" => {
                // $index has no properties; a dotted tail misses
                let has_tail = segments.next().is_some();
                return match self.index() {
                    Some(index) if !has_tail => Value::Number(index as f64),
                    _ => Value::Null,
                };
            }
            name => match self.scope_data().get_property(name) {
                Some(value) => value.clone(),
                None => match self.root.get_property(name) {
                    Some(value) => value.clone(),
                    None => return Value::Null,
                },
            },
        };

        segments.fold(start, |current, segment| lookup_segment(&current, segment))
    }
}

/// Apply one path segment to a value: property access on objects,
/// numeric indexing on lists
fn lookup_segment(value: &Value, segment: &str) -> Value {
    match value {
        Value::Object(map) => map.get(segment).cloned().unwrap_or(Value::Null),
        Value::List(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}
