//! Template engine - the main entry point for template expansion
//!
//! Orchestrates the pipeline: scan template text for `${...}` spans, parse
//! and evaluate each span against the data context, and walk JSON-like
//! trees interpreting the `$when` and `$data` directive keys.

use crate::diagnostics::{Diagnostic, DiagnosticBuilder, DiagnosticCode};
use crate::error::{TemplateError, TemplateResult};
use crate::evaluator::{EvaluationContext, Evaluator};
use crate::model::Value;
use crate::parser::parse;
use crate::registry::FunctionRegistry;
use indexmap::IndexMap;
use std::sync::Arc;

/// Map key that conditionally includes its map in the output
pub const WHEN_KEY: &str = "$when";
/// Map key that repeats its map once per item of a data collection
pub const DATA_KEY: &str = "$data";

/// How the engine treats a failing expression span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Substitute an empty string for the failing span, record a
    /// diagnostic and keep expanding the rest of the template
    #[default]
    Lenient,
    /// Abort expansion on the first failing span
    Strict,
}

/// Result of an expansion together with out-of-band diagnostics
///
/// Under the lenient policy every swallowed error appears here; an empty
/// diagnostics list means the whole template expanded cleanly.
#[derive(Debug, Clone, PartialEq)]
pub struct Expanded<T> {
    /// The expanded output
    pub value: T,
    /// Diagnostics collected while expanding
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Expanded<T> {
    /// Check whether any error-severity diagnostic was recorded
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Main template engine for string and tree expansion
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    evaluator: Evaluator,
    policy: ErrorPolicy,
}

impl TemplateEngine {
    /// Create an engine backed by the shared default function registry,
    /// with the lenient error policy
    pub fn new() -> Self {
        Self {
            evaluator: Evaluator::new(),
            policy: ErrorPolicy::Lenient,
        }
    }

    /// Create an engine with an injected function registry
    pub fn with_registry(registry: Arc<FunctionRegistry>) -> Self {
        Self {
            evaluator: Evaluator::with_registry(registry),
            policy: ErrorPolicy::Lenient,
        }
    }

    /// Set the error policy
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The active error policy
    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Expand every `${...}` span in a plain string template
    ///
    /// Text outside spans passes through unchanged; a template without
    /// spans is returned as-is with no evaluation attempted.
    pub fn expand_string(&self, template: &str, data: &Value) -> TemplateResult<Expanded<String>> {
        log::debug!("expanding string template ({} bytes)", template.len());
        let context = EvaluationContext::new(data.clone());
        let mut session = Session::new(self);
        let value = session.expand_text(template, &context)?;
        Ok(Expanded {
            value,
            diagnostics: session.diagnostics,
        })
    }

    /// Expand a JSON-like template tree
    ///
    /// String leaves go through string expansion; map nodes interpret the
    /// `$when` and `$data` directive keys. A `$data`-bearing map fans out
    /// into one map per data item: flattened into a containing list, or a
    /// list value in any other position.
    pub fn expand(&self, template: &Value, data: &Value) -> TemplateResult<Expanded<Value>> {
        log::debug!("expanding template tree");
        let context = EvaluationContext::new(data.clone());
        let mut session = Session::new(self);
        let value = match session.expand_node(template, &context)? {
            Expansion::One(value) => value,
            Expansion::Many(items) => Value::List(items),
            // A standalone map removed by `$when` leaves an empty map
            Expansion::None => Value::empty_object(),
        };
        Ok(Expanded {
            value,
            diagnostics: session.diagnostics,
        })
    }
}

/// Result of expanding one tree node
enum Expansion {
    /// The node expanded to a single value
    One(Value),
    /// A `$data`-bearing map fanned out into several values
    Many(Vec<Value>),
    /// The node was excluded by `$when`
    None,
}

/// Per-call expansion state: the diagnostics channel for one expansion
struct Session<'a> {
    engine: &'a TemplateEngine,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Session<'a> {
    fn new(engine: &'a TemplateEngine) -> Self {
        Self {
            engine,
            diagnostics: Vec::new(),
        }
    }

    /// Route one span failure through the error policy: strict aborts,
    /// lenient records a diagnostic and lets the caller degrade
    fn span_failed(&mut self, error: TemplateError) -> TemplateResult<()> {
        match self.engine.policy {
            ErrorPolicy::Strict => Err(error),
            ErrorPolicy::Lenient => {
                log::debug!("span degraded to empty: {error}");
                self.diagnostics.push(error.to_diagnostic());
                Ok(())
            }
        }
    }

    /// Parse and evaluate one span's source; `Null` stands in for the
    /// result of a leniently-swallowed failure
    fn evaluate_span(
        &mut self,
        source: &str,
        context: &EvaluationContext,
    ) -> TemplateResult<Value> {
        let expression = match parse(source) {
            Ok(expression) => expression,
            Err(error) => {
                self.span_failed(TemplateError::parse(source, error))?;
                return Ok(Value::Null);
            }
        };
        match self.engine.evaluator.evaluate(&expression, context) {
            Ok(value) => Ok(value),
            Err(error) => {
                self.span_failed(TemplateError::evaluation(source, error))?;
                Ok(Value::Null)
            }
        }
    }

    /// Expand `${...}` spans in template text
    fn expand_text(
        &mut self,
        template: &str,
        context: &EvaluationContext,
    ) -> TemplateResult<String> {
        // Fast path: nothing to evaluate
        if !template.contains("${") {
            return Ok(template.to_string());
        }

        let mut output = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("${") {
            output.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            match find_span_end(after_open) {
                Some(end) => {
                    let source = &after_open[..end];
                    let value = self.evaluate_span(source, context)?;
                    log::trace!("span '{source}' -> {value:?}");
                    output.push_str(&value.to_output_string());
                    rest = &after_open[end + 1..];
                }
                None => {
                    // No matching close brace: keep the text literally
                    self.diagnostics.push(
                        DiagnosticBuilder::warning(DiagnosticCode::UnclosedExpression)
                            .with_message("'${' span without matching '}'")
                            .with_expression(&rest[start..])
                            .build(),
                    );
                    output.push_str(&rest[start..]);
                    rest = "";
                    break;
                }
            }
        }
        output.push_str(rest);
        Ok(output)
    }

    /// Expand one tree node
    fn expand_node(
        &mut self,
        node: &Value,
        context: &EvaluationContext,
    ) -> TemplateResult<Expansion> {
        match node {
            Value::String(text) => {
                let expanded = self.expand_text(text, context)?;
                Ok(Expansion::One(Value::String(expanded)))
            }
            Value::List(items) => {
                let mut output = Vec::with_capacity(items.len());
                for item in items {
                    match self.expand_node(item, context)? {
                        Expansion::One(value) => output.push(value),
                        // Fan-out flattens into the containing list
                        Expansion::Many(values) => output.extend(values),
                        Expansion::None => {}
                    }
                }
                Ok(Expansion::One(Value::List(output)))
            }
            Value::Object(map) => self.expand_map(map, context),
            scalar => Ok(Expansion::One(scalar.clone())),
        }
    }

    /// Expand a map node, interpreting `$data` and `$when`
    fn expand_map(
        &mut self,
        map: &IndexMap<String, Value>,
        context: &EvaluationContext,
    ) -> TemplateResult<Expansion> {
        let Some(data_template) = map.get(DATA_KEY) else {
            return match self.expand_map_body(map, context)? {
                Some(value) => Ok(Expansion::One(value)),
                None => Ok(Expansion::None),
            };
        };

        let items = match self.directive_value(data_template, context)? {
            // Missing iteration source: the map contributes nothing
            Value::Null => return Ok(Expansion::None),
            Value::List(items) => items,
            // A single object iterates as a singleton list
            single => vec![single],
        };

        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let frame = context.with_frame(item, index);
            // `$when` evaluates under the item frame, filtering per item
            if let Some(value) = self.expand_map_body(map, &frame)? {
                output.push(value);
            }
        }
        Ok(Expansion::Many(output))
    }

    /// Expand the non-directive keys of a map; `None` when `$when` excludes it
    fn expand_map_body(
        &mut self,
        map: &IndexMap<String, Value>,
        context: &EvaluationContext,
    ) -> TemplateResult<Option<Value>> {
        if let Some(when_template) = map.get(WHEN_KEY) {
            let condition = self.directive_value(when_template, context)?;
            if !condition.is_truthy() {
                return Ok(None);
            }
        }

        let mut output = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            if key == WHEN_KEY || key == DATA_KEY {
                continue;
            }
            match self.expand_node(value, context)? {
                Expansion::One(expanded) => {
                    output.insert(key.clone(), expanded);
                }
                // Fan-out in a single-value slot produces a list there
                Expansion::Many(values) => {
                    output.insert(key.clone(), Value::List(values));
                }
                // A value excluded by `$when` drops its key entirely
                Expansion::None => {}
            }
        }
        Ok(Some(Value::Object(output)))
    }

    /// Evaluate a directive value: a string that is exactly one `${...}`
    /// span yields the raw expression result (so `$data` can receive a
    /// real list), any other string expands as text, and non-string
    /// values are used directly
    fn directive_value(
        &mut self,
        template: &Value,
        context: &EvaluationContext,
    ) -> TemplateResult<Value> {
        match template {
            Value::String(text) => match as_single_span(text) {
                Some(source) => self.evaluate_span(source, context),
                None => Ok(Value::String(self.expand_text(text, context)?)),
            },
            other => Ok(other.clone()),
        }
    }
}

/// Find the byte offset of the `}` closing a span, given the text just
/// after the opening `${`. Tracks brace nesting and skips quoted strings
/// so function calls and string literals inside the span do not end it.
fn find_span_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (offset, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                if depth == 0 {
                    return Some(offset);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

/// Check whether trimmed text is exactly one `${...}` span and return its
/// contents
fn as_single_span(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    let inner = trimmed.strip_prefix("${")?;
    let end = find_span_end(inner)?;
    if end + 1 == inner.len() {
        Some(&inner[..end])
    } else {
        None
    }
}
