//! Template rendering for mold.
//!
//! Executes a parsed expression tree against a read-only data context,
//! substituting field values, applying case-conversion helpers and
//! evaluating conditional and iteration blocks. Parsing is strict before
//! execution: a syntactically invalid template fails with `ParseError`
//! before any field is resolved.

use crate::error::{Error, Result};
use crate::fsutils;
use crate::helpers::Helpers;
use crate::parser::{self, Expr, Node};
use log::debug;
use serde_json::Value;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Template execution engine holding the immutable helper table.
pub struct Renderer {
    helpers: Helpers,
}

impl Renderer {
    /// Creates a renderer with the built-in case-conversion helpers.
    pub fn new() -> Self {
        Self { helpers: Helpers::builtin() }
    }

    /// Creates a renderer with a caller-supplied helper table.
    pub fn with_helpers(helpers: Helpers) -> Self {
        Self { helpers }
    }

    /// Renders template text against the data context.
    ///
    /// # Arguments
    /// * `template` - Template text
    /// * `data` - Read-only data context resolved by field actions
    ///
    /// # Returns
    /// * `Result<String>` - The rendered output
    ///
    /// # Errors
    /// * `Error::ParseError` on malformed template syntax
    /// * `Error::RenderError` when a field does not resolve against `data`,
    ///   a non-mapping value is indexed, a composite value is rendered as
    ///   text, or a helper is invoked incorrectly
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        let nodes = parser::parse(template)?;
        let mut output = String::new();
        self.render_nodes(&nodes, data, &mut output)?;
        Ok(output)
    }

    /// Renders placeholders embedded in a path string (a single segment or
    /// a full relative path). Same semantics as [`Renderer::render`]; a
    /// string without action syntax passes through unchanged.
    pub fn render_path(&self, path: &str, data: &Value) -> Result<String> {
        self.render(path, data)
    }

    /// Renders a template file to a destination file, mirroring the source
    /// file's permission bits onto the destination.
    ///
    /// The template is rendered fully in memory before the destination is
    /// touched, so a failed render leaves no partial destination file.
    ///
    /// # Errors
    /// * `Error::NotFound` if the source template is absent
    /// * `Error::ParseError` / `Error::RenderError` as for [`Renderer::render`]
    /// * `Error::IoError` on read, write or permission failures
    pub fn render_file<P, Q>(&self, src: P, dest: Q, data: &Value) -> Result<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let src = src.as_ref();
        let dest = dest.as_ref();
        if !src.exists() {
            return Err(Error::NotFound { path: src.to_path_buf() });
        }

        let template = fs::read_to_string(src)?;
        let rendered = self.render(&template, data)?;

        debug!("Writing rendered file: {}", dest.display());
        fs::write(dest, rendered)?;
        fsutils::copy_permissions(src, dest)
    }

    fn render_nodes(&self, nodes: &[Node], context: &Value, output: &mut String) -> Result<()> {
        for node in nodes {
            match node {
                Node::Text(text) => output.push_str(text),
                Node::Action(expr) => {
                    let value = self.eval(expr, context)?;
                    output.push_str(&value_to_text(&value)?);
                }
                Node::If { cond, body, else_body } => {
                    let value = self.eval(cond, context)?;
                    if is_truthy(&value) {
                        self.render_nodes(body, context, output)?;
                    } else {
                        self.render_nodes(else_body, context, output)?;
                    }
                }
                Node::Range { over, body, else_body } => {
                    self.render_range(over, body, else_body, context, output)?;
                }
            }
        }
        Ok(())
    }

    /// Renders the body once per element of the resolved collection, with
    /// the element as the implicit context inside the body. An empty
    /// collection renders the else-body instead.
    fn render_range(
        &self,
        over: &Expr,
        body: &[Node],
        else_body: &[Node],
        context: &Value,
        output: &mut String,
    ) -> Result<()> {
        let collection = self.eval(over, context)?;
        match collection.as_ref() {
            Value::Array(items) => {
                if items.is_empty() {
                    return self.render_nodes(else_body, context, output);
                }
                for item in items {
                    self.render_nodes(body, item, output)?;
                }
                Ok(())
            }
            Value::Object(entries) => {
                if entries.is_empty() {
                    return self.render_nodes(else_body, context, output);
                }
                for item in entries.values() {
                    self.render_nodes(body, item, output)?;
                }
                Ok(())
            }
            other => Err(Error::RenderError(format!(
                "range over non-collection value of type {}",
                type_name(other)
            ))),
        }
    }

    /// Evaluates an expression to a value. Field accesses borrow from the
    /// context; string literals and helper results are owned.
    fn eval<'a>(&self, expr: &Expr, context: &'a Value) -> Result<Cow<'a, Value>> {
        match expr {
            Expr::Field(chain) => resolve_field(chain, context).map(Cow::Borrowed),
            Expr::Str(literal) => Ok(Cow::Owned(Value::String(literal.clone()))),
            Expr::Call { name, arg } => {
                let helper = self
                    .helpers
                    .get(name)
                    .ok_or_else(|| Error::RenderError(format!("unknown helper '{}'", name)))?;
                let value = self.eval(arg, context)?;
                // Helper arguments are coerced to their scalar textual form;
                // composite and null arguments fail like any bare render.
                let text = value_to_text(&value)?;
                Ok(Cow::Owned(Value::String(helper(&text))))
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new()
    }
}

/// Resolves a dot-joined field chain against the context. An empty chain is
/// the context itself.
fn resolve_field<'a>(chain: &[String], context: &'a Value) -> Result<&'a Value> {
    let mut current = context;
    for (depth, ident) in chain.iter().enumerate() {
        let entries = current.as_object().ok_or_else(|| {
            Error::RenderError(format!(
                "cannot index {} value with '.{}'",
                type_name(current),
                ident
            ))
        })?;
        current = entries.get(ident).ok_or_else(|| {
            Error::RenderError(format!("no entry for key '{}'", chain[..=depth].join(".")))
        })?;
    }
    Ok(current)
}

/// Canonical textual form of a scalar leaf value. Composite values and null
/// have no textual form.
fn value_to_text(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(Error::RenderError("cannot render a null value".into())),
        Value::Array(_) | Value::Object(_) => Err(Error::RenderError(format!(
            "cannot render {} value as text, reference a scalar leaf",
            type_name(value)
        ))),
    }
}

/// Truthiness for `{{if}}` conditions: boolean true, non-zero numbers and
/// non-empty strings/collections are truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}
