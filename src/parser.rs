//! Template expression parsing for mold.
//!
//! Turns template text into an expression tree of literal text and action
//! nodes. Actions are delimited by `{{` and `}}` and cover field access
//! (`{{.name}}`, `{{.a.b}}`), helper calls (`{{snake .name}}`), conditionals
//! (`{{if .flag}}...{{else}}...{{end}}`) and iteration
//! (`{{range .items}}...{{else}}...{{end}}`).
//!
//! Parsing is purely syntactic: no data is resolved and no helper table is
//! consulted, so the same tree serves both the placeholder analyzer and the
//! renderer.

use crate::error::{Error, Result};

/// An argument or standalone expression inside an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Dot-joined field access; an empty chain is `{{.}}`, the implicit
    /// context value.
    Field(Vec<String>),
    /// A helper call applied to a single argument, e.g. `snake .name`.
    Call { name: String, arg: Box<Expr> },
    /// A double-quoted string literal.
    Str(String),
}

/// One node of the parsed expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal template text, emitted verbatim.
    Text(String),
    /// A substitution action: `{{<expr>}}`.
    Action(Expr),
    /// `{{if <expr>}} body {{else}} else_body {{end}}`.
    If { cond: Expr, body: Vec<Node>, else_body: Vec<Node> },
    /// `{{range <expr>}} body {{else}} else_body {{end}}`.
    Range { over: Expr, body: Vec<Node>, else_body: Vec<Node> },
}

const OPEN_DELIM: &str = "{{";
const CLOSE_DELIM: &str = "}}";

/// Parses template text into its expression tree.
///
/// # Arguments
/// * `source` - Template text
///
/// # Returns
/// * `Result<Vec<Node>>` - The parsed node sequence
///
/// # Errors
/// * `Error::ParseError` on malformed syntax: an unterminated action
///   delimiter, an empty action, a stray `{{else}}` or `{{end}}`, an
///   unclosed `{{if}}`/`{{range}}` block, or a malformed expression
pub fn parse(source: &str) -> Result<Vec<Node>> {
    let segments = lex(source)?;
    let mut stream = segments.into_iter().peekable();
    let (nodes, terminator) = parse_nodes(&mut stream, None)?;
    match terminator {
        None => Ok(nodes),
        Some(Keyword::Else) => Err(Error::ParseError("unexpected {{else}}".into())),
        Some(Keyword::End) => Err(Error::ParseError("unexpected {{end}}".into())),
    }
}

/// A lexed slice of the template: literal text or the trimmed inside of
/// one `{{...}}` action.
#[derive(Debug)]
enum Segment {
    Text(String),
    Action(String),
}

/// Block-structure keywords recognized as the first word of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Else,
    End,
}

fn lex(source: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut rest = source;
    let mut offset = 0;

    while let Some(open) = rest.find(OPEN_DELIM) {
        if open > 0 {
            segments.push(Segment::Text(rest[..open].to_string()));
        }
        let after_open = &rest[open + OPEN_DELIM.len()..];
        let close = after_open.find(CLOSE_DELIM).ok_or_else(|| {
            let line = line_of(source, offset + open);
            Error::ParseError(format!("unterminated action at line {}", line))
        })?;
        let action = after_open[..close].trim();
        if action.is_empty() {
            let line = line_of(source, offset + open);
            return Err(Error::ParseError(format!("empty action at line {}", line)));
        }
        segments.push(Segment::Action(action.to_string()));
        let consumed = open + OPEN_DELIM.len() + close + CLOSE_DELIM.len();
        rest = &rest[consumed..];
        offset += consumed;
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest.to_string()));
    }
    Ok(segments)
}

/// 1-based line number of a byte offset, for parse error messages.
fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].bytes().filter(|b| *b == b'\n').count() + 1
}

type SegmentStream = std::iter::Peekable<std::vec::IntoIter<Segment>>;

/// Parses a node sequence until the stream ends or a block keyword is hit.
/// `block` names the enclosing construct (`"if"` or `"range"`) when parsing
/// a nested body, and is used for unclosed-block diagnostics.
fn parse_nodes(
    stream: &mut SegmentStream,
    block: Option<&str>,
) -> Result<(Vec<Node>, Option<Keyword>)> {
    let mut nodes = Vec::new();

    while let Some(segment) = stream.next() {
        let action = match segment {
            Segment::Text(text) => {
                nodes.push(Node::Text(text));
                continue;
            }
            Segment::Action(action) => action,
        };

        let (word, rest) = split_first_word(&action);
        match word {
            "else" => {
                if !rest.is_empty() {
                    return Err(Error::ParseError("unexpected text after {{else}}".into()));
                }
                return Ok((nodes, Some(Keyword::Else)));
            }
            "end" => {
                if !rest.is_empty() {
                    return Err(Error::ParseError("unexpected text after {{end}}".into()));
                }
                return Ok((nodes, Some(Keyword::End)));
            }
            "if" | "range" => {
                if rest.is_empty() {
                    return Err(Error::ParseError(format!("missing expression in {{{{{}}}}}", word)));
                }
                let expr = parse_expr(rest)?;
                let (body, else_body) = parse_block_bodies(stream, word)?;
                nodes.push(if word == "if" {
                    Node::If { cond: expr, body, else_body }
                } else {
                    Node::Range { over: expr, body, else_body }
                });
            }
            _ => nodes.push(Node::Action(parse_expr(&action)?)),
        }
    }

    if let Some(kind) = block {
        return Err(Error::ParseError(format!("unclosed {{{{{}}}}} action, missing {{{{end}}}}", kind)));
    }
    Ok((nodes, None))
}

/// Parses the body (and optional else-body) of an `if` or `range` block up
/// to its `{{end}}`.
fn parse_block_bodies(
    stream: &mut SegmentStream,
    kind: &str,
) -> Result<(Vec<Node>, Vec<Node>)> {
    let (body, terminator) = parse_nodes(stream, Some(kind))?;
    match terminator {
        Some(Keyword::End) => Ok((body, Vec::new())),
        Some(Keyword::Else) => {
            let (else_body, terminator) = parse_nodes(stream, Some(kind))?;
            match terminator {
                Some(Keyword::End) => Ok((body, else_body)),
                Some(Keyword::Else) => Err(Error::ParseError("unexpected second {{else}}".into())),
                None => unreachable!("parse_nodes reports unclosed blocks as errors"),
            }
        }
        None => unreachable!("parse_nodes reports unclosed blocks as errors"),
    }
}

/// Parses one action expression: a field access, a string literal, or a
/// helper call with exactly one argument.
fn parse_expr(action: &str) -> Result<Expr> {
    let tokens = tokenize(action)?;
    match tokens.as_slice() {
        [] => Err(Error::ParseError("empty action".into())),
        [single] => parse_term(single),
        [name, arg] => {
            if !is_identifier(name) {
                return Err(Error::ParseError(format!("invalid helper name '{}'", name)));
            }
            let arg = parse_term(arg)?;
            Ok(Expr::Call { name: (*name).to_string(), arg: Box::new(arg) })
        }
        _ => Err(Error::ParseError(format!("too many arguments in action '{}'", action))),
    }
}

/// Parses a single term: `.`, `.a.b`, or a quoted string literal.
fn parse_term(token: &str) -> Result<Expr> {
    if let Some(literal) = token.strip_prefix('"') {
        let inner = literal
            .strip_suffix('"')
            .ok_or_else(|| Error::ParseError(format!("unterminated string literal '{}'", token)))?;
        return Ok(Expr::Str(inner.to_string()));
    }
    if token == "." {
        return Ok(Expr::Field(Vec::new()));
    }
    if let Some(chain) = token.strip_prefix('.') {
        let idents: Vec<String> = chain.split('.').map(str::to_string).collect();
        if idents.iter().any(|ident| !is_identifier(ident)) {
            return Err(Error::ParseError(format!("bad field chain '{}'", token)));
        }
        return Ok(Expr::Field(idents));
    }
    if is_identifier(token) {
        // A bare identifier only makes sense as a helper name, which
        // requires an argument.
        return Err(Error::ParseError(format!("helper '{}' expects one argument", token)));
    }
    Err(Error::ParseError(format!("unrecognized expression '{}'", token)))
}

/// Splits an action into whitespace-separated tokens, keeping quoted string
/// literals as single tokens.
fn tokenize(action: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = action.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' {
            let mut literal = String::from(chars.next().unwrap_or('"'));
            let mut closed = false;
            for c in chars.by_ref() {
                literal.push(c);
                if c == '"' {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(Error::ParseError(format!("unterminated string literal in '{}'", action)));
            }
            tokens.push(literal);
        } else {
            let mut token = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
            tokens.push(token);
        }
    }
    Ok(tokens)
}

/// Splits an action into its first word and the trimmed remainder.
fn split_first_word(action: &str) -> (&str, &str) {
    match action.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (action, ""),
    }
}

fn is_identifier(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_alphanumeric() || c == '_')
}
