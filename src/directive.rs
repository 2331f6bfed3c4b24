//! Reading one directive call, `NAME(arg, ...)`, into a name and arguments.

use serde_json::Value;

use crate::errors::{MacroError, Result};

/// One macro call: `NAME(arg, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub args: Vec<Value>,
}

/// Parse a single directive call.
///
/// Arguments are quoted strings (`'…'` or `"…"`), numbers, `true`/`false`/`null`,
/// or bare tokens such as `obj` or `this.items`, which are read as strings.
/// Errors carry the byte offset where reading stopped.
pub fn parse_directive(input: &str) -> Result<Directive> {
    let mut cur = Cursor::new(input);
    cur.skip_ws();
    let name = cur.take_while(is_name_char);
    if name.is_empty() {
        return Err(cur.error("expected macro name"));
    }
    cur.skip_ws();
    cur.require('(')?;
    let args = arguments(&mut cur)?;
    cur.skip_ws();
    if !cur.at_end() {
        return Err(cur.error("unexpected text after directive"));
    }
    Ok(Directive { name: name.to_string(), args })
}

fn is_name_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

fn is_token_char(c: char) -> bool {
    c == '$' || c == '.' || is_name_char(c)
}

/// Comma-separated arguments up to and including the closing `)`.
fn arguments(cur: &mut Cursor<'_>) -> Result<Vec<Value>> {
    let mut args = Vec::new();
    cur.skip_ws();
    if cur.eat(')') {
        return Ok(args);
    }
    loop {
        cur.skip_ws();
        args.push(argument(cur)?);
        cur.skip_ws();
        if !cur.eat(',') {
            cur.require(')')?;
            return Ok(args);
        }
    }
}

fn argument(cur: &mut Cursor<'_>) -> Result<Value> {
    match cur.peek() {
        Some(q @ ('"' | '\'')) => quoted(cur, q).map(Value::String),
        Some(c) if c == '-' || c.is_ascii_digit() => number(cur),
        Some(c) if is_token_char(c) => Ok(match cur.take_while(is_token_char) {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            "null" => Value::Null,
            token => Value::String(token.to_string()),
        }),
        Some(c) => Err(cur.error(format!("unexpected {c:?} in argument list"))),
        None => Err(cur.error("unexpected end of directive")),
    }
}

fn quoted(cur: &mut Cursor<'_>, quote: char) -> Result<String> {
    let start = cur.pos();
    cur.bump();
    let mut out = String::new();
    while let Some(c) = cur.bump() {
        match c {
            c if c == quote => return Ok(out),
            '\\' => match cur.bump() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(c @ ('\\' | '"' | '\'')) => out.push(c),
                // unknown escapes stay as written
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => break,
            },
            c => out.push(c),
        }
    }
    Err(MacroError::Parse {
        offset: start,
        message: "unterminated string".into(),
    })
}

fn number(cur: &mut Cursor<'_>) -> Result<Value> {
    let start = cur.pos();
    let text = cur.take_while(|c| c == '-' || c == '.' || c.is_ascii_digit());
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_number)
        .ok_or_else(|| MacroError::Parse {
            offset: start,
            message: format!("bad number `{text}`"),
        })
}

/// Byte cursor over the directive text.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn skip_ws(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn require(&mut self, c: char) -> Result<()> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{c}`")))
        }
    }

    fn error(&self, message: impl Into<String>) -> MacroError {
        MacroError::Parse {
            offset: self.pos,
            message: message.into(),
        }
    }
}
