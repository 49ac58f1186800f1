// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A small model of EDN, the data format Mochi archives are written in.
//!
//! Only the subset Mochi needs is covered. Values render to canonical text
//! through [`Display`].

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Write;

/// An EDN keyword, written as `:name`. Kept apart from strings so that ids
/// and map keys cannot be confused with text fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Keyword(String);

impl Keyword {
    /// Construct a keyword. The name is written as-is, so callers should check
    /// untrusted names with [`Keyword::is_valid_name`] first.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Whether `name` can be written as a keyword without quoting.
    ///
    /// The name may not start with `:` or `#`, end with `:` or contain `::`.
    /// It may hold at most one `/`, which must sit between a prefix and a name.
    pub fn is_valid_name(name: &str) -> bool {
        if name.is_empty()
            || name.starts_with([':', '#'])
            || name.ends_with(':')
            || name.contains("::")
        {
            return false;
        }
        let valid_chars = name.chars().all(|c| {
            c.is_alphanumeric()
                || matches!(
                    c,
                    '*' | '+' | '!' | '-' | '_' | '\'' | '?' | '<' | '>' | '=' | '.' | '/'
                        | '#' | ':' | '$' | '%' | '&'
                )
        });
        let valid_slash = match name.matches('/').count() {
            0 => true,
            1 => !name.starts_with('/') && !name.ends_with('/'),
            _ => false,
        };
        valid_chars && valid_slash
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, ":{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    String(String),
    Keyword(Keyword),
    /// `[a b c]`
    Vector(Vec<Value>),
    /// `(a b c)`
    List(Vec<Value>),
    /// `{:k v}`. Entries render in insertion order.
    Map(Vec<(Keyword, Value)>),
}

impl From<Keyword> for Value {
    fn from(value: Keyword) -> Self {
        Value::Keyword(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

/// Builds a [`Value::Map`] one entry at a time.
#[derive(Default)]
pub struct MapBuilder {
    entries: Vec<(Keyword, Value)>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.entries.push((Keyword::new(key), value.into()));
        self
    }

    pub fn entry_opt(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.entry(key, value),
            None => self,
        }
    }

    pub fn build(self) -> Value {
        Value::Map(self.entries)
    }
}

fn write_string(f: &mut Formatter<'_>, s: &str) -> std::fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

fn write_seq(f: &mut Formatter<'_>, open: char, items: &[Value], close: char) -> std::fmt::Result {
    f.write_char(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        write!(f, "{item}")?;
    }
    f.write_char(close)
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::String(s) => write_string(f, s),
            Value::Keyword(k) => write!(f, "{k}"),
            Value::Vector(items) => write_seq(f, '[', items, ']'),
            Value::List(items) => write_seq(f, '(', items, ')'),
            Value::Map(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{key} {value}")?;
                }
                f.write_char('}')
            }
        }
    }
}
