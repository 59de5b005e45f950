use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonArrayError {
    NotAnArray { offset: usize },
    EmptyElement { offset: usize },
    UnbalancedBrackets { offset: usize },
    UnterminatedString { offset: usize },
    UnterminatedArray,
    MissingSeparator { offset: usize },
    TrailingContent { offset: usize },
}

impl Display for JsonArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonArrayError::NotAnArray { offset } => {
                write!(f, "JSON content must be an array, but found something else at byte {offset}")
            }
            JsonArrayError::EmptyElement { offset } => {
                write!(f, "Empty element in JSON array at byte {offset}")
            }
            JsonArrayError::UnbalancedBrackets { offset } => {
                write!(f, "Unbalanced brackets in JSON array at byte {offset}")
            }
            JsonArrayError::UnterminatedString { offset } => {
                write!(f, "Unterminated string in JSON array starting at byte {offset}")
            }
            JsonArrayError::UnterminatedArray => f.write_str("JSON array is not terminated with `]`"),
            JsonArrayError::MissingSeparator { offset } => {
                write!(f, "Expected `,` or `]` between JSON array elements at byte {offset}")
            }
            JsonArrayError::TrailingContent { offset } => {
                write!(f, "Unexpected content after the end of JSON array at byte {offset}")
            }
        }
    }
}

impl std::error::Error for JsonArrayError {}

type JsonArrayResult<T> = Result<T, JsonArrayError>;

/// Top-level elements of a JSON array literal, kept as slices of the source text.
///
/// Elements are never re-serialised: key order, number formatting and inner
/// whitespace stay byte-identical to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonArrayElements<'a> {
    items: Vec<&'a str>,
}

impl<'a> JsonArrayElements<'a> {
    pub fn scan(json_array: &'a str) -> JsonArrayResult<Self> {
        Scanner::new(json_array).scan().map(|items| Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Elements `skip..skip + limit`. A missing or zero `limit` takes everything
    /// from `skip` onward.
    pub fn window(&self, skip: usize, limit: Option<usize>) -> &[&'a str] {
        let start = skip.min(self.items.len());
        let end = match limit {
            Some(limit) if limit > 0 => start.saturating_add(limit).min(self.items.len()),
            _ => self.items.len(),
        };
        &self.items[start..end]
    }
}

/// Joins elements into `[\n item,\n item\n]`.
pub fn to_json_array_literal(items: &[&str]) -> String {
    let capacity = items.iter().map(|item| item.len() + 2).sum::<usize>() + 4;
    let mut literal = String::with_capacity(capacity);
    literal.push_str("[\n");
    literal.push_str(&items.join(",\n"));
    literal.push_str("\n]");
    literal
}

pub fn count_elements(json_array: &str) -> JsonArrayResult<usize> {
    JsonArrayElements::scan(json_array).map(|elements| elements.len())
}

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            position: 0,
        }
    }

    fn scan(mut self) -> JsonArrayResult<Vec<&'a str>> {
        self.skip_whitespace();
        if self.peek() != Some(b'[') {
            return Err(JsonArrayError::NotAnArray {
                offset: self.position,
            });
        }
        self.position += 1;

        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.position += 1;
            return self.finish(items);
        }

        loop {
            let item = self.scan_element()?;
            items.push(item);

            // scan_element leaves the position on the `,` or `]` after the value.
            let separator = self.peek();
            self.position += 1;
            if separator != Some(b',') {
                return self.finish(items);
            }
        }
    }

    /// Consumes exactly one value and the whitespace after it. The next byte
    /// must be the `,` or `]` that ends the element.
    fn scan_element(&mut self) -> JsonArrayResult<&'a str> {
        self.skip_whitespace();
        let start = self.position;

        match self.peek() {
            None => return Err(JsonArrayError::UnterminatedArray),
            Some(b',' | b']') => return Err(JsonArrayError::EmptyElement { offset: start }),
            Some(b'}') => return Err(JsonArrayError::UnbalancedBrackets { offset: start }),
            Some(b'"') => self.skip_string()?,
            Some(b'{' | b'[') => self.skip_nested()?,
            Some(_) => self.skip_bare_token(),
        }
        let end = self.position;

        self.skip_whitespace();
        match self.peek() {
            Some(b',' | b']') => Ok(&self.text[start..end]),
            Some(_) => Err(JsonArrayError::MissingSeparator {
                offset: self.position,
            }),
            None => Err(JsonArrayError::UnterminatedArray),
        }
    }

    /// Consumes an object or array up to its matching closing bracket.
    fn skip_nested(&mut self) -> JsonArrayResult<()> {
        let mut open_brackets: Vec<(u8, usize)> = Vec::new();

        while let Some(byte) = self.peek() {
            match byte {
                b'"' => {
                    self.skip_string()?;
                    continue;
                }
                b'{' | b'[' => open_brackets.push((byte, self.position)),
                b'}' | b']' => {
                    let matched = open_brackets
                        .pop()
                        .is_some_and(|(opening, _)| brackets_match(opening, byte));
                    if !matched {
                        return Err(JsonArrayError::UnbalancedBrackets {
                            offset: self.position,
                        });
                    }
                }
                _ => {}
            }
            self.position += 1;
            if open_brackets.is_empty() {
                return Ok(());
            }
        }

        let offset = open_brackets.last().map_or(self.position, |(_, offset)| *offset);
        Err(JsonArrayError::UnbalancedBrackets { offset })
    }

    /// Numbers, `true`, `false` and `null` end at whitespace or structure.
    fn skip_bare_token(&mut self) {
        while let Some(byte) = self.peek() {
            if matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b',' | b']' | b'}' | b'[' | b'{' | b'"') {
                break;
            }
            self.position += 1;
        }
    }

    fn skip_string(&mut self) -> JsonArrayResult<()> {
        let start = self.position;
        self.position += 1;
        while let Some(byte) = self.peek() {
            match byte {
                b'\\' => self.position += 2,
                b'"' => {
                    self.position += 1;
                    return Ok(());
                }
                _ => self.position += 1,
            }
        }
        Err(JsonArrayError::UnterminatedString { offset: start })
    }

    fn finish(mut self, items: Vec<&'a str>) -> JsonArrayResult<Vec<&'a str>> {
        self.skip_whitespace();
        if self.position < self.bytes.len() {
            return Err(JsonArrayError::TrailingContent {
                offset: self.position,
            });
        }
        Ok(items)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.position += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }
}

fn brackets_match(opening: u8, closing: u8) -> bool {
    matches!((opening, closing), (b'{', b'}') | (b'[', b']'))
}
