use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comment,
    /// End of a logical line.
    Newline,
    /// A line break that does not end a logical line: inside brackets, or
    /// after a blank or comment-only line.
    Nl,
    String,
    /// Names, numbers and operators.
    Other,
    /// Sits at column 0 of the line after the last source line.
    EndMarker,
}

/// A 1-based line and 0-based byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: Position,
    pub end: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            end,
        }
    }
}

/// Tokenize Python source.
///
/// Never fails: an unterminated string runs to the end of the file, and an
/// unclosed bracket or trailing backslash leaves the final statement open
/// (no `Newline` token). The last token is always an `EndMarker`.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::default();
    let mut line_count: u32 = 0;

    for raw in source.split_inclusive('\n') {
        line_count = line_count.saturating_add(1);
        tokenizer.line(line_count, raw);
    }

    tokenizer.finish(line_count)
}

#[derive(Debug)]
struct OpenString {
    quote: u8,
    triple: bool,
    start: Position,
    text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringEnd {
    /// Byte offset just past the closing quote.
    Closed(usize),
    /// The literal continues on the next line.
    Continued,
    /// A single-quoted literal hit end of line without a backslash.
    Unterminated,
}

#[derive(Debug, Default)]
struct Tokenizer {
    tokens: Vec<Token>,
    depth: u32,
    /// True once the current logical line holds anything besides comments.
    has_code: bool,
    open_string: Option<OpenString>,
    last_line_end: Position,
}

impl Tokenizer {
    fn line(&mut self, lineno: u32, raw: &str) {
        let (content, terminator) = split_terminator(raw);
        let bytes = content.as_bytes();
        let len = bytes.len();
        self.last_line_end = Position::new(lineno, len as u32);

        let mut i = 0;
        if let Some(mut open) = self.open_string.take() {
            match find_string_end(bytes, 0, open.quote, open.triple) {
                StringEnd::Closed(end) => {
                    open.text.push_str(&content[..end]);
                    let end_pos = Position::new(lineno, end as u32);
                    self.push(TokenKind::String, open.text, open.start, end_pos);
                    i = end;
                }
                StringEnd::Continued => {
                    open.text.push_str(raw);
                    self.open_string = Some(open);
                    return;
                }
                StringEnd::Unterminated => {
                    debug!(line = lineno, "unterminated string literal");
                    open.text.push_str(content);
                    self.push(TokenKind::String, open.text, open.start, self.last_line_end);
                    i = len;
                }
            }
        }

        let mut continued = false;
        while i < len {
            let b = bytes[i];
            match b {
                b' ' | b'\t' | b'\x0c' => i += 1,
                b'#' => {
                    self.push(
                        TokenKind::Comment,
                        content[i..].trim_end(),
                        Position::new(lineno, i as u32),
                        Position::new(lineno, content.trim_end().len() as u32),
                    );
                    i = len;
                }
                b'\\' if i + 1 == len => {
                    continued = true;
                    i += 1;
                }
                b'"' | b'\'' => i = self.start_string(lineno, content, i, i),
                b'(' | b'[' | b'{' => {
                    self.depth = self.depth.saturating_add(1);
                    self.push_other(lineno, content, i, i + 1);
                    i += 1;
                }
                b')' | b']' | b'}' => {
                    self.depth = self.depth.saturating_sub(1);
                    self.push_other(lineno, content, i, i + 1);
                    i += 1;
                }
                _ if is_ident_byte(b) && !b.is_ascii_digit() => {
                    let end = scan_while(bytes, i, is_ident_byte);
                    if end < len
                        && matches!(bytes[end], b'"' | b'\'')
                        && is_string_prefix(&content[i..end])
                    {
                        i = self.start_string(lineno, content, i, end);
                    } else {
                        self.push_other(lineno, content, i, end);
                        i = end;
                    }
                }
                _ if b.is_ascii_digit() => {
                    let end = scan_while(bytes, i, |c| {
                        c.is_ascii_alphanumeric() || c == b'_' || c == b'.'
                    });
                    self.push_other(lineno, content, i, end);
                    i = end;
                }
                _ => {
                    self.push_other(lineno, content, i, i + 1);
                    i += 1;
                }
            }
        }

        if let Some(open) = self.open_string.as_mut() {
            open.text.push_str(terminator);
            return;
        }
        if continued {
            return;
        }

        let kind = if self.depth == 0 && self.has_code {
            TokenKind::Newline
        } else {
            TokenKind::Nl
        };
        let end_column = len + terminator.len().max(1);
        self.push(
            kind,
            terminator,
            Position::new(lineno, len as u32),
            Position::new(lineno, end_column as u32),
        );
        if kind == TokenKind::Newline {
            self.has_code = false;
        }
    }

    /// Start a string literal whose prefix begins at `start` and whose opening
    /// quote sits at `quote_at`. Returns the offset to resume scanning from.
    fn start_string(
        &mut self,
        lineno: u32,
        content: &str,
        start: usize,
        quote_at: usize,
    ) -> usize {
        let bytes = content.as_bytes();
        let quote = bytes[quote_at];
        let triple = quote_at + 2 < bytes.len()
            && bytes[quote_at + 1] == quote
            && bytes[quote_at + 2] == quote;
        let body = quote_at + if triple { 3 } else { 1 };
        let start_pos = Position::new(lineno, start as u32);
        self.has_code = true;

        match find_string_end(bytes, body, quote, triple) {
            StringEnd::Closed(end) => {
                let end_pos = Position::new(lineno, end as u32);
                self.push(TokenKind::String, &content[start..end], start_pos, end_pos);
                end
            }
            StringEnd::Continued => {
                self.open_string = Some(OpenString {
                    quote,
                    triple,
                    start: start_pos,
                    text: content[start..].to_string(),
                });
                bytes.len()
            }
            StringEnd::Unterminated => {
                debug!(line = lineno, "unterminated string literal");
                self.push(TokenKind::String, &content[start..], start_pos, self.last_line_end);
                bytes.len()
            }
        }
    }

    fn finish(mut self, line_count: u32) -> Vec<Token> {
        if let Some(open) = self.open_string.take() {
            debug!(line = open.start.line, "string literal runs to end of file");
            self.push(TokenKind::String, open.text, open.start, self.last_line_end);
        }
        if self.has_code {
            debug!(depth = self.depth, "source ends inside an open statement");
        }

        let eof = Position::new(line_count.saturating_add(1), 0);
        self.tokens.push(Token::new(TokenKind::EndMarker, "", eof, eof));
        self.tokens
    }

    fn push_other(&mut self, lineno: u32, content: &str, start: usize, end: usize) {
        self.has_code = true;
        self.push(
            TokenKind::Other,
            &content[start..end],
            Position::new(lineno, start as u32),
            Position::new(lineno, end as u32),
        );
    }

    fn push(&mut self, kind: TokenKind, text: impl Into<String>, start: Position, end: Position) {
        self.tokens.push(Token::new(kind, text, start, end));
    }
}

fn split_terminator(raw: &str) -> (&str, &str) {
    match raw.strip_suffix('\n') {
        Some(rest) => match rest.strip_suffix('\r') {
            Some(content) => (content, &raw[content.len()..]),
            None => (rest, "\n"),
        },
        None => (raw, ""),
    }
}

fn find_string_end(bytes: &[u8], from: usize, quote: u8, triple: bool) -> StringEnd {
    let len = bytes.len();
    let mut i = from;
    while i < len {
        match bytes[i] {
            b'\\' => {
                if i + 1 == len {
                    return StringEnd::Continued;
                }
                i += 2;
            }
            q if q == quote => {
                if !triple {
                    return StringEnd::Closed(i + 1);
                }
                if i + 2 < len && bytes[i + 1] == quote && bytes[i + 2] == quote {
                    return StringEnd::Closed(i + 3);
                }
                i += 1;
            }
            _ => i += 1,
        }
    }

    if triple {
        StringEnd::Continued
    } else {
        StringEnd::Unterminated
    }
}

/// Identifier bytes. Non-ASCII bytes count so multi-byte characters are
/// never split.
fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

fn scan_while(bytes: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> usize {
    let mut i = from;
    while i < bytes.len() && pred(bytes[i]) {
        i += 1;
    }
    i
}

fn is_string_prefix(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "r" | "b" | "u" | "f" | "rb" | "br" | "fr" | "rf"
    )
}
